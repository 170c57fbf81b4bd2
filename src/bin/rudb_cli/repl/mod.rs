mod history;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::commands;
use crate::context::Context;
use crate::formatters::OutputFormat;
use crate::utils::error::CliError;
use self::history::History;

const HISTORY_FILE: &str = "rudb_history.txt";
const HISTORY_SIZE: usize = 1000;

/// Interactive mode (REPL)
pub struct Repl {
    /// Execution context
    context: Context,

    /// Line editor
    editor: DefaultEditor,

    /// Persistent command history
    history: History,
}

/// Split off the first whitespace-delimited word
fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim();
    match input.find(char::is_whitespace) {
        Some(pos) => (&input[..pos], input[pos..].trim_start()),
        None => (input, ""),
    }
}

fn require<'a>(arg: &'a str, usage: &str) -> Result<&'a str, CliError> {
    if arg.is_empty() {
        Err(CliError::Usage(usage.to_string()))
    } else {
        Ok(arg)
    }
}

impl Repl {
    /// Create a new REPL
    pub fn new(context: Context) -> Result<Self> {
        let mut editor = DefaultEditor::new()?;

        let mut history = History::new(HISTORY_FILE, HISTORY_SIZE);
        if let Err(e) = history.load() {
            log::warn!("Could not load history from {}: {}", HISTORY_FILE, e);
        }

        for cmd in history.get_all() {
            let _ = editor.add_history_entry(cmd.as_str());
        }

        Ok(Repl {
            context,
            editor,
            history,
        })
    }

    /// Run the REPL until `.exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        println!("{}", self.context.formatter().format_info("rudb CLI - interactive mode"));
        println!("{}", self.context.formatter().format_info("Type .help for help or .exit to quit"));

        loop {
            let prompt = if self.context.store().is_persistent().unwrap_or(false) {
                "rudb> "
            } else {
                "rudb (memory)> "
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    let _ = self.editor.add_history_entry(line.as_str());
                    self.history.add(&line);

                    match self.process_line(line.trim()) {
                        Ok(true) => continue,
                        Ok(false) => break,
                        Err(e) => {
                            println!("{}", self.context.formatter().format_error(&e.to_string()));
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted (Ctrl-C)");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    println!("{}", self.context.formatter().format_error(&format!("Error: {}", err)));
                    break;
                }
            }
        }

        self.history.save()?;
        self.context.store().flush()?;

        Ok(())
    }

    /// Handle one input line; returns false when the REPL should stop
    fn process_line(&mut self, line: &str) -> Result<bool> {
        if line.is_empty() {
            return Ok(true);
        }

        if let Some(special) = line.strip_prefix('.') {
            return self.process_special_command(special);
        }

        self.process_command(line)?;
        Ok(true)
    }

    fn process_command(&mut self, line: &str) -> Result<()> {
        let (command, rest) = split_word(line);
        let context = &mut self.context;

        match command {
            "set" => {
                let (key, value) = split_word(rest);
                let key = require(key, "set <key> <value>")?;
                commands::items::set(context, key, value)
            }
            "get" => commands::items::get(context, require(rest, "get <key>")?),
            "remove" => commands::items::remove(context, require(rest, "remove <key>")?),
            "insert" => commands::documents::insert(context, require(rest, "insert <json|@file>")?),
            "doc" => commands::documents::show(context, require(rest, "doc <id>")?),
            "find" => commands::documents::find(context, if rest.is_empty() { "{}" } else { rest }),
            "delete" => commands::documents::delete(context, require(rest, "delete <query>")?),
            "size" => commands::documents::size(context),
            "clear" => commands::documents::clear(context),
            "index" => commands::index::create(context, require(rest, "index <field>")?),
            "stats" => commands::index::stats(context),
            other => Err(CliError::UnknownCommand(other.to_string()).into()),
        }
    }

    /// Handle a command starting with '.'
    fn process_special_command(&mut self, cmd: &str) -> Result<bool> {
        let (name, arg) = split_word(cmd);

        match name {
            "help" => self.print_help(),
            "exit" | "quit" => {
                println!("Bye!");
                return Ok(false);
            }
            "format" => {
                let format = match arg {
                    "text" => OutputFormat::Text,
                    "json" => OutputFormat::Json,
                    "table" => OutputFormat::Table,
                    _ => return Err(CliError::Usage(".format <text|json|table>".to_string()).into()),
                };

                self.context.set_format(format);
                println!("{}", self.context.formatter().format_success(&format!("Format set to {}", arg)));
            }
            "history" => {
                let commands = if arg.is_empty() {
                    self.history.get_all().to_vec()
                } else {
                    self.history.search(arg)
                };

                if commands.is_empty() {
                    println!("No commands in history.");
                } else {
                    for (i, cmd) in commands.iter().enumerate() {
                        println!("{}: {}", i + 1, cmd);
                    }
                }
            }
            other => return Err(CliError::UnknownCommand(format!(".{}", other)).into()),
        }

        Ok(true)
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("  set <key> <value>         Store a value under a key");
        println!("  get <key>                 Print the value under a key");
        println!("  remove <key>              Remove a key");
        println!("  insert <json|@file>       Insert one or more documents");
        println!("  doc <id>                  Print a document by id");
        println!("  find [query]              Find documents, e.g. {{\"where\": {{\"a\": 1}}, \"sort\": \"name\"}}");
        println!("  delete <query>            Delete documents matching the query's \"where\" clause");
        println!("  size                      Number of documents");
        println!("  clear                     Remove every document");
        println!("  index <field>             Build an equality index on a field");
        println!("  stats                     Index statistics");
        println!();
        println!("  .help                     Show this help");
        println!("  .exit, .quit              Quit");
        println!("  .format <text|json|table> Set the output format");
        println!("  .history [pattern]        Show command history, optionally filtered");
    }
}
