use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

/// Command history backed by a plain text file
pub struct History {
    /// History file path
    file_path: PathBuf,

    /// Commands in memory, oldest first
    commands: Vec<String>,

    /// Maximum number of kept commands
    max_size: usize,
}

impl History {
    /// Create an empty history
    pub fn new<P: AsRef<Path>>(file_path: P, max_size: usize) -> Self {
        History {
            file_path: file_path.as_ref().to_path_buf(),
            commands: Vec::new(),
            max_size,
        }
    }

    /// Load the history file, if it exists
    pub fn load(&mut self) -> Result<()> {
        if !self.file_path.exists() {
            return Ok(());
        }

        let reader = BufReader::new(File::open(&self.file_path)?);

        self.commands.clear();
        for line in reader.lines() {
            let line = line?;
            if !line.trim().is_empty() {
                self.commands.push(line);
            }
        }

        if self.commands.len() > self.max_size {
            let excess = self.commands.len() - self.max_size;
            self.commands.drain(..excess);
        }

        Ok(())
    }

    /// Write the history file
    pub fn save(&self) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.file_path)?;

        for cmd in &self.commands {
            writeln!(file, "{}", cmd)?;
        }

        Ok(())
    }

    /// Add a command, skipping blanks and consecutive duplicates
    pub fn add(&mut self, command: &str) {
        let command = command.trim();
        if command.is_empty() {
            return;
        }

        if self.commands.last().map(String::as_str) == Some(command) {
            return;
        }

        self.commands.push(command.to_string());

        if self.commands.len() > self.max_size {
            self.commands.remove(0);
        }
    }

    /// All commands, oldest first
    pub fn get_all(&self) -> &[String] {
        &self.commands
    }

    /// Commands containing `pattern`
    pub fn search(&self, pattern: &str) -> Vec<String> {
        self.commands
            .iter()
            .filter(|cmd| cmd.contains(pattern))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_skips_blanks_and_repeats() {
        let mut history = History::new("unused", 2);
        history.add("size");
        history.add("size");
        history.add("   ");
        history.add("stats");
        history.add("find {}");

        assert_eq!(history.get_all(), &["stats".to_string(), "find {}".to_string()]);
        assert_eq!(history.search("find"), vec!["find {}".to_string()]);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("history.txt");

        let mut history = History::new(&path, 10);
        history.add("set a 1");
        history.add("get a");
        history.save().unwrap();

        let mut loaded = History::new(&path, 1);
        loaded.load().unwrap();
        assert_eq!(loaded.get_all(), &["get a".to_string()]);
    }
}
