//! Store a string under a key and read it back

use rudb::DataStore;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let store = DataStore::new();

    store.set_item("key1", "{ foo: 'bar', baz: 42 }")?;
    let value = store.get_item("key1")?;

    println!("{}", value);

    Ok(())
}
