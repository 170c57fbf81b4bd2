pub mod path;
pub mod value;
pub mod document;
pub mod query;
pub mod store;
pub mod errors;
pub mod index;


pub use path::FieldPath;
pub use query::{Query, FindResults};
pub use store::Store;
pub use errors::{Result, StoreError};
