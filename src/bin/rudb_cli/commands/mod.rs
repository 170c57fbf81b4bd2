pub mod items;
pub mod documents;
pub mod index;
