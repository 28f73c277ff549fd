pub mod command;
mod render;

pub use command::CatalogCommand;
