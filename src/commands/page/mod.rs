pub mod command;

pub use command::PageCommand;
