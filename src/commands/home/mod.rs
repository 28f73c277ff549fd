pub mod command;

pub use command::HomeCommand;
