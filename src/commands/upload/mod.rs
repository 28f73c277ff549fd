pub mod command;

pub use command::UploadCommand;
