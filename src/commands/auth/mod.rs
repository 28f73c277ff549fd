pub mod command;

pub use command::{LoginCommand, LogoutCommand, WhoamiCommand};
