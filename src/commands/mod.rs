pub mod auth;
pub mod catalog;
pub mod command;
pub mod exit;
pub mod handler;
pub mod home;
pub mod lang;
pub mod page;
pub mod parsing;
pub mod registry;
pub mod upload;
pub mod version;

pub use command::Command;
pub use handler::{CommandHandler, CommandResult};
pub use registry::CommandRegistry;
