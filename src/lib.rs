#[macro_export]
macro_rules! matches_exact {
    ($cmd:expr, $($pattern:literal)|+) => {
        matches!($cmd.trim().to_lowercase().as_str(), $($pattern)|+)
    };
}

// Module definitions
pub mod api;
pub mod commands;
pub mod content;
pub mod context;
pub mod core;
pub mod editor;
pub mod i18n;
pub mod session;
pub mod setup;

// Essential re-exports
pub use commands::{Command, CommandHandler, CommandRegistry};
pub use context::AdminContext;
pub use core::config::Config;
pub use core::error::{AppError, Result};

use std::sync::Arc;

pub fn create_default_registry(ctx: Arc<AdminContext>) -> CommandRegistry {
    use commands::{
        auth::{LoginCommand, LogoutCommand, WhoamiCommand},
        catalog::CatalogCommand,
        exit::ExitCommand,
        home::HomeCommand,
        lang::LanguageCommand,
        page::PageCommand,
        upload::UploadCommand,
        version::VersionCommand,
    };

    let mut registry = CommandRegistry::new();

    registry.register(LoginCommand::new(Arc::clone(&ctx)));
    registry.register(LogoutCommand::new(Arc::clone(&ctx)));
    registry.register(WhoamiCommand::new(Arc::clone(&ctx)));
    registry.register(CatalogCommand::new(Arc::clone(&ctx)));
    registry.register(HomeCommand::new(Arc::clone(&ctx)));
    registry.register(PageCommand::new(Arc::clone(&ctx)));
    registry.register(UploadCommand::new(Arc::clone(&ctx)));
    registry.register(LanguageCommand::new(ctx));
    registry.register(VersionCommand);
    registry.register(ExitCommand);

    registry.initialize();
    registry
}

pub fn create_handler(ctx: Arc<AdminContext>) -> CommandHandler {
    CommandHandler::with_registry(create_default_registry(ctx))
}

pub async fn load_config() -> Result<Config> {
    Config::load().await
}
