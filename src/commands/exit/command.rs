use crate::commands::command::Command;
use crate::core::constants::SIG_EXIT;
use crate::core::prelude::*;
use crate::i18n::get_command_translation;

#[derive(Debug)]
pub struct ExitCommand;

#[async_trait::async_trait]
impl Command for ExitCommand {
    fn name(&self) -> &'static str {
        "exit"
    }

    fn description(&self) -> &'static str {
        "Exit the application"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "exit" | "quit" | "q")
    }

    async fn execute(&self, _args: &[&str]) -> Result<String> {
        Ok(format!(
            "{}{}",
            SIG_EXIT,
            get_command_translation("system.commands.exit", &[])
        ))
    }

    fn priority(&self) -> u8 {
        100
    }
}
