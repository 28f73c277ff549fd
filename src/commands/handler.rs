use super::parsing::tokenize;
use super::registry::CommandRegistry;
use crate::core::constants::SIG_EXIT;
use crate::core::helpers::preview;
use crate::i18n;

#[derive(Debug)]
pub struct CommandResult {
    pub message: String,
    pub success: bool,
    pub should_exit: bool,
}

impl CommandResult {
    fn empty() -> Self {
        Self {
            message: String::new(),
            success: false,
            should_exit: false,
        }
    }
}

pub struct CommandHandler {
    registry: CommandRegistry,
}

impl CommandHandler {
    pub fn with_registry(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub async fn handle_input(&self, input: &str) -> CommandResult {
        log::debug!("CommandHandler processing: '{}'", preview(input.trim(), 80));
        self.handle_args(&tokenize(input.trim())).await
    }

    /// Runs already split arguments (e.g. process argv) without re-tokenizing.
    pub async fn handle_args(&self, tokens: &[String]) -> CommandResult {
        let Some((command, rest)) = tokens.split_first() else {
            return CommandResult::empty();
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();

        if crate::matches_exact!(command, "help" | "?") {
            return CommandResult {
                message: self.help(args.first().copied()),
                success: true,
                should_exit: false,
            };
        }

        match self.registry.execute(command, &args).await {
            Some(Ok(msg)) => {
                let should_exit = msg.starts_with(SIG_EXIT);
                let message = msg.trim_start_matches(SIG_EXIT).to_string();
                log::debug!(
                    "Command returned {} chars: '{}'",
                    message.chars().count(),
                    preview(&message, 100)
                );
                CommandResult {
                    message,
                    success: true,
                    should_exit,
                }
            }
            Some(Err(e)) => {
                log::warn!("Command '{}' failed: {}", command, e);
                CommandResult {
                    message: i18n::get_command_translation("system.error", &[&e.reason()]),
                    success: false,
                    should_exit: false,
                }
            }
            None => CommandResult {
                message: i18n::get_command_translation("system.commands.unknown", &[command]),
                success: false,
                should_exit: false,
            },
        }
    }

    fn help(&self, topic: Option<&str>) -> String {
        if let Some(cmd) = topic.and_then(|t| self.registry.find_command(t)) {
            let usage = cmd.usage();
            return if usage.is_empty() {
                format!("{}: {}", cmd.name(), cmd.description())
            } else {
                format!("{}: {}\n{}", cmd.name(), cmd.description(), usage)
            };
        }

        let mut out = i18n::get_translation("system.commands.help_header", &[]);
        for (name, description) in self.registry.list_commands() {
            out.push_str(&format!("\n  {:<10} {}", name, description));
        }
        out
    }
}
