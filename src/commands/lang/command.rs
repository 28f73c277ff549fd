use crate::commands::command::Command;
use crate::context::AdminContext;
use crate::core::prelude::*;
use crate::i18n::{self, get_command_translation};
use std::sync::Arc;

/// Switches the notice language and persists it to the config file.
#[derive(Debug)]
pub struct LanguageCommand {
    ctx: Arc<AdminContext>,
}

impl LanguageCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for LanguageCommand {
    fn name(&self) -> &'static str {
        "lang"
    }

    fn description(&self) -> &'static str {
        "Show or change the interface language"
    }

    fn usage(&self) -> &'static str {
        "lang [de|en]"
    }

    fn matches(&self, command: &str) -> bool {
        command.trim().to_lowercase().starts_with("lang")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        let Some(lang) = args.first() else {
            return Ok(get_command_translation(
                "lang.current",
                &[
                    &i18n::get_current_language(),
                    &i18n::get_available_languages().join(", "),
                ],
            ));
        };

        if let Err(e) = i18n::set_language(lang) {
            log::debug!("Language switch rejected: {}", e);
            return Err(AppError::Validation(crate::t!(
                "lang.invalid",
                *lang,
                &i18n::get_available_languages().join(", ")
            )));
        }

        let lang = lang.to_lowercase();
        let config = self.ctx.update_config(|c| c.language = lang.clone());
        if let Err(e) = config.save().await {
            log::warn!("Language changed but config not saved: {}", e);
        }
        Ok(get_command_translation(
            "lang.changed",
            &[&lang.to_uppercase()],
        ))
    }

    fn priority(&self) -> u8 {
        70
    }
}
