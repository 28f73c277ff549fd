use crate::commands::command::Command;
use crate::commands::parsing::rest;
use crate::context::AdminContext;
use crate::core::prelude::*;
use crate::i18n::get_command_translation;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug)]
pub struct UploadCommand {
    ctx: Arc<AdminContext>,
}

impl UploadCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for UploadCommand {
    fn name(&self) -> &'static str {
        "upload"
    }

    fn description(&self) -> &'static str {
        "Upload an image and print its URL"
    }

    fn usage(&self) -> &'static str {
        "upload <file>"
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "upload" | "up")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        let path = PathBuf::from(rest(args, 0, self.usage())?);
        self.ctx.require_session()?;

        let mut last_percent = None;
        let url = self
            .ctx
            .client()
            .upload_image(&path, move |fraction| {
                let percent = (fraction * 100.0).round() as u32;
                if last_percent != Some(percent) {
                    last_percent = Some(percent);
                    eprint!("\r{}", crate::t!("upload.progress", &percent.to_string()));
                    let _ = std::io::stderr().flush();
                }
            })
            .await;
        eprintln!();

        Ok(get_command_translation("upload.done", &[&url?]))
    }

    fn priority(&self) -> u8 {
        60
    }
}
