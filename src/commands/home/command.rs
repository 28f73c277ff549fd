use crate::api::{MoveDirection, MoveOutcome};
use crate::commands::command::Command;
use crate::commands::parsing::arg;
use crate::content::home::{HomeSection, SectionType};
use crate::content::normalize::normalize_home;
use crate::content::registry::{default_data, new_section};
use crate::content::validate::validate_section;
use crate::context::AdminContext;
use crate::core::helpers::now_millis;
use crate::core::prelude::*;
use crate::i18n::get_command_translation;
use std::sync::Arc;

const USAGE: &str = "\
home list
home show <section>
home template <hero-slider|features|stats|about> [file]
home defaults <type>
home check <file>
home save <file>
home export <section> <file>
home toggle <section>
home move <section> <up|down>
home delete <section>";

#[derive(Debug)]
pub struct HomeCommand {
    ctx: Arc<AdminContext>,
}

impl HomeCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for HomeCommand {
    fn name(&self) -> &'static str {
        "home"
    }

    fn description(&self) -> &'static str {
        "Manage homepage sections"
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "home" | "sections")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        match args.first().copied() {
            None | Some("-h" | "--help" | "help") => Ok(USAGE.to_string()),
            Some("list" | "ls") => self.list().await,
            Some("show") => {
                let section = self.find(arg(args, 1, "home show <section>")?).await?.1;
                Ok(serde_json::to_string_pretty(&section)?)
            }
            Some("template" | "add") => self.template(args).await,
            Some("defaults") => {
                let tag = arg(args, 1, "home defaults <type>")?;
                Ok(serde_json::to_string_pretty(&default_data(tag))?)
            }
            Some("check") => {
                let section = read_section(arg(args, 1, "home check <file>")?).await?;
                validate_section(&section).map_err(AppError::from)?;
                Ok(get_command_translation("home.valid", &[&section.section]))
            }
            Some("save") => {
                self.ctx.require_session()?;
                let section = read_section(arg(args, 1, "home save <file>")?).await?;
                self.ctx.client().save_home_section(&section).await?;
                Ok(get_command_translation("home.saved", &[&section.section]))
            }
            Some("export") => {
                let usage = "home export <section> <file>";
                let section = self.find(arg(args, 1, usage)?).await?.1;
                let path = arg(args, 2, usage)?;
                tokio::fs::write(path, serde_json::to_string_pretty(&section)?)
                    .await
                    .map_err(AppError::Io)?;
                Ok(get_command_translation(
                    "home.exported",
                    &[&section.section, path],
                ))
            }
            Some("toggle") => self.toggle(arg(args, 1, "home toggle <section>")?).await,
            Some("move") => self.move_section(args).await,
            Some("delete" | "rm") => {
                self.ctx.require_session()?;
                let id = arg(args, 1, "home delete <section>")?;
                self.ctx.client().delete_home_section(id).await?;
                Ok(get_command_translation("home.deleted", &[id]))
            }
            Some(sub) => Err(AppError::Validation(format!(
                "Unknown home subcommand '{}'. Use 'help home'.",
                sub
            ))),
        }
    }

    fn priority(&self) -> u8 {
        80
    }
}

async fn read_section(path: &str) -> Result<HomeSection> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(AppError::Io)?;
    normalize_home(serde_json::from_str(&content)?)
}

fn render_list(sections: &[HomeSection]) -> String {
    let mut out = format!("Home sections ({}):", sections.len());
    for (i, s) in sections.iter().enumerate() {
        out.push_str(&format!(
            "\n  {:>2}. [{}] order {:<3} {:<32} {:<12} items: {}",
            i + 1,
            if s.is_active { "on " } else { "off" },
            s.order,
            s.section,
            s.section_type(),
            s.data.item_count()
        ));
    }
    out
}

impl HomeCommand {
    async fn list(&self) -> Result<String> {
        let sections = self.ctx.client().list_home_sections().await?;
        if sections.is_empty() {
            return Ok(get_command_translation("home.empty", &[]));
        }
        Ok(render_list(&sections))
    }

    /// Current list plus the position of `id` in it.
    async fn find(&self, id: &str) -> Result<(Vec<HomeSection>, HomeSection, usize)> {
        let sections = self.ctx.client().list_home_sections().await?;
        let index = sections
            .iter()
            .position(|s| s.section == id)
            .ok_or_else(|| AppError::Validation(crate::t!("home.not_found", id)))?;
        let section = sections[index].clone();
        Ok((sections, section, index))
    }

    async fn template(&self, args: &[&str]) -> Result<String> {
        let usage = "home template <hero-slider|features|stats|about> [file]";
        let tag = arg(args, 1, usage)?;
        let ty = SectionType::from_tag(tag).ok_or_else(|| {
            AppError::Validation(format!(
                "Unknown section type '{}' (expected one of: {})",
                tag,
                SectionType::ALL.map(|t| t.tag()).join(", ")
            ))
        })?;

        let existing = self.ctx.client().list_home_sections().await?;
        let section = new_section(ty, &existing, now_millis());
        let json = serde_json::to_string_pretty(&section)?;

        match args.get(2) {
            Some(path) => {
                tokio::fs::write(path, json).await.map_err(AppError::Io)?;
                Ok(get_command_translation(
                    "home.template_written",
                    &[&section.section, path],
                ))
            }
            None => Ok(json),
        }
    }

    async fn toggle(&self, id: &str) -> Result<String> {
        self.ctx.require_session()?;
        let (_, section, _) = self.find(id).await?;
        let toggled = self.ctx.client().toggle_home_section(&section).await?;
        let state = if toggled.is_active { "on" } else { "off" };
        Ok(get_command_translation("home.toggled", &[id, state]))
    }

    async fn move_section(&self, args: &[&str]) -> Result<String> {
        let usage = "home move <section> <up|down>";
        let id = arg(args, 1, usage)?;
        let direction = MoveDirection::parse(arg(args, 2, usage)?)?;
        self.ctx.require_session()?;

        let (sections, _, index) = self.find(id).await?;
        match self
            .ctx
            .client()
            .move_home_section(&sections, index, direction)
            .await?
        {
            MoveOutcome::Unchanged => Ok(get_command_translation("home.move_noop", &[id])),
            MoveOutcome::Moved { sections, failures } if failures.is_empty() => Ok(format!(
                "{}\n{}",
                get_command_translation("home.moved", &[id]),
                render_list(&sections)
            )),
            MoveOutcome::Moved { sections, failures } => {
                let failed: Vec<String> = failures
                    .iter()
                    .map(|(section, e)| format!("{} ({})", section, e.reason()))
                    .collect();
                Err(AppError::remote(
                    None,
                    format!(
                        "{}\n{}",
                        crate::t!("home.move_partial", &failed.join(", ")),
                        render_list(&sections)
                    ),
                ))
            }
        }
    }
}
