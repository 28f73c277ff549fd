use super::render;
use crate::commands::command::Command;
use crate::commands::parsing::{arg, parse_position, rest};
use crate::content::catalog::{CatalogField, CatalogSection};
use crate::content::normalize::normalize_catalog;
use crate::content::Lang;
use crate::context::AdminContext;
use crate::core::prelude::*;
use crate::editor::Draft;
use crate::i18n::get_command_translation;
use std::sync::Arc;

const USAGE: &str = "\
catalog list
catalog show <id>
catalog set <id> <field> <de|en> <text>
catalog hero <id> <url>
catalog type <id> <product|info>
catalog lengths <id> <variant#> <a, b, c>
catalog variant <id> <variant#> <diameter|color|hex|boxImage|implantImage> <value>
catalog article <id> <article#> <artNr|image> <value>
catalog article <id> <article#> <description|category> <de|en> <text>
catalog add-variant <id> | remove-variant <id> <variant#>
catalog add-article <id> | remove-article <id> <article#>
catalog save <id> | discard <id> | reload <id>
catalog export <id> <file> | import <id> <file>";

#[derive(Debug)]
pub struct CatalogCommand {
    ctx: Arc<AdminContext>,
}

impl CatalogCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for CatalogCommand {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn description(&self) -> &'static str {
        "Browse and edit product catalog sections"
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "catalog" | "cat")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        match args.first().copied() {
            None | Some("-h" | "--help" | "help") => Ok(USAGE.to_string()),
            Some("list" | "ls") => self.list().await,
            Some("show") => self.show(arg(args, 1, "catalog show <id>")?).await,
            Some("set") => self.set_text(args).await,
            Some("hero") => {
                let usage = "catalog hero <id> <url>";
                let url = arg(args, 2, usage)?.to_string();
                self.edit(arg(args, 1, usage)?, move |s| {
                    s.images.hero = url;
                    Ok(())
                })
                .await
            }
            Some("type") => self.set_type(args).await,
            Some("lengths") => self.set_lengths(args).await,
            Some("variant") => self.set_variant_field(args).await,
            Some("article") => self.set_article_field(args).await,
            Some("add-variant") => {
                let id = arg(args, 1, "catalog add-variant <id>")?;
                let index = self.edit_value(id, |s| Ok(s.add_variant())).await?;
                Ok(get_command_translation(
                    "catalog.variant_added",
                    &[&(index + 1).to_string(), id],
                ))
            }
            Some("remove-variant") => {
                let usage = "catalog remove-variant <id> <variant#>";
                let index = parse_position(arg(args, 2, usage)?, "Variant")?;
                self.edit(arg(args, 1, usage)?, move |s| s.remove_variant(index).map(|_| ()))
                    .await
            }
            Some("add-article") => {
                let id = arg(args, 1, "catalog add-article <id>")?;
                let index = self.edit_value(id, |s| Ok(s.add_article())).await?;
                Ok(get_command_translation(
                    "catalog.article_added",
                    &[&(index + 1).to_string(), id],
                ))
            }
            Some("remove-article") => {
                let usage = "catalog remove-article <id> <article#>";
                let index = parse_position(arg(args, 2, usage)?, "Article")?;
                self.edit(arg(args, 1, usage)?, move |s| s.remove_article(index).map(|_| ()))
                    .await
            }
            Some("save") => self.save(arg(args, 1, "catalog save <id>")?).await,
            Some("discard") => {
                let id = arg(args, 1, "catalog discard <id>")?;
                self.ctx.catalog_drafts().remove(id);
                Ok(get_command_translation("catalog.discarded", &[id]))
            }
            Some("reload") => {
                let id = arg(args, 1, "catalog reload <id>")?;
                self.ctx.catalog_drafts().remove(id);
                self.show(id).await
            }
            Some("export") => self.export(args).await,
            Some("import") => self.import(args).await,
            Some(sub) => Err(AppError::Validation(format!(
                "Unknown catalog subcommand '{}'. Use 'help catalog'.",
                sub
            ))),
        }
    }

    fn priority(&self) -> u8 {
        80
    }
}

impl CatalogCommand {
    async fn list(&self) -> Result<String> {
        let sections = self.ctx.client().list_catalogs().await?;
        if sections.is_empty() {
            return Ok(get_command_translation("catalog.empty", &[]));
        }
        let dirty = self.ctx.catalog_drafts().dirty_keys();
        let mut out = format!("Catalog sections ({}):", sections.len());
        for section in &sections {
            let is_dirty = section
                .id()
                .is_some_and(|id| dirty.iter().any(|d| d == id));
            out.push('\n');
            out.push_str(&render::summary_line(section, is_dirty));
        }
        Ok(out)
    }

    /// Loads `id` into the draft book unless a loaded draft already exists.
    async fn ensure_draft(&self, id: &str) -> Result<()> {
        let drafts = self.ctx.catalog_drafts();
        if drafts.get(id).is_some_and(|d| d.value().is_some()) {
            return Ok(());
        }

        let mut draft = Draft::loading();
        drafts.insert(id, draft.clone());
        let loaded = draft.finish_loading(self.ctx.client().get_catalog(id).await);
        drafts.insert(id, draft);
        loaded
    }

    async fn show(&self, id: &str) -> Result<String> {
        self.ensure_draft(id).await?;
        let draft = self
            .ctx
            .catalog_drafts()
            .get(id)
            .ok_or_else(|| AppError::Validation(crate::t!("catalog.no_draft", id)))?;
        match draft.value() {
            Some(section) => Ok(render::details(id, section, draft.phase())),
            None => Err(AppError::Validation(crate::t!("catalog.no_draft", id))),
        }
    }

    async fn edit_value<R>(
        &self,
        id: &str,
        f: impl FnOnce(&mut CatalogSection) -> Result<R>,
    ) -> Result<R> {
        self.ensure_draft(id).await?;
        self.ctx
            .catalog_drafts()
            .with(id, |draft| draft.edit(f))
            .ok_or_else(|| AppError::Validation(crate::t!("catalog.no_draft", id)))?
    }

    async fn edit(
        &self,
        id: &str,
        f: impl FnOnce(&mut CatalogSection) -> Result<()>,
    ) -> Result<String> {
        self.edit_value(id, f).await?;
        Ok(get_command_translation("catalog.edited", &[id]))
    }

    async fn set_text(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog set <id> <field> <de|en> <text>";
        let field = CatalogField::parse(arg(args, 2, usage)?)?;
        let lang = Lang::parse(arg(args, 3, usage)?)?;
        let text = rest(args, 4, usage)?;
        self.edit(arg(args, 1, usage)?, move |s| {
            s.set_text(field, lang, text);
            Ok(())
        })
        .await
    }

    async fn set_type(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog type <id> <product|info>";
        let ty = match arg(args, 2, usage)?.to_lowercase().as_str() {
            "product" => crate::content::CatalogType::Product,
            "info" => crate::content::CatalogType::Info,
            other => {
                return Err(AppError::Validation(format!(
                    "Unknown catalog type '{}' (expected product or info)",
                    other
                )))
            }
        };
        self.edit(arg(args, 1, usage)?, move |s| {
            s.catalog_type = ty;
            Ok(())
        })
        .await
    }

    async fn set_lengths(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog lengths <id> <variant#> <a, b, c>";
        let index = parse_position(arg(args, 2, usage)?, "Variant")?;
        let csv = rest(args, 3, usage)?;
        self.edit(arg(args, 1, usage)?, move |s| {
            s.variant_mut(index)?.set_lengths(&csv);
            Ok(())
        })
        .await
    }

    async fn set_variant_field(&self, args: &[&str]) -> Result<String> {
        let usage =
            "catalog variant <id> <variant#> <diameter|color|hex|boxImage|implantImage> <value>";
        let index = parse_position(arg(args, 2, usage)?, "Variant")?;
        let field = arg(args, 3, usage)?.to_string();
        let value = rest(args, 4, usage)?;
        self.edit(arg(args, 1, usage)?, move |s| {
            let variant = s.variant_mut(index)?;
            match field.to_lowercase().as_str() {
                "diameter" => variant.diameter = value,
                "color" => variant.color = value,
                "hex" => {
                    let previous = std::mem::replace(&mut variant.hex, value);
                    if !variant.hex_is_valid() {
                        let rejected = std::mem::replace(&mut variant.hex, previous);
                        return Err(AppError::Validation(format!(
                            "'{}' is not a #RRGGBB color",
                            rejected
                        )));
                    }
                }
                "boximage" => variant.box_image = value,
                "implantimage" => variant.implant_image = value,
                "lengths" => variant.set_lengths(&value),
                other => {
                    return Err(AppError::Validation(format!(
                        "Unknown variant field '{}'",
                        other
                    )))
                }
            }
            Ok(())
        })
        .await
    }

    async fn set_article_field(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog article <id> <article#> <field> [de|en] <value>";
        let index = parse_position(arg(args, 2, usage)?, "Article")?;
        let field = arg(args, 3, usage)?.to_lowercase();
        let (lang, value) = match field.as_str() {
            "description" | "category" => (
                Some(Lang::parse(arg(args, 4, usage)?)?),
                rest(args, 5, usage)?,
            ),
            _ => (None, rest(args, 4, usage)?),
        };

        self.edit(arg(args, 1, usage)?, move |s| {
            let count = s.articles.len();
            let article = s.articles.get_mut(index).ok_or_else(|| {
                AppError::Validation(format!(
                    "Article #{} does not exist ({} articles)",
                    index + 1,
                    count
                ))
            })?;
            match (field.as_str(), lang) {
                ("artnr", _) => article.art_nr = value,
                ("image", _) => article.image = value,
                ("description", Some(lang)) => article.description.set(lang, value),
                ("category", Some(lang)) => article.category.set(lang, value),
                (other, _) => {
                    return Err(AppError::Validation(format!(
                        "Unknown article field '{}'",
                        other
                    )))
                }
            }
            Ok(())
        })
        .await
    }

    async fn save(&self, id: &str) -> Result<String> {
        self.ctx.require_session()?;
        let drafts = self.ctx.catalog_drafts();
        let snapshot = drafts
            .with(id, |draft| draft.begin_save())
            .ok_or_else(|| AppError::Validation(crate::t!("catalog.no_draft", id)))??;

        let outcome = self.ctx.client().save_catalog(id, &snapshot).await;
        drafts.with(id, |draft| draft.finish_save(&outcome));
        outcome?;
        Ok(get_command_translation("catalog.saved", &[id]))
    }

    async fn export(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog export <id> <file>";
        let id = arg(args, 1, usage)?;
        let path = arg(args, 2, usage)?;
        self.ensure_draft(id).await?;
        let section = self
            .ctx
            .catalog_drafts()
            .get(id)
            .and_then(|d| d.value().cloned())
            .ok_or_else(|| AppError::Validation(crate::t!("catalog.no_draft", id)))?;

        let json = serde_json::to_string_pretty(&section)?;
        tokio::fs::write(path, json).await.map_err(AppError::Io)?;
        Ok(get_command_translation("catalog.exported", &[id, path]))
    }

    /// Replaces the draft with a JSON file; the store is untouched until `save`.
    async fn import(&self, args: &[&str]) -> Result<String> {
        let usage = "catalog import <id> <file>";
        let id = arg(args, 1, usage)?;
        let path = arg(args, 2, usage)?;
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(AppError::Io)?;
        let section = normalize_catalog(serde_json::from_str(&content)?)?;

        let mut draft = Draft::loaded(section);
        draft.edit(|_| Ok(()))?;
        self.ctx.catalog_drafts().insert(id, draft);
        Ok(get_command_translation("catalog.imported", &[path, id]))
    }
}
