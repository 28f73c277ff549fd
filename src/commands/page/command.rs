use crate::commands::command::Command;
use crate::commands::parsing::{arg, rest};
use crate::content::page::{page_directory, PageField, PageSlug, StaticPage};
use crate::content::Lang;
use crate::context::AdminContext;
use crate::core::prelude::*;
use crate::editor::Draft;
use crate::i18n::get_command_translation;
use std::sync::Arc;

const USAGE: &str = "\
page list
page show <slug>
page set <slug> <title|subtitle|content> <de|en> <text>
page data <slug> <key> <value>
page save <slug> | discard <slug>";

#[derive(Debug)]
pub struct PageCommand {
    ctx: Arc<AdminContext>,
}

impl PageCommand {
    pub fn new(ctx: Arc<AdminContext>) -> Self {
        Self { ctx }
    }
}

#[async_trait::async_trait]
impl Command for PageCommand {
    fn name(&self) -> &'static str {
        "page"
    }

    fn description(&self) -> &'static str {
        "Edit static pages (about, contact, impressum, datenschutz, agb)"
    }

    fn usage(&self) -> &'static str {
        USAGE
    }

    fn matches(&self, command: &str) -> bool {
        crate::matches_exact!(command, "page" | "pages")
    }

    async fn execute(&self, args: &[&str]) -> Result<String> {
        match args.first().copied() {
            None | Some("-h" | "--help" | "help") => Ok(USAGE.to_string()),
            Some("list" | "ls") => self.list().await,
            Some("show") => {
                let slug = PageSlug::parse(arg(args, 1, "page show <slug>")?)?;
                self.show(slug).await
            }
            Some("set") => {
                let usage = "page set <slug> <title|subtitle|content> <de|en> <text>";
                let slug = PageSlug::parse(arg(args, 1, usage)?)?;
                let field = PageField::parse(arg(args, 2, usage)?)?;
                let lang = Lang::parse(arg(args, 3, usage)?)?;
                let text = rest(args, 4, usage)?;
                self.edit(slug, move |p| p.set_text(field, lang, text)).await
            }
            Some("data") => {
                let usage = "page data <slug> <key> <value>";
                let slug = PageSlug::parse(arg(args, 1, usage)?)?;
                let key = arg(args, 2, usage)?.to_string();
                let value = rest(args, 3, usage)?;
                self.edit(slug, move |p| p.set_data(key, value)).await
            }
            Some("save") => {
                let slug = PageSlug::parse(arg(args, 1, "page save <slug>")?)?;
                self.save(slug).await
            }
            Some("discard") => {
                let slug = PageSlug::parse(arg(args, 1, "page discard <slug>")?)?;
                self.ctx.page_drafts().remove(slug.as_str());
                Ok(get_command_translation("page.discarded", &[slug.as_str()]))
            }
            Some(sub) => Err(AppError::Validation(format!(
                "Unknown page subcommand '{}'. Use 'help page'.",
                sub
            ))),
        }
    }

    fn priority(&self) -> u8 {
        75
    }
}

impl PageCommand {
    async fn list(&self) -> Result<String> {
        let pages = self.ctx.client().list_static_pages().await?;
        let dirty = self.ctx.page_drafts().dirty_keys();
        let mut out = String::from("Static pages:");
        for (page, stored) in page_directory(&pages) {
            let slug = page.page.as_str();
            out.push_str(&format!(
                "\n{} {:<12} {:<40} {}",
                if dirty.iter().any(|d| d == slug) { "*" } else { " " },
                slug,
                crate::core::helpers::preview(&page.title.de, 40),
                if stored { "" } else { "(not stored yet)" }
            ));
        }
        Ok(out.trim_end().to_string())
    }

    /// Pages are only listable, so a draft is cut from the list; a slug the
    /// store lacks starts from its placeholder.
    async fn ensure_draft(&self, slug: PageSlug) -> Result<()> {
        let drafts = self.ctx.page_drafts();
        if drafts.get(slug.as_str()).is_some_and(|d| d.value().is_some()) {
            return Ok(());
        }

        let mut draft = Draft::loading();
        drafts.insert(slug.as_str(), draft.clone());
        let loaded = self.ctx.client().list_static_pages().await.map(|pages| {
            pages
                .into_iter()
                .find(|p| p.page == slug)
                .unwrap_or_else(|| StaticPage::placeholder(slug))
        });
        let result = draft.finish_loading(loaded);
        drafts.insert(slug.as_str(), draft);
        result
    }

    async fn show(&self, slug: PageSlug) -> Result<String> {
        self.ensure_draft(slug).await?;
        let draft = self
            .ctx
            .page_drafts()
            .get(slug.as_str())
            .ok_or_else(|| AppError::Validation(crate::t!("page.no_draft", slug.as_str())))?;
        let page = draft
            .value()
            .ok_or_else(|| AppError::Validation(crate::t!("page.no_draft", slug.as_str())))?;

        let mut out = format!("Page {} ({})", slug, draft.phase());
        for field in PageField::ALL {
            let text = page.text(field);
            out.push_str(&format!(
                "\n  {:<9} DE: {}\n  {:<9} EN: {}",
                field.key(),
                text.de,
                "",
                text.en
            ));
        }
        if slug == PageSlug::Contact {
            let contact = page.contact();
            out.push_str(&format!(
                "\n  email     {}\n  phone     {}\n  address   {}",
                contact.email, contact.phone, contact.address
            ));
        } else if !page.data.is_empty() {
            out.push_str(&format!("\n  data      {}", serde_json::Value::Object(page.data.clone())));
        }
        Ok(out)
    }

    async fn edit(&self, slug: PageSlug, f: impl FnOnce(&mut StaticPage)) -> Result<String> {
        self.ensure_draft(slug).await?;
        self.ctx
            .page_drafts()
            .with(slug.as_str(), |draft| {
                draft.edit(|page| {
                    f(page);
                    Ok(())
                })
            })
            .ok_or_else(|| AppError::Validation(crate::t!("page.no_draft", slug.as_str())))??;
        Ok(get_command_translation("page.edited", &[slug.as_str()]))
    }

    async fn save(&self, slug: PageSlug) -> Result<String> {
        self.ctx.require_session()?;
        let drafts = self.ctx.page_drafts();
        let snapshot = drafts
            .with(slug.as_str(), |draft| draft.begin_save())
            .ok_or_else(|| AppError::Validation(crate::t!("page.no_draft", slug.as_str())))??;

        let outcome = self.ctx.client().save_static_page(&snapshot).await;
        drafts.with(slug.as_str(), |draft| draft.finish_save(&outcome));
        outcome?;
        Ok(get_command_translation("page.saved", &[slug.as_str()]))
    }
}
