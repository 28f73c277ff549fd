use super::bilingual::{BilingualText, Lang};
use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSlug {
    About,
    Contact,
    Impressum,
    Datenschutz,
    Agb,
}

impl PageSlug {
    /// Sidebar order.
    pub const ALL: [PageSlug; 5] = [
        PageSlug::About,
        PageSlug::Contact,
        PageSlug::Impressum,
        PageSlug::Datenschutz,
        PageSlug::Agb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageSlug::About => "about",
            PageSlug::Contact => "contact",
            PageSlug::Impressum => "impressum",
            PageSlug::Datenschutz => "datenschutz",
            PageSlug::Agb => "agb",
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|slug| slug.as_str() == input)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown page '{}' (expected one of: {})",
                    input,
                    Self::ALL.map(|s| s.as_str()).join(", ")
                ))
            })
    }
}

impl std::fmt::Display for PageSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    Title,
    Subtitle,
    Content,
}

impl PageField {
    pub const ALL: [PageField; 3] = [PageField::Title, PageField::Subtitle, PageField::Content];

    pub fn key(self) -> &'static str {
        match self {
            PageField::Title => "title",
            PageField::Subtitle => "subtitle",
            PageField::Content => "content",
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown page field '{}' (expected title, subtitle or content)",
                    input
                ))
            })
    }
}

/// Typed view over the contact page's extra fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPage {
    pub page: PageSlug,
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default)]
    pub subtitle: BilingualText,
    #[serde(default)]
    pub content: BilingualText,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StaticPage {
    /// Stand-in for a slug the store has no record of yet.
    pub fn placeholder(slug: PageSlug) -> Self {
        Self {
            page: slug,
            title: BilingualText::new(slug.as_str().to_uppercase(), ""),
            subtitle: BilingualText::default(),
            content: BilingualText::default(),
            data: Map::new(),
            extra: Map::new(),
        }
    }

    pub fn text(&self, field: PageField) -> &BilingualText {
        match field {
            PageField::Title => &self.title,
            PageField::Subtitle => &self.subtitle,
            PageField::Content => &self.content,
        }
    }

    pub fn set_text(&mut self, field: PageField, lang: Lang, value: impl Into<String>) {
        let text = match field {
            PageField::Title => &mut self.title,
            PageField::Subtitle => &mut self.subtitle,
            PageField::Content => &mut self.content,
        };
        text.set(lang, value);
    }

    pub fn data_str(&self, key: &str) -> &str {
        self.data.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn set_data(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.insert(key.into(), Value::String(value.into()));
    }

    pub fn contact(&self) -> ContactDetails {
        ContactDetails {
            email: self.data_str("email").to_string(),
            phone: self.data_str("phone").to_string(),
            address: self.data_str("address").to_string(),
        }
    }
}

/// Pages in sidebar order, with placeholders for slugs the store lacks.
pub fn page_directory(pages: &[StaticPage]) -> Vec<(StaticPage, bool)> {
    PageSlug::ALL
        .into_iter()
        .map(|slug| match pages.iter().find(|p| p.page == slug) {
            Some(page) => (page.clone(), true),
            None => (StaticPage::placeholder(slug), false),
        })
        .collect()
}
