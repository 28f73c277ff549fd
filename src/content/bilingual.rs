use crate::core::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content language of a bilingual field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    De,
    En,
}

impl Lang {
    pub const ALL: [Lang; 2] = [Lang::De, Lang::En];

    pub fn code(self) -> &'static str {
        match self {
            Lang::De => "de",
            Lang::En => "en",
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "de" => Ok(Lang::De),
            "en" => Ok(Lang::En),
            other => Err(AppError::Validation(format!(
                "Unknown content language '{}' (expected de or en)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Parallel German/English text. Both keys are always present once normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(default)]
    pub de: String,
    #[serde(default)]
    pub en: String,
}

impl BilingualText {
    pub fn new(de: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            de: de.into(),
            en: en.into(),
        }
    }

    /// Same text in both languages; used when a legacy single string is split.
    pub fn uniform(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            de: value.clone(),
            en: value,
        }
    }

    pub fn get(&self, lang: Lang) -> &str {
        match lang {
            Lang::De => &self.de,
            Lang::En => &self.en,
        }
    }

    pub fn set(&mut self, lang: Lang, value: impl Into<String>) {
        match lang {
            Lang::De => self.de = value.into(),
            Lang::En => self.en = value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.de.is_empty() && self.en.is_empty()
    }

    /// First language (de before en) whose text is blank.
    pub fn first_missing(&self) -> Option<Lang> {
        Lang::ALL.into_iter().find(|lang| is_blank(self.get(*lang)))
    }

    /// Repairs any stored shape into a bilingual pair.
    ///
    /// A bare string becomes the content of both languages, an object keeps
    /// its `de`/`en` keys (missing or non-string keys become empty), and
    /// anything else (absent, null, numbers) yields two empty strings.
    pub fn from_stored(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => Self::uniform(s.as_str()),
            Some(Value::Object(map)) => Self {
                de: map.get("de").and_then(Value::as_str).unwrap_or_default().to_string(),
                en: map.get("en").and_then(Value::as_str).unwrap_or_default().to_string(),
            },
            _ => Self::default(),
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::json!({ "de": self.de, "en": self.en })
    }
}

/// Whitespace-only text counts as missing wherever content is required.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
