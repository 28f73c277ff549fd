// ## FILE: src/i18n/mod.rs
use crate::core::prelude::*;
use rust_embed::RustEmbed;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug)]
pub enum TranslationError {
    InvalidLanguage(String),
    LoadError(String),
}

impl std::fmt::Display for TranslationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLanguage(lang) => write!(f, "Invalid language: {}", lang),
            Self::LoadError(msg) => write!(f, "Load error: {}", msg),
        }
    }
}

#[derive(RustEmbed)]
#[folder = "src/i18n/langs/"]
pub struct Langs;

#[derive(Debug, Clone)]
struct Entry {
    text: String,
    display: String,
}

impl Entry {
    fn format(&self, params: &[&str]) -> String {
        params
            .iter()
            .enumerate()
            .fold(self.text.clone(), |mut text, (i, param)| {
                text = text.replace(&format!("{{{}}}", i), param);
                if text.contains("{}") {
                    text = text.replacen("{}", param, 1);
                }
                text
            })
    }
}

struct I18nService {
    language: String,
    entries: HashMap<String, Entry>,
    fallback: HashMap<String, Entry>,
    cache: HashMap<String, String>,
}

impl I18nService {
    fn new() -> Self {
        let mut service = Self {
            language: DEFAULT_LANGUAGE.into(),
            entries: HashMap::new(),
            fallback: HashMap::new(),
            cache: HashMap::new(),
        };
        if let Err(e) = service.load_language(DEFAULT_LANGUAGE) {
            log::error!("Default language not loadable: {}", e);
        }
        service
    }

    fn load_language(&mut self, lang: &str) -> Result<()> {
        let lang = lang.to_lowercase();
        if !Self::available_languages()
            .iter()
            .any(|l| l.eq_ignore_ascii_case(&lang))
        {
            return Err(AppError::Translation(TranslationError::InvalidLanguage(
                lang,
            )));
        }

        self.entries = Self::load_entries(&lang)?;

        self.fallback.clear();
        for available_lang in Self::available_languages() {
            let other = available_lang.to_lowercase();
            if other != lang {
                if let Ok(other_entries) = Self::load_entries(&other) {
                    for (key, entry) in other_entries {
                        self.fallback.entry(key).or_insert(entry);
                    }
                }
            }
        }

        self.cache.clear();
        self.language = lang;
        Ok(())
    }

    fn load_entries(lang: &str) -> Result<HashMap<String, Entry>> {
        let filename = format!("{}.json", lang.to_lowercase());
        let content = Langs::get(&filename).ok_or_else(|| {
            AppError::Translation(TranslationError::LoadError(format!(
                "File not found: {}",
                filename
            )))
        })?;

        let content_str = std::str::from_utf8(content.data.as_ref())
            .map_err(|e| AppError::Translation(TranslationError::LoadError(e.to_string())))?;

        let raw: HashMap<String, String> = serde_json::from_str(content_str)
            .map_err(|e| AppError::Translation(TranslationError::LoadError(e.to_string())))?;

        Ok(raw
            .iter()
            .filter_map(|(key, value)| {
                key.strip_suffix(".text").map(|base_key| {
                    let display = raw
                        .get(&format!("{}.display_text", base_key))
                        .cloned()
                        .unwrap_or_else(|| "INFO".to_string());

                    (
                        base_key.into(),
                        Entry {
                            text: value.clone(),
                            display,
                        },
                    )
                })
            })
            .collect())
    }

    fn get_translation(&mut self, key: &str, params: &[&str]) -> String {
        let cache_key = if params.is_empty() {
            key.into()
        } else {
            format!("{}:{}", key, params.join(":"))
        };

        if let Some(cached) = self.cache.get(&cache_key) {
            return cached.clone();
        }

        let text = match self.entries.get(key).or_else(|| self.fallback.get(key)) {
            Some(entry) => entry.format(params),
            None => format!("Missing: {}", key),
        };

        if self.cache.len() >= 1000 {
            self.cache.clear();
        }
        self.cache.insert(cache_key, text.clone());
        text
    }

    fn get_command_translation(&mut self, key: &str, params: &[&str]) -> String {
        match self.entries.get(key).or_else(|| self.fallback.get(key)) {
            Some(entry) => format!("[{}] {}", entry.display, entry.format(params)),
            None => format!("[WARNING] Missing: {}", key),
        }
    }

    fn available_languages() -> Vec<String> {
        let mut langs: Vec<String> = Langs::iter()
            .filter_map(|f| {
                let filename = f.as_ref();
                filename.strip_suffix(".json").map(|s| s.to_uppercase())
            })
            .collect();
        langs.sort();
        langs
    }
}

static SERVICE: std::sync::LazyLock<Arc<RwLock<I18nService>>> =
    std::sync::LazyLock::new(|| Arc::new(RwLock::new(I18nService::new())));

fn read_service() -> RwLockReadGuard<'static, I18nService> {
    SERVICE.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_service() -> RwLockWriteGuard<'static, I18nService> {
    SERVICE.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn init() -> Result<()> {
    set_language(DEFAULT_LANGUAGE)
}

pub fn set_language(lang: &str) -> Result<()> {
    write_service().load_language(lang)
}

pub fn get_translation(key: &str, params: &[&str]) -> String {
    write_service().get_translation(key, params)
}

pub fn get_command_translation(key: &str, params: &[&str]) -> String {
    write_service().get_command_translation(key, params)
}

pub fn get_current_language() -> String {
    read_service().language.to_uppercase()
}

pub fn get_available_languages() -> Vec<String> {
    I18nService::available_languages()
}

#[macro_export]
macro_rules! t {
    ($key:expr) => { $crate::i18n::get_translation($key, &[]) };
    ($key:expr, $($arg:expr),+) => { $crate::i18n::get_translation($key, &[$($arg),+]) };
}

#[macro_export]
macro_rules! tc {
    ($key:expr) => { $crate::i18n::get_command_translation($key, &[]) };
    ($key:expr, $($arg:expr),+) => { $crate::i18n::get_command_translation($key, &[$($arg),+]) };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_catalogs_are_embedded() {
        let langs = get_available_languages();
        assert_eq!(langs, vec!["DE".to_string(), "EN".to_string()]);
    }

    #[test]
    fn catalogs_define_the_same_keys() {
        let de = I18nService::load_entries("de").expect("de");
        let en = I18nService::load_entries("en").expect("en");
        let mut de_keys: Vec<_> = de.keys().collect();
        let mut en_keys: Vec<_> = en.keys().collect();
        de_keys.sort();
        en_keys.sort();
        assert_eq!(de_keys, en_keys);
    }

    #[test]
    fn positional_parameters_are_substituted() {
        let entry = Entry {
            text: "Feature #{0}: {1} ({2})".into(),
            display: "INFO".into(),
        };
        assert_eq!(
            entry.format(&["2", "title", "en"]),
            "Feature #2: title (en)"
        );
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut service = I18nService::new();
        assert!(service.load_language("fr").is_err());
        assert_eq!(service.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn missing_key_is_reported() {
        let mut service = I18nService::new();
        assert_eq!(
            service.get_translation("does.not.exist", &[]),
            "Missing: does.not.exist"
        );
    }
}
