use super::bilingual::{BilingualText, Lang};
use super::lengths::parse_lengths;
use crate::core::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid hex color pattern"));

pub const DEFAULT_VARIANT_HEX: &str = "#000000";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogType {
    #[default]
    Product,
    Info,
}

impl std::fmt::Display for CatalogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogType::Product => write!(f, "product"),
            CatalogType::Info => write!(f, "info"),
        }
    }
}

/// Bilingual top-level fields of a catalog section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogField {
    Name,
    Title,
    Description,
    SubDescription,
    BenefitBar,
    ApplicationArea,
}

impl CatalogField {
    pub const ALL: [CatalogField; 6] = [
        CatalogField::Name,
        CatalogField::Title,
        CatalogField::Description,
        CatalogField::SubDescription,
        CatalogField::BenefitBar,
        CatalogField::ApplicationArea,
    ];

    /// Key in the stored document.
    pub fn key(self) -> &'static str {
        match self {
            CatalogField::Name => "name",
            CatalogField::Title => "title",
            CatalogField::Description => "description",
            CatalogField::SubDescription => "subDescription",
            CatalogField::BenefitBar => "benefitBar",
            CatalogField::ApplicationArea => "applicationArea",
        }
    }

    pub fn parse(input: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.key().eq_ignore_ascii_case(input.trim()))
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "Unknown catalog field '{}' (expected one of: {})",
                    input,
                    Self::ALL.map(|f| f.key()).join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub hero: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(default)]
    pub diameter: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub hex: String,
    #[serde(default)]
    pub lengths: Vec<String>,
    #[serde(default)]
    pub box_image: String,
    #[serde(default)]
    pub implant_image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Variant {
    fn default() -> Self {
        Self {
            diameter: String::new(),
            color: String::new(),
            hex: DEFAULT_VARIANT_HEX.into(),
            lengths: Vec::new(),
            box_image: String::new(),
            implant_image: String::new(),
            extra: Map::new(),
        }
    }
}

impl Variant {
    pub fn hex_is_valid(&self) -> bool {
        HEX_COLOR.is_match(&self.hex)
    }

    pub fn set_lengths(&mut self, input: &str) {
        self.lengths = parse_lengths(input);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub art_nr: String,
    #[serde(default)]
    pub description: BilingualText,
    #[serde(default)]
    pub category: BilingualText,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One product catalog entry as stored in `catalog-sections`.
///
/// Unknown document keys (`_id`, timestamps, ...) are carried in `extra` so a
/// full-document overwrite never drops them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSection {
    #[serde(default)]
    pub name: BilingualText,
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default)]
    pub description: BilingualText,
    #[serde(default)]
    pub sub_description: BilingualText,
    #[serde(default)]
    pub benefit_bar: BilingualText,
    #[serde(default)]
    pub application_area: BilingualText,
    #[serde(rename = "type", default)]
    pub catalog_type: CatalogType,
    #[serde(default)]
    pub images: Images,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogSection {
    /// Store identifier (`_id`, falling back to `id`).
    pub fn id(&self) -> Option<&str> {
        self.extra
            .get("_id")
            .or_else(|| self.extra.get("id"))
            .and_then(Value::as_str)
    }

    pub fn text(&self, field: CatalogField) -> &BilingualText {
        match field {
            CatalogField::Name => &self.name,
            CatalogField::Title => &self.title,
            CatalogField::Description => &self.description,
            CatalogField::SubDescription => &self.sub_description,
            CatalogField::BenefitBar => &self.benefit_bar,
            CatalogField::ApplicationArea => &self.application_area,
        }
    }

    pub fn text_mut(&mut self, field: CatalogField) -> &mut BilingualText {
        match field {
            CatalogField::Name => &mut self.name,
            CatalogField::Title => &mut self.title,
            CatalogField::Description => &mut self.description,
            CatalogField::SubDescription => &mut self.sub_description,
            CatalogField::BenefitBar => &mut self.benefit_bar,
            CatalogField::ApplicationArea => &mut self.application_area,
        }
    }

    pub fn set_text(&mut self, field: CatalogField, lang: Lang, value: impl Into<String>) {
        self.text_mut(field).set(lang, value);
    }

    /// Appends an empty variant and returns its index.
    pub fn add_variant(&mut self) -> usize {
        self.variants.push(Variant::default());
        self.variants.len() - 1
    }

    pub fn remove_variant(&mut self, index: usize) -> Result<Variant> {
        if index >= self.variants.len() {
            return Err(AppError::Validation(format!(
                "Variant #{} does not exist ({} variants)",
                index + 1,
                self.variants.len()
            )));
        }
        Ok(self.variants.remove(index))
    }

    pub fn variant_mut(&mut self, index: usize) -> Result<&mut Variant> {
        let count = self.variants.len();
        self.variants.get_mut(index).ok_or_else(|| {
            AppError::Validation(format!(
                "Variant #{} does not exist ({} variants)",
                index + 1,
                count
            ))
        })
    }

    /// Appends an empty article and returns its index.
    pub fn add_article(&mut self) -> usize {
        self.articles.push(Article::default());
        self.articles.len() - 1
    }

    pub fn remove_article(&mut self, index: usize) -> Result<Article> {
        if index >= self.articles.len() {
            return Err(AppError::Validation(format!(
                "Article #{} does not exist ({} articles)",
                index + 1,
                self.articles.len()
            )));
        }
        Ok(self.articles.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_variant_uses_black_hex() {
        let variant = Variant::default();
        assert_eq!(variant.hex, "#000000");
        assert!(variant.hex_is_valid());
        assert!(variant.lengths.is_empty());
    }

    #[test]
    fn hex_pattern_requires_six_digits() {
        let mut variant = Variant::default();
        for ok in ["#A1b2C3", "#ffffff"] {
            variant.hex = ok.into();
            assert!(variant.hex_is_valid(), "{}", ok);
        }
        for bad in ["#fff", "ffffff", "#GGGGGG", "#1234567", ""] {
            variant.hex = bad.into();
            assert!(!variant.hex_is_valid(), "{}", bad);
        }
    }

    #[test]
    fn set_lengths_uses_lenient_parser() {
        let mut variant = Variant::default();
        variant.set_lengths("8 mm, 10 mm,");
        assert_eq!(variant.lengths, vec!["8 mm", "10 mm", ""]);
    }

    #[test]
    fn add_and_remove_children() {
        let mut section = CatalogSection::default();
        assert_eq!(section.add_variant(), 0);
        assert_eq!(section.add_variant(), 1);
        assert_eq!(section.add_article(), 0);

        assert!(section.remove_variant(5).is_err());
        section.remove_variant(0).expect("exists");
        assert_eq!(section.variants.len(), 1);
        section.remove_article(0).expect("exists");
        assert!(section.articles.is_empty());
    }

    #[test]
    fn field_parse_accepts_document_keys() {
        assert_eq!(
            CatalogField::parse("subDescription").ok(),
            Some(CatalogField::SubDescription)
        );
        assert_eq!(
            CatalogField::parse("benefitbar").ok(),
            Some(CatalogField::BenefitBar)
        );
        assert!(CatalogField::parse("price").is_err());
    }

    #[test]
    fn serializes_with_document_keys_and_keeps_extra() {
        let mut section: CatalogSection = serde_json::from_value(json!({
            "_id": "abc",
            "type": "info",
            "createdAt": "2024-01-01",
            "variants": [{"diameter": "3.5", "boxImage": "b.png", "sku": "X"}]
        }))
        .expect("decode");

        assert_eq!(section.id(), Some("abc"));
        assert_eq!(section.catalog_type, CatalogType::Info);
        section.set_text(CatalogField::BenefitBar, Lang::En, "Precision - Stability");

        let value = serde_json::to_value(&section).expect("encode");
        assert_eq!(value["_id"], "abc");
        assert_eq!(value["createdAt"], "2024-01-01");
        assert_eq!(value["benefitBar"]["en"], "Precision - Stability");
        assert_eq!(value["benefitBar"]["de"], "");
        assert_eq!(value["variants"][0]["boxImage"], "b.png");
        assert_eq!(value["variants"][0]["sku"], "X");
        assert_eq!(value["type"], "info");
    }
}
