//! Read-time repair of stored documents into the current schema.
//!
//! Every loader goes through here before a record reaches the editor. The
//! repairs are pure and idempotent: feeding a normalized record back in
//! yields the same record. Nothing is written back to the store until the
//! next explicit save.
//!
//! Schema history:
//! - `V1`: bilingual fields could be bare strings; hero slides carried
//!   bilingual `title`/`subtitle`; variant `lengths` could be one string.
//! - `V2` (current): every bilingual field is `{de, en}`; a slide is
//!   `{image, link, order}`.

use super::bilingual::BilingualText;
use super::catalog::CatalogSection;
use super::home::{HomeSection, SectionType};
use super::lengths::parse_lengths;
use super::page::StaticPage;
use crate::core::prelude::*;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SchemaVersion {
    V1,
    V2,
}

impl SchemaVersion {
    pub const CURRENT: SchemaVersion = SchemaVersion::V2;
}

pub const CATALOG_TEXT_FIELDS: [&str; 6] = [
    "name",
    "title",
    "description",
    "subDescription",
    "benefitBar",
    "applicationArea",
];
pub const ARTICLE_TEXT_FIELDS: [&str; 2] = ["description", "category"];
pub const PAGE_TEXT_FIELDS: [&str; 3] = ["title", "subtitle", "content"];

const LEGACY_SLIDE_FIELDS: [&str; 2] = ["title", "subtitle"];

fn into_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Decode(format!(
            "{} record is not an object: {}",
            what,
            crate::core::helpers::preview(&other.to_string(), 60)
        ))),
    }
}

fn repair_text(map: &mut Map<String, Value>, field: &str) {
    let text = BilingualText::from_stored(map.get(field));
    map.insert(field.to_string(), text.to_value());
}

fn repair_texts(map: &mut Map<String, Value>, fields: &[&str]) {
    for field in fields {
        repair_text(map, field);
    }
}

/// Strings stay, numbers are formatted, everything else becomes empty.
fn scalar_string(value: Option<&Value>) -> Value {
    match value {
        Some(Value::String(s)) => Value::String(s.clone()),
        Some(Value::Number(n)) => Value::String(n.to_string()),
        _ => Value::String(String::new()),
    }
}

fn take_array(map: &mut Map<String, Value>, key: &str) -> Vec<Value> {
    match map.remove(key) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

fn object_or_empty(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn normalize_variant(value: Value) -> Value {
    let mut variant = object_or_empty(value);
    for key in ["diameter", "color", "hex", "boxImage", "implantImage"] {
        if variant.contains_key(key) {
            let repaired = scalar_string(variant.get(key));
            variant.insert(key.into(), repaired);
        }
    }
    let lengths: Vec<Value> = match variant.remove("lengths") {
        Some(Value::String(csv)) => parse_lengths(&csv).into_iter().map(Value::String).collect(),
        Some(Value::Array(items)) => items.iter().map(|v| scalar_string(Some(v))).collect(),
        _ => Vec::new(),
    };
    variant.insert("lengths".into(), Value::Array(lengths));
    Value::Object(variant)
}

fn normalize_article(value: Value) -> Value {
    let mut article = object_or_empty(value);
    repair_texts(&mut article, &ARTICLE_TEXT_FIELDS);
    if article.contains_key("artNr") {
        let art_nr = scalar_string(article.get("artNr"));
        article.insert("artNr".into(), art_nr);
    }
    Value::Object(article)
}

pub fn normalize_catalog(value: Value) -> Result<CatalogSection> {
    let mut map = into_object(value, "Catalog")?;
    repair_texts(&mut map, &CATALOG_TEXT_FIELDS);

    let known_type = matches!(map.get("type").and_then(Value::as_str), Some("product" | "info"));
    if !known_type {
        map.insert("type".into(), Value::String("product".into()));
    }

    let mut images = object_or_empty(map.remove("images").unwrap_or(Value::Null));
    let hero = scalar_string(images.get("hero"));
    images.insert("hero".into(), hero);
    map.insert("images".into(), Value::Object(images));

    let variants = take_array(&mut map, "variants")
        .into_iter()
        .map(normalize_variant)
        .collect();
    map.insert("variants".into(), Value::Array(variants));

    let articles = take_array(&mut map, "articles")
        .into_iter()
        .map(normalize_article)
        .collect();
    map.insert("articles".into(), Value::Array(articles));

    Ok(serde_json::from_value(Value::Object(map))?)
}

/// Detects which slide schema a hero-slider payload was written under.
pub fn slider_schema(slides: &[Value]) -> SchemaVersion {
    let legacy = slides.iter().any(|slide| {
        LEGACY_SLIDE_FIELDS
            .iter()
            .any(|field| slide.get(field).is_some())
    });
    if legacy {
        SchemaVersion::V1
    } else {
        SchemaVersion::CURRENT
    }
}

fn migrate_slides(section_id: &str, slides: Vec<Value>) -> Vec<Value> {
    if slider_schema(&slides) == SchemaVersion::V1 {
        log::debug!(
            "Migrating hero slides of '{}' from {:?} to {:?}",
            section_id,
            SchemaVersion::V1,
            SchemaVersion::CURRENT
        );
    }

    slides
        .into_iter()
        .enumerate()
        .map(|(idx, slide)| {
            let mut slide = object_or_empty(slide);
            for field in LEGACY_SLIDE_FIELDS {
                slide.remove(field);
            }
            for key in ["image", "link"] {
                let repaired = scalar_string(slide.get(key));
                slide.insert(key.into(), repaired);
            }
            if !slide.get("order").is_some_and(Value::is_i64) {
                slide.insert("order".into(), Value::from(idx as i64 + 1));
            }
            Value::Object(slide)
        })
        .collect()
}

fn normalize_payload(section_id: &str, ty: SectionType, data: Value) -> Value {
    let mut data = object_or_empty(data);
    match ty {
        SectionType::HeroSlider => {
            let slides = migrate_slides(section_id, take_array(&mut data, "slides"));
            data.insert("slides".into(), Value::Array(slides));
        }
        SectionType::Features => {
            let features = take_array(&mut data, "features")
                .into_iter()
                .map(|feature| {
                    let mut feature = object_or_empty(feature);
                    repair_texts(&mut feature, &["title", "content"]);
                    if !feature.get("icon").is_some_and(Value::is_string) {
                        feature.insert("icon".into(), Value::String("Zap".into()));
                    }
                    Value::Object(feature)
                })
                .collect();
            data.insert("features".into(), Value::Array(features));
        }
        SectionType::Stats => {
            let stats = take_array(&mut data, "stats")
                .into_iter()
                .map(|stat| {
                    let mut stat = object_or_empty(stat);
                    let number = scalar_string(stat.get("number"));
                    stat.insert("number".into(), number);
                    repair_text(&mut stat, "label");
                    Value::Object(stat)
                })
                .collect();
            data.insert("stats".into(), Value::Array(stats));
        }
        SectionType::About => {
            let mut about = object_or_empty(data.remove("about").unwrap_or(Value::Null));
            repair_texts(&mut about, &["title", "content"]);
            for key in ["image", "link"] {
                let repaired = scalar_string(about.get(key));
                about.insert(key.into(), repaired);
            }
            data.insert("about".into(), Value::Object(about));
        }
    }
    Value::Object(data)
}

pub fn normalize_home(value: Value) -> Result<HomeSection> {
    let mut map = into_object(value, "Home section")?;

    let section_id = map
        .get("section")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Decode("Home section without 'section' id".into()))?;

    let tag = map.get("type").and_then(Value::as_str).unwrap_or_default();
    let ty = SectionType::from_tag(tag).ok_or_else(|| {
        AppError::Decode(format!(
            "Home section '{}' has unknown type '{}'",
            section_id, tag
        ))
    })?;
    map.insert("type".into(), Value::String(ty.tag().into()));

    if !map.get("isActive").is_some_and(Value::is_boolean) {
        map.insert("isActive".into(), Value::Bool(true));
    }
    let order = match map.get("order") {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    map.insert("order".into(), Value::from(order.unwrap_or(0)));

    let data = map.remove("data").unwrap_or(Value::Null);
    map.insert("data".into(), normalize_payload(&section_id, ty, data));

    Ok(serde_json::from_value(Value::Object(map))?)
}

pub fn normalize_page(value: Value) -> Result<StaticPage> {
    let mut map = into_object(value, "Static page")?;
    repair_texts(&mut map, &PAGE_TEXT_FIELDS);
    if !map.get("data").is_some_and(Value::is_object) {
        map.insert("data".into(), Value::Object(Map::new()));
    }
    Ok(serde_json::from_value(Value::Object(map))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::home::SectionData;
    use serde_json::json;

    #[test]
    fn legacy_catalog_strings_are_duplicated() {
        let section = normalize_catalog(json!({
            "_id": "c1",
            "name": "Shark",
            "title": {"de": "Titel", "en": "Title"},
            "variants": [{"diameter": 3.5, "lengths": "8 mm, 10 mm"}],
            "articles": [{"artNr": 1001, "description": "Schraube"}]
        }))
        .expect("normalize");

        assert_eq!(section.name, BilingualText::uniform("Shark"));
        assert_eq!(section.title, BilingualText::new("Titel", "Title"));
        assert!(section.benefit_bar.is_empty());
        assert_eq!(section.variants[0].diameter, "3.5");
        assert_eq!(section.variants[0].lengths, vec!["8 mm", "10 mm"]);
        assert_eq!(section.articles[0].art_nr, "1001");
        assert_eq!(section.articles[0].description, BilingualText::uniform("Schraube"));
        assert!(section.articles[0].category.is_empty());
    }

    #[test]
    fn catalog_normalization_is_idempotent() {
        let once = normalize_catalog(json!({
            "name": "Legacy",
            "type": "weird",
            "images": "nope",
            "variants": "nope"
        }))
        .expect("first pass");
        let twice =
            normalize_catalog(serde_json::to_value(&once).expect("encode")).expect("second pass");
        assert_eq!(once, twice);
    }

    #[test]
    fn non_object_record_is_a_decode_error() {
        assert!(matches!(
            normalize_catalog(json!("oops")),
            Err(AppError::Decode(_))
        ));
    }

    #[test]
    fn v1_slides_are_migrated() {
        let raw = json!({
            "section": "hero",
            "type": "hero-slider",
            "data": {"slides": [
                {"image": "a.png", "title": {"de": "T", "en": "T"}, "subtitle": "S"},
                {"image": "b.png", "link": "/x"}
            ]}
        });
        let slides = raw["data"]["slides"].as_array().cloned().unwrap_or_default();
        assert_eq!(slider_schema(&slides), SchemaVersion::V1);

        let section = normalize_home(raw).expect("normalize");
        let SectionData::HeroSlider(data) = &section.data else {
            panic!("expected hero slider payload");
        };
        assert_eq!(data.slides.len(), 2);
        assert_eq!(data.slides[0].order, 1);
        assert_eq!(data.slides[1].order, 2);
        assert_eq!(data.slides[1].link, "/x");

        let value = serde_json::to_value(&section).expect("encode");
        assert!(value["data"]["slides"][0].get("title").is_none());
        assert!(value["data"]["slides"][0].get("subtitle").is_none());
    }

    #[test]
    fn home_payloads_get_bilingual_repair() {
        let section = normalize_home(json!({
            "section": "stats",
            "type": "stats",
            "order": "4",
            "data": {"stats": [{"number": 25, "label": "Jahre"}]}
        }))
        .expect("normalize");
        assert_eq!(section.order, 4);
        assert!(section.is_active);
        let SectionData::Stats(data) = &section.data else {
            panic!("expected stats payload");
        };
        assert_eq!(data.stats[0].number, "25");
        assert_eq!(data.stats[0].label, BilingualText::uniform("Jahre"));

        let again =
            normalize_home(serde_json::to_value(&section).expect("encode")).expect("again");
        assert_eq!(section, again);
    }

    #[test]
    fn unknown_section_type_is_rejected() {
        let err = normalize_home(json!({"section": "x", "type": "carousel"}));
        assert!(matches!(err, Err(AppError::Decode(_))));
    }

    #[test]
    fn page_fields_are_repaired() {
        let page = normalize_page(json!({
            "page": "about",
            "title": "Über uns",
            "data": null
        }))
        .expect("normalize");
        assert_eq!(page.title, BilingualText::uniform("Über uns"));
        assert!(page.subtitle.is_empty());
        assert!(page.data.is_empty());
    }
}
