use super::home::{
    AboutData, FeaturesData, HeroSliderData, HomeSection, SectionData, SectionType, StatsData,
};
use serde_json::{json, Map, Value};

/// Default empty `data` payload for a raw type tag. Unknown tags yield `{}`.
pub fn default_data(tag: &str) -> Value {
    match SectionType::from_tag(tag) {
        Some(ty) => serde_json::to_value(default_payload(ty)).unwrap_or_else(|_| json!({})),
        None => Value::Object(Map::new()),
    }
}

/// Empty `data` payload a new section of `ty` starts from.
pub fn default_payload(ty: SectionType) -> SectionData {
    match ty {
        SectionType::HeroSlider => SectionData::HeroSlider(HeroSliderData::default()),
        SectionType::Features => SectionData::Features(FeaturesData::default()),
        SectionType::Stats => SectionData::Stats(StatsData::default()),
        SectionType::About => SectionData::About(AboutData::default()),
    }
}

/// Next display position after the existing sections (1 when empty).
pub fn next_order(existing: &[HomeSection]) -> i64 {
    existing.iter().map(|s| s.order).max().map_or(1, |max| max + 1)
}

/// Builds a brand-new, active section appended after `existing`.
pub fn new_section(ty: SectionType, existing: &[HomeSection], now_millis: i64) -> HomeSection {
    HomeSection {
        section: format!("{}-{}", ty.tag(), now_millis),
        is_active: true,
        order: next_order(existing),
        data: default_payload(ty),
        extra: Map::new(),
    }
}
