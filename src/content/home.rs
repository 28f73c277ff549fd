use super::bilingual::BilingualText;
use crate::core::prelude::*;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    HeroSlider,
    Features,
    Stats,
    About,
}

impl SectionType {
    pub const ALL: [SectionType; 4] = [
        SectionType::HeroSlider,
        SectionType::Features,
        SectionType::Stats,
        SectionType::About,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            SectionType::HeroSlider => "hero-slider",
            SectionType::Features => "features",
            SectionType::Stats => "stats",
            SectionType::About => "about",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.tag() == tag.trim())
    }
}

impl std::fmt::Display for SectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub order: i64,
}

impl Slide {
    /// Empty slide appended at 1-based `position`.
    pub fn at_position(position: usize) -> Self {
        Self {
            order: position as i64,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default)]
    pub content: BilingualText,
}

impl Default for Feature {
    fn default() -> Self {
        Self {
            icon: "Zap".into(),
            title: BilingualText::default(),
            content: BilingualText::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stat {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub label: BilingualText,
}

impl Default for Stat {
    fn default() -> Self {
        Self {
            number: "0".into(),
            label: BilingualText::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct About {
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default)]
    pub content: BilingualText,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeroSliderData {
    #[serde(default)]
    pub slides: Vec<Slide>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturesData {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsData {
    #[serde(default)]
    pub stats: Vec<Stat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutData {
    #[serde(default)]
    pub about: About,
}

/// Payload of a home section; the variant is the section's type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SectionData {
    HeroSlider(HeroSliderData),
    Features(FeaturesData),
    Stats(StatsData),
    About(AboutData),
}

impl SectionData {
    pub fn section_type(&self) -> SectionType {
        match self {
            SectionData::HeroSlider(_) => SectionType::HeroSlider,
            SectionData::Features(_) => SectionType::Features,
            SectionData::Stats(_) => SectionType::Stats,
            SectionData::About(_) => SectionType::About,
        }
    }

    /// Decodes a stored `data` object for the given type tag.
    pub fn from_value(section_type: SectionType, data: Value) -> Result<Self> {
        let data = match data {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };
        Ok(match section_type {
            SectionType::HeroSlider => SectionData::HeroSlider(serde_json::from_value(data)?),
            SectionType::Features => SectionData::Features(serde_json::from_value(data)?),
            SectionType::Stats => SectionData::Stats(serde_json::from_value(data)?),
            SectionType::About => SectionData::About(serde_json::from_value(data)?),
        })
    }

    /// Number of repeated items (slides, features, stats); `about` counts as one.
    pub fn item_count(&self) -> usize {
        match self {
            SectionData::HeroSlider(d) => d.slides.len(),
            SectionData::Features(d) => d.features.len(),
            SectionData::Stats(d) => d.stats.len(),
            SectionData::About(_) => 1,
        }
    }
}

/// One configurable block of the homepage, keyed by `section`.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeSection {
    pub section: String,
    pub is_active: bool,
    pub order: i64,
    pub data: SectionData,
    pub extra: Map<String, Value>,
}

impl HomeSection {
    pub fn section_type(&self) -> SectionType {
        self.data.section_type()
    }
}

fn default_active() -> bool {
    true
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomeSectionRef<'a> {
    section: &'a str,
    #[serde(rename = "type")]
    section_type: SectionType,
    is_active: bool,
    order: i64,
    data: &'a SectionData,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHomeSection {
    section: String,
    #[serde(rename = "type")]
    section_type: SectionType,
    #[serde(default = "default_active")]
    is_active: bool,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    data: Value,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Serialize for HomeSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        HomeSectionRef {
            section: &self.section,
            section_type: self.section_type(),
            is_active: self.is_active,
            order: self.order,
            data: &self.data,
            extra: &self.extra,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for HomeSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawHomeSection::deserialize(deserializer)?;
        let data = SectionData::from_value(raw.section_type, raw.data)
            .map_err(|e| serde::de::Error::custom(e.reason()))?;
        Ok(Self {
            section: raw.section,
            is_active: raw.is_active,
            order: raw.order,
            data,
            extra: raw.extra,
        })
    }
}
