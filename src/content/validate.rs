use super::bilingual::{is_blank, BilingualText, Lang};
use super::home::{HomeSection, SectionData};

/// First rule a home section breaks. Indices are 0-based; messages show them 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    NoSlides,
    SlideMissingImage { index: usize },
    NoFeatures,
    FeatureIncomplete {
        index: usize,
        field: &'static str,
        lang: Lang,
    },
    NoStats,
    StatMissingNumber { index: usize },
    StatIncomplete { index: usize, lang: Lang },
    AboutIncomplete { field: &'static str, lang: Lang },
    AboutMissingImage,
}

impl ValidationIssue {
    /// Localized notice in the current interface language.
    pub fn render(&self) -> String {
        match *self {
            Self::NoSlides => crate::t!("validation.no_slides"),
            Self::SlideMissingImage { index } => {
                crate::t!("validation.slide_image", position(index).as_str())
            }
            Self::NoFeatures => crate::t!("validation.no_features"),
            Self::FeatureIncomplete { index, field, lang } => crate::t!(
                "validation.feature_field",
                position(index).as_str(),
                field,
                lang.code()
            ),
            Self::NoStats => crate::t!("validation.no_stats"),
            Self::StatMissingNumber { index } => {
                crate::t!("validation.stat_number", position(index).as_str())
            }
            Self::StatIncomplete { index, lang } => {
                crate::t!("validation.stat_label", position(index).as_str(), lang.code())
            }
            Self::AboutIncomplete { field, lang } => {
                crate::t!("validation.about_field", field, lang.code())
            }
            Self::AboutMissingImage => crate::t!("validation.about_image"),
        }
    }
}

fn position(index: usize) -> String {
    (index + 1).to_string()
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoSlides => write!(f, "At least one slide is required"),
            Self::SlideMissingImage { index } => write!(f, "Slide #{} needs an image", index + 1),
            Self::NoFeatures => write!(f, "At least one feature is required"),
            Self::FeatureIncomplete { index, field, lang } => {
                write!(f, "Feature #{}: {} ({}) is required", index + 1, field, lang)
            }
            Self::NoStats => write!(f, "At least one stat is required"),
            Self::StatMissingNumber { index } => write!(f, "Stat #{} needs a number", index + 1),
            Self::StatIncomplete { index, lang } => {
                write!(f, "Stat #{}: label ({}) is required", index + 1, lang)
            }
            Self::AboutIncomplete { field, lang } => {
                write!(f, "About: {} ({}) is required", field, lang)
            }
            Self::AboutMissingImage => write!(f, "About: image is required"),
        }
    }
}

impl std::error::Error for ValidationIssue {}

impl From<ValidationIssue> for crate::core::error::AppError {
    fn from(issue: ValidationIssue) -> Self {
        crate::core::error::AppError::Validation(issue.render())
    }
}

/// Returns the first missing (field, language) across `texts`, in order.
fn first_gap(texts: [(&'static str, &BilingualText); 2]) -> Option<(&'static str, Lang)> {
    texts
        .into_iter()
        .find_map(|(field, text)| text.first_missing().map(|lang| (field, lang)))
}

/// Save gate for home sections. Rules are checked in a fixed order and the
/// first failure wins.
pub fn validate_section(section: &HomeSection) -> Result<(), ValidationIssue> {
    match &section.data {
        SectionData::HeroSlider(data) => {
            if data.slides.is_empty() {
                return Err(ValidationIssue::NoSlides);
            }
            if let Some(index) = data.slides.iter().position(|s| is_blank(&s.image)) {
                return Err(ValidationIssue::SlideMissingImage { index });
            }
        }
        SectionData::Features(data) => {
            if data.features.is_empty() {
                return Err(ValidationIssue::NoFeatures);
            }
            for (index, feature) in data.features.iter().enumerate() {
                if let Some((field, lang)) =
                    first_gap([("title", &feature.title), ("content", &feature.content)])
                {
                    return Err(ValidationIssue::FeatureIncomplete { index, field, lang });
                }
            }
        }
        SectionData::Stats(data) => {
            if data.stats.is_empty() {
                return Err(ValidationIssue::NoStats);
            }
            for (index, stat) in data.stats.iter().enumerate() {
                if is_blank(&stat.number) {
                    return Err(ValidationIssue::StatMissingNumber { index });
                }
                if let Some(lang) = stat.label.first_missing() {
                    return Err(ValidationIssue::StatIncomplete { index, lang });
                }
            }
        }
        SectionData::About(data) => {
            let about = &data.about;
            if let Some((field, lang)) =
                first_gap([("title", &about.title), ("content", &about.content)])
            {
                return Err(ValidationIssue::AboutIncomplete { field, lang });
            }
            if is_blank(&about.image) {
                return Err(ValidationIssue::AboutMissingImage);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::home::{
        About, AboutData, Feature, FeaturesData, HeroSliderData, Slide, Stat, StatsData,
    };
    use serde_json::Map;

    fn section(data: SectionData) -> HomeSection {
        HomeSection {
            section: "s".into(),
            is_active: true,
            order: 1,
            data,
            extra: Map::new(),
        }
    }

    fn full_feature() -> Feature {
        Feature {
            icon: "Zap".into(),
            title: BilingualText::new("Titel", "Title"),
            content: BilingualText::new("Inhalt", "Content"),
        }
    }

    #[test]
    fn empty_slider_fails_until_a_slide_with_image_is_added() {
        let mut data = HeroSliderData::default();
        let err = validate_section(&section(SectionData::HeroSlider(data.clone())))
            .expect_err("no slides");
        assert_eq!(err, ValidationIssue::NoSlides);
        assert!(err.to_string().contains("slide"));

        data.slides.push(Slide {
            image: "x.png".into(),
            ..Slide::at_position(1)
        });
        assert!(validate_section(&section(SectionData::HeroSlider(data))).is_ok());
    }

    #[test]
    fn slide_without_image_is_named_by_position() {
        let data = HeroSliderData {
            slides: vec![
                Slide {
                    image: "a.png".into(),
                    ..Slide::at_position(1)
                },
                Slide::at_position(2),
            ],
        };
        let err = validate_section(&section(SectionData::HeroSlider(data))).expect_err("gap");
        assert_eq!(err, ValidationIssue::SlideMissingImage { index: 1 });
        assert_eq!(err.to_string(), "Slide #2 needs an image");
    }

    #[test]
    fn feature_with_missing_english_title_is_identified() {
        let mut broken = full_feature();
        broken.title.en.clear();
        let data = FeaturesData {
            features: vec![full_feature(), broken],
        };
        let err = validate_section(&section(SectionData::Features(data))).expect_err("gap");
        assert_eq!(
            err,
            ValidationIssue::FeatureIncomplete {
                index: 1,
                field: "title",
                lang: Lang::En
            }
        );
        assert_eq!(err.to_string(), "Feature #2: title (en) is required");
    }

    #[test]
    fn whitespace_only_text_counts_as_missing() {
        let mut blank = full_feature();
        blank.title.de = "   ".into();
        let data = FeaturesData {
            features: vec![blank],
        };
        assert_eq!(
            validate_section(&section(SectionData::Features(data))),
            Err(ValidationIssue::FeatureIncomplete {
                index: 0,
                field: "title",
                lang: Lang::De
            })
        );

        let about = About {
            title: BilingualText::new("Über", "About"),
            content: BilingualText::new("Text", "Text"),
            image: " ".into(),
            link: String::new(),
        };
        assert_eq!(
            validate_section(&section(SectionData::About(AboutData { about }))),
            Err(ValidationIssue::AboutMissingImage)
        );
    }

    #[test]
    fn feature_checks_title_before_content() {
        let data = FeaturesData {
            features: vec![Feature::default()],
        };
        let err = validate_section(&section(SectionData::Features(data))).expect_err("gap");
        assert_eq!(
            err,
            ValidationIssue::FeatureIncomplete {
                index: 0,
                field: "title",
                lang: Lang::De
            }
        );
    }

    #[test]
    fn stats_require_number_then_labels() {
        let mut stat = Stat {
            number: " ".into(),
            label: BilingualText::new("Jahre", ""),
        };
        let data = |s: &Stat| {
            section(SectionData::Stats(StatsData {
                stats: vec![s.clone()],
            }))
        };
        assert_eq!(
            validate_section(&data(&stat)),
            Err(ValidationIssue::StatMissingNumber { index: 0 })
        );
        stat.number = "25+".into();
        assert_eq!(
            validate_section(&data(&stat)),
            Err(ValidationIssue::StatIncomplete {
                index: 0,
                lang: Lang::En
            })
        );
        stat.label.en = "Years".into();
        assert!(validate_section(&data(&stat)).is_ok());

        assert_eq!(
            validate_section(&section(SectionData::Stats(StatsData::default()))),
            Err(ValidationIssue::NoStats)
        );
    }

    #[test]
    fn about_checks_texts_then_image() {
        let mut about = About {
            title: BilingualText::new("Über", "About"),
            content: BilingualText::new("Text", ""),
            image: String::new(),
            link: String::new(),
        };
        let check = |a: &About| {
            validate_section(&section(SectionData::About(AboutData { about: a.clone() })))
        };
        assert_eq!(
            check(&about),
            Err(ValidationIssue::AboutIncomplete {
                field: "content",
                lang: Lang::En
            })
        );
        about.content.en = "Text".into();
        assert_eq!(check(&about), Err(ValidationIssue::AboutMissingImage));
        about.image = "about.jpg".into();
        assert!(check(&about).is_ok());
    }
}
