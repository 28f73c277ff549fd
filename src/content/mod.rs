//! Bilingual content model: catalog sections, home sections and static pages,
//! plus the read-time normalizer, the section type registry and the save gate.

pub mod bilingual;
pub mod catalog;
pub mod home;
pub mod lengths;
pub mod normalize;
pub mod page;
pub mod registry;
pub mod validate;

pub use bilingual::{BilingualText, Lang};
pub use catalog::{Article, CatalogField, CatalogSection, CatalogType, Variant};
pub use home::{HomeSection, SectionData, SectionType};
pub use normalize::{normalize_catalog, normalize_home, normalize_page, SchemaVersion};
pub use page::{PageField, PageSlug, StaticPage};
pub use validate::{validate_section, ValidationIssue};
