use crate::content::catalog::{CatalogField, CatalogSection};
use crate::content::lengths::format_lengths;
use crate::content::BilingualText;
use crate::editor::EditPhase;

fn pair(text: &BilingualText) -> String {
    format!("DE: {} | EN: {}", text.de, text.en)
}

pub fn summary_line(section: &CatalogSection, dirty: bool) -> String {
    format!(
        "{} {:<26} {:<30} [{}] variants: {}, articles: {}",
        if dirty { "*" } else { " " },
        section.id().unwrap_or("-"),
        crate::core::helpers::preview(&section.name.de, 30),
        section.catalog_type,
        section.variants.len(),
        section.articles.len()
    )
}

pub fn details(id: &str, section: &CatalogSection, phase: &EditPhase) -> String {
    let mut out = format!("Catalog {} [{}] ({})\n", id, section.catalog_type, phase);
    for field in CatalogField::ALL {
        out.push_str(&format!(
            "  {:<16} {}\n",
            field.key(),
            pair(section.text(field))
        ));
    }
    out.push_str(&format!("  {:<16} {}\n", "images.hero", section.images.hero));

    out.push_str(&format!("  Variants ({}):\n", section.variants.len()));
    for (i, v) in section.variants.iter().enumerate() {
        out.push_str(&format!(
            "    #{} diameter: {} color: {} hex: {}{} lengths: [{}]\n",
            i + 1,
            v.diameter,
            v.color,
            v.hex,
            if v.hex_is_valid() { "" } else { " (invalid)" },
            format_lengths(&v.lengths)
        ));
        if !v.box_image.is_empty() || !v.implant_image.is_empty() {
            out.push_str(&format!(
                "       boxImage: {} implantImage: {}\n",
                v.box_image, v.implant_image
            ));
        }
    }

    out.push_str(&format!("  Articles ({}):\n", section.articles.len()));
    for (i, a) in section.articles.iter().enumerate() {
        out.push_str(&format!(
            "    #{} {} {} / {}\n",
            i + 1,
            if a.art_nr.is_empty() { "-" } else { &a.art_nr },
            pair(&a.description),
            pair(&a.category)
        ));
    }
    out.trim_end().to_string()
}
