//! Template registry and metadata

use serde::Serialize;

use super::embedded;

/// One downloadable template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Display name, e.g. "Mutual NDA (Standard)"
    pub name: &'static str,
    /// URL-safe identifier used by the download route
    pub slug: &'static str,
    /// Short description for listings
    pub description: &'static str,
    /// Literal template text
    #[serde(skip)]
    pub text: &'static str,
}

impl TemplateEntry {
    /// Download file name: spaces replaced by underscores, `.txt` appended
    pub fn file_name(&self) -> String {
        format!("{}.txt", self.name.replace(' ', "_"))
    }
}

static TEMPLATES: [TemplateEntry; 3] = [
    TemplateEntry {
        name: "Mutual NDA (Standard)",
        slug: "mutual-nda",
        description: "Two-way confidentiality agreement, two-year term, Indian jurisdiction",
        text: embedded::MUTUAL_NDA,
    },
    TemplateEntry {
        name: "Service Agreement (SME)",
        slug: "service-agreement",
        description: "Master service agreement with payment, IP and liability terms",
        text: embedded::SERVICE_AGREEMENT,
    },
    TemplateEntry {
        name: "Employment Offer Letter",
        slug: "offer-letter",
        description: "Offer letter covering CTC, probation and notice periods",
        text: embedded::OFFER_LETTER,
    },
];

/// List all templates in display order
pub fn list_templates() -> &'static [TemplateEntry] {
    &TEMPLATES
}

/// Look up a template by display name
pub fn get_template(name: &str) -> Option<&'static TemplateEntry> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Look up a template by slug
pub fn get_template_by_slug(slug: &str) -> Option<&'static TemplateEntry> {
    TEMPLATES.iter().find(|t| t.slug == slug)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: repeated lookups always return identical bytes
        #[test]
        fn lookups_are_stable(index in 0usize..3, repeats in 1usize..20) {
            let entry = list_templates()[index];
            let first = get_template_by_slug(entry.slug).unwrap().text.as_bytes().to_vec();
            for _ in 0..repeats {
                let again = get_template_by_slug(entry.slug).unwrap().text.as_bytes();
                prop_assert_eq!(again, first.as_slice());
            }
        }

        /// Property: random slugs never resolve
        #[test]
        fn unknown_slugs_not_found(slug in "[a-z]{3,12}") {
            prop_assert!(get_template_by_slug(&slug).is_none());
        }
    }
}
