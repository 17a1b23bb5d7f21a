//! The tracked companies.

use std::collections::BTreeSet;

use crate::core::IsError;

/// A tracked company, identified by the slug used in its page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub slug: String,
    pub name: String,
}

impl Company {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
        }
    }
}

const DEFAULT_COMPANIES: &[(&str, &str)] = &[
    ("afry-ab", "AFRY AB"),
    ("academedia-ab", "AcadeMedia AB"),
    ("akelius-residential-property-ab", "Akelius Residential Property AB"),
    ("byggmax-group-ab", "Byggmax Group AB"),
    ("bouvet-asa", "Bouvet ASA"),
    ("bravida-holding-ab", "Bravida Holding AB"),
    ("essity-ab-publ", "Essity AB"),
    ("scandic-hotels-group-ab", "Scandic Hotels Group AB"),
    ("rvrc-holding-ab", "RVRC Holding AB"),
    ("eqt-ab", "EQT AB"),
    ("inwido-ab-publ", "Inwido AB"),
    ("vbg-group-ab-publ", "VBG Group AB"),
];

/// The built-in company list, in processing order.
pub fn default_companies() -> Vec<Company> {
    DEFAULT_COMPANIES
        .iter()
        .map(|(slug, name)| Company::new(*slug, *name))
        .collect()
}

/// Pick the companies whose slug is in `slugs`, keeping the order of `all`.
///
/// # Errors
///
/// Returns [`IsError::Config`] listing every slug that is not tracked.
pub fn select(all: &[Company], slugs: &[String]) -> Result<Vec<Company>, IsError> {
    let wanted: BTreeSet<&str> = slugs.iter().map(String::as_str).collect();
    let unknown: Vec<&str> = wanted
        .iter()
        .copied()
        .filter(|s| !all.iter().any(|c| c.slug == *s))
        .collect();
    if !unknown.is_empty() {
        return Err(IsError::Config(format!(
            "Unknown company slugs: {}",
            unknown.join(", ")
        )));
    }
    Ok(all
        .iter()
        .filter(|c| wanted.contains(c.slug.as_str()))
        .cloned()
        .collect())
}
