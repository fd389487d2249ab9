//! Typed portfolio content.
//!
//! Every section type implements [`Normalize`], which accepts arbitrary JSON
//! and produces a value of the fixed schema. Normalization never fails: bad
//! input degrades to empty strings, defaults, or dropped list entries.

mod career;
mod content;
mod profile;
mod sections;
mod showcase;

pub use career::{EducationEntry, ExperienceEntry, SkillGroup};
pub use content::PortfolioContent;
pub use profile::{HeroRoles, Profile};
pub use sections::{AboutCard, AboutContent, SectionSubtitles, SectionVisibility};
pub use showcase::{Certificate, Project, ProjectLinks};

use serde_json::Value;

/// Conversion from untrusted JSON into a schema type.
pub trait Normalize: Sized {
    /// Build `Self` from any JSON value.
    fn normalize(raw: &Value) -> Self;
}

/// List entries that may be dropped when they carry no identifying text.
pub trait Prunable {
    /// Whether the entry has enough content to be kept.
    fn is_meaningful(&self) -> bool {
        true
    }
}

/// Normalize a JSON array into a list of `T`, dropping meaningless entries.
///
/// Anything that is not an array normalizes to an empty list.
pub fn normalize_list<T: Normalize + Prunable>(raw: &Value) -> Vec<T> {
    match raw {
        Value::Array(items) => items
            .iter()
            .map(T::normalize)
            .filter(Prunable::is_meaningful)
            .collect(),
        _ => Vec::new(),
    }
}

impl<T: Normalize + Prunable> Normalize for Vec<T> {
    fn normalize(raw: &Value) -> Self {
        normalize_list(raw)
    }
}
