//! Owner profile and hero roles.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Normalize;
use crate::value::{clean_list, field_text, field_text_or};

/// Placeholder link used when the owner has not provided a URL.
pub const PLACEHOLDER_LINK: &str = "#";

/// The owner's headline identity and contact links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Headline role, e.g. "Data Scientist".
    pub role: String,
    /// One-line pitch under the name.
    pub tagline: String,
    /// City or region.
    pub location: String,
    /// Contact address. Rendered as a `mailto:` link.
    pub email: String,
    /// GitHub profile URL, `#` when unset.
    pub github: String,
    /// LinkedIn profile URL, `#` when unset.
    pub linkedin: String,
    /// Link to the resume file or data URL.
    pub resume_url: String,
}

impl Normalize for Profile {
    fn normalize(raw: &Value) -> Self {
        Self {
            name: field_text(raw, "name"),
            role: field_text(raw, "role"),
            tagline: field_text(raw, "tagline"),
            location: field_text(raw, "location"),
            email: field_text(raw, "email"),
            github: field_text_or(raw, "github", PLACEHOLDER_LINK),
            linkedin: field_text_or(raw, "linkedin", PLACEHOLDER_LINK),
            resume_url: field_text_or(raw, "resumeUrl", PLACEHOLDER_LINK),
        }
    }
}

/// Rotating role titles shown in the hero banner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeroRoles(pub Vec<String>);

impl Normalize for HeroRoles {
    fn normalize(raw: &Value) -> Self {
        Self(clean_list(raw))
    }
}
