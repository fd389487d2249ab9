//! Reading stored documents back into [`PortfolioContent`].
//!
//! Stored documents may predate the current schema or have been edited by
//! hand, so every section is re-normalized on the way out. A section is only
//! surfaced when its stored value has a plausible shape.

use serde_json::Value;

use crate::model::{
    AboutContent, HeroRoles, Normalize, PortfolioContent, Profile, SectionSubtitles,
    SectionVisibility, normalize_list,
};
use crate::patch::Section;
use crate::value::{Document, clean_text, is_object_like, truthy};

/// Normalize a raw stored document for the API.
pub fn normalize_stored(document: &Document) -> PortfolioContent {
    let get = |section: Section| document.get(section.key());
    let object = |section: Section| get(section).filter(|v| is_object_like(v));
    let array = |section: Section| get(section).filter(|v| v.is_array());

    PortfolioContent {
        profile: object(Section::Profile).map(Profile::normalize),
        hero_roles: get(Section::HeroRoles)
            .filter(|v| truthy(v))
            .map(HeroRoles::normalize),
        about: object(Section::About).map(AboutContent::normalize),
        skill_groups: array(Section::SkillGroups).map(normalize_list),
        experience: array(Section::Experience).map(normalize_list),
        education: array(Section::Education).map(normalize_list),
        projects: array(Section::Projects).map(normalize_list),
        certifications: array(Section::Certifications).map(normalize_list),
        section_visibility: object(Section::SectionVisibility).map(SectionVisibility::normalize),
        section_subtitles: object(Section::SectionSubtitles).map(SectionSubtitles::normalize),
        resume_data_url: get(Section::ResumeDataUrl)
            .filter(|v| v.is_string())
            .map(clean_text)
            .filter(|s| !s.is_empty()),
    }
}

impl From<&Document> for PortfolioContent {
    fn from(document: &Document) -> Self {
        normalize_stored(document)
    }
}

/// Coerce a stored column value into a document.
///
/// Objects are used as-is; strings are parsed as JSON. Anything else, or a
/// string that does not hold an object, yields an empty document.
pub fn document_from_stored(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(Value::Object(map)) => map,
            _ => Document::new(),
        },
        _ => Document::new(),
    }
}
