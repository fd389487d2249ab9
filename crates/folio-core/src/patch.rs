//! Sanitizing editor patches before they reach storage.
//!
//! A patch is a partial content document: only the sections present in the
//! request are replaced. Every present section is normalized into its fixed
//! schema, unknown keys are dropped, and the resume upload is validated.

use serde::Serialize;
use serde_json::Value;

use crate::model::{
    AboutContent, Certificate, EducationEntry, ExperienceEntry, HeroRoles, Normalize, Profile,
    Project, SectionSubtitles, SectionVisibility, SkillGroup,
};
use crate::value::{Document, clean_text};
use crate::{Error, Result};

/// Largest accepted resume data URL, in UTF-16 code units (JavaScript
/// string length, which the editor measures against).
pub const MAX_RESUME_DATA_URL_LEN: usize = 8_000_000;

/// Required prefix for an uploaded resume.
pub const RESUME_DATA_URL_PREFIX: &str = "data:application/pdf;base64,";

// ============================================================================
// Section keys
// ============================================================================

/// A top-level key of the content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `profile`
    Profile,
    /// `heroRoles`
    HeroRoles,
    /// `about`
    About,
    /// `skillGroups`
    SkillGroups,
    /// `experience`
    Experience,
    /// `education`
    Education,
    /// `projects`
    Projects,
    /// `certifications`
    Certifications,
    /// `sectionVisibility`
    SectionVisibility,
    /// `sectionSubtitles`
    SectionSubtitles,
    /// `resumeDataUrl`
    ResumeDataUrl,
}

impl Section {
    /// All sections, in the order they appear on the page.
    pub const ALL: [Section; 11] = [
        Section::Profile,
        Section::HeroRoles,
        Section::About,
        Section::SkillGroups,
        Section::Experience,
        Section::Education,
        Section::Projects,
        Section::Certifications,
        Section::SectionVisibility,
        Section::SectionSubtitles,
        Section::ResumeDataUrl,
    ];

    /// The JSON key used for this section.
    pub fn key(self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::HeroRoles => "heroRoles",
            Section::About => "about",
            Section::SkillGroups => "skillGroups",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Certifications => "certifications",
            Section::SectionVisibility => "sectionVisibility",
            Section::SectionSubtitles => "sectionSubtitles",
            Section::ResumeDataUrl => "resumeDataUrl",
        }
    }

    /// Look up a section by its JSON key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.key() == key)
    }

    /// Normalize a raw value for this section into its stored JSON form.
    pub fn sanitize(self, raw: &Value) -> Result<Value> {
        match self {
            Section::Profile => to_json(Profile::normalize(raw)),
            Section::HeroRoles => to_json(HeroRoles::normalize(raw)),
            Section::About => to_json(AboutContent::normalize(raw)),
            Section::SkillGroups => to_json(Vec::<SkillGroup>::normalize(raw)),
            Section::Experience => to_json(Vec::<ExperienceEntry>::normalize(raw)),
            Section::Education => to_json(Vec::<EducationEntry>::normalize(raw)),
            Section::Projects => to_json(Vec::<Project>::normalize(raw)),
            Section::Certifications => to_json(Vec::<Certificate>::normalize(raw)),
            Section::SectionVisibility => to_json(SectionVisibility::normalize(raw)),
            Section::SectionSubtitles => to_json(SectionSubtitles::normalize(raw)),
            Section::ResumeDataUrl => sanitize_resume_data_url(raw).map(Value::String),
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

// ============================================================================
// Patch operations
// ============================================================================

/// Validate an uploaded resume.
///
/// Blank or non-string input clears the resume and yields `""`.
pub fn sanitize_resume_data_url(value: &Value) -> Result<String> {
    let text = clean_text(value);
    if text.is_empty() {
        return Ok(text);
    }
    // UTF-16 length never exceeds the byte length, so short inputs skip the count.
    if text.len() > MAX_RESUME_DATA_URL_LEN
        && text.encode_utf16().count() > MAX_RESUME_DATA_URL_LEN
    {
        return Err(Error::validation_field(
            Section::ResumeDataUrl.key(),
            "Resume file is too large for server storage.",
        ));
    }
    if !text.starts_with(RESUME_DATA_URL_PREFIX) {
        return Err(Error::validation_field(
            Section::ResumeDataUrl.key(),
            "Resume must be a PDF data URL.",
        ));
    }
    Ok(text)
}

/// Turn an arbitrary request body into a sanitized patch.
///
/// Only keys present in `input` appear in the result. Input that is not a
/// JSON object produces an empty patch.
pub fn sanitize_patch(input: &Value) -> Result<Document> {
    let mut patch = Document::new();
    let Value::Object(source) = input else {
        return Ok(patch);
    };

    for section in Section::ALL {
        if let Some(raw) = source.get(section.key()) {
            patch.insert(section.key().to_string(), section.sanitize(raw)?);
        }
    }

    let dropped = source
        .keys()
        .filter(|key| Section::from_key(key).is_none())
        .count();
    if dropped > 0 {
        log::debug!("Dropped {dropped} unknown key(s) from content patch");
    }

    Ok(patch)
}

/// Shallow merge: each key in `patch` replaces the same key in `current`.
///
/// Keys of `current` that the patch does not mention are kept untouched,
/// including keys this version of the schema does not know about.
pub fn merge(mut current: Document, patch: Document) -> Document {
    current.extend(patch);
    current
}
