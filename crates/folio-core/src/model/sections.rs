//! About block and per-section display settings.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Normalize, Prunable, normalize_list};
use crate::value::{field_text, truthy};

/// One highlight card under the about paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutCard {
    /// Card heading.
    pub title: String,
    /// Card text.
    pub body: String,
}

impl Normalize for AboutCard {
    fn normalize(raw: &Value) -> Self {
        Self {
            title: field_text(raw, "title"),
            body: field_text(raw, "body"),
        }
    }
}

impl Prunable for AboutCard {
    fn is_meaningful(&self) -> bool {
        !self.title.is_empty() || !self.body.is_empty()
    }
}

/// The about section: a paragraph and a list of cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutContent {
    /// Intro paragraph.
    pub paragraph: String,
    /// Highlight cards, blank ones dropped.
    pub cards: Vec<AboutCard>,
}

impl Normalize for AboutContent {
    fn normalize(raw: &Value) -> Self {
        Self {
            paragraph: field_text(raw, "paragraph"),
            cards: raw.get("cards").map(normalize_list).unwrap_or_default(),
        }
    }
}

/// Which page sections are rendered. Every section is shown unless switched off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SectionVisibility {
    pub projects: bool,
    pub skills: bool,
    pub about: bool,
    pub experience: bool,
    pub education: bool,
    pub certifications: bool,
    pub contact: bool,
}

impl Default for SectionVisibility {
    fn default() -> Self {
        Self {
            projects: true,
            skills: true,
            about: true,
            experience: true,
            education: true,
            certifications: true,
            contact: true,
        }
    }
}

impl Normalize for SectionVisibility {
    fn normalize(raw: &Value) -> Self {
        // A present key is coerced with JS truthiness, so `0` and `""` hide a section.
        let flag = |key: &str| raw.get(key).is_none_or(truthy);
        Self {
            projects: flag("projects"),
            skills: flag("skills"),
            about: flag("about"),
            experience: flag("experience"),
            education: flag("education"),
            certifications: flag("certifications"),
            contact: flag("contact"),
        }
    }
}

/// Optional subtitle text under each section heading.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct SectionSubtitles {
    pub projects: String,
    /// Subtitle of the expanded "all projects" view.
    pub projects_all: String,
    pub skills: String,
    pub about: String,
    pub experience: String,
    pub education: String,
    pub certifications: String,
    pub contact: String,
}

impl Normalize for SectionSubtitles {
    fn normalize(raw: &Value) -> Self {
        Self {
            projects: field_text(raw, "projects"),
            projects_all: field_text(raw, "projectsAll"),
            skills: field_text(raw, "skills"),
            about: field_text(raw, "about"),
            experience: field_text(raw, "experience"),
            education: field_text(raw, "education"),
            certifications: field_text(raw, "certifications"),
            contact: field_text(raw, "contact"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_about_drops_empty_cards() {
        let about = AboutContent::normalize(&json!({
            "paragraph": "  I build things. ",
            "cards": [
                {"title": "Modeling", "body": ""},
                {"title": " ", "body": " "},
                "not a card",
                {"body": "Deploy"}
            ]
        }));
        assert_eq!(about.paragraph, "I build things.");
        assert_eq!(about.cards.len(), 2);
        assert_eq!(about.cards[0].title, "Modeling");
        assert_eq!(about.cards[1].body, "Deploy");
    }

    #[test]
    fn test_about_cards_not_array() {
        let about = AboutContent::normalize(&json!({"cards": {"title": "x"}}));
        assert!(about.cards.is_empty());
    }

    #[test]
    fn test_visibility_missing_keys_default_true() {
        assert_eq!(
            SectionVisibility::normalize(&json!({})),
            SectionVisibility::default()
        );
        assert_eq!(
            SectionVisibility::normalize(&json!(null)),
            SectionVisibility::default()
        );
    }

    #[test]
    fn test_visibility_truthiness() {
        let vis = SectionVisibility::normalize(&json!({
            "projects": false,
            "skills": 0,
            "about": "",
            "experience": null,
            "education": "no",
            "certifications": 1
        }));
        assert!(!vis.projects);
        assert!(!vis.skills);
        assert!(!vis.about);
        assert!(!vis.experience);
        assert!(vis.education);
        assert!(vis.certifications);
        assert!(vis.contact);
    }

    #[test]
    fn test_subtitles_non_strings_become_empty() {
        let subs = SectionSubtitles::normalize(&json!({
            "projects": "  Selected work ",
            "projectsAll": "Everything",
            "skills": 5,
            "contact": null
        }));
        assert_eq!(subs.projects, "Selected work");
        assert_eq!(subs.projects_all, "Everything");
        assert_eq!(subs.skills, "");
        assert_eq!(subs.contact, "");
    }

    #[test]
    fn test_subtitles_serialize_projects_all() {
        let value = serde_json::to_value(SectionSubtitles::default()).unwrap();
        assert!(value.get("projectsAll").is_some());
    }
}
