use serde::{Deserialize, Serialize};

use super::{
    AboutContent, Certificate, EducationEntry, ExperienceEntry, HeroRoles, Profile, Project,
    SectionSubtitles, SectionVisibility, SkillGroup,
};

/// Everything the site renders, as returned by the content API.
///
/// Sections the owner has never saved are `None` and omitted from JSON, so
/// the front end can fall back to its bundled defaults section by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hero_roles: Option<HeroRoles>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_groups: Option<Vec<SkillGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<Vec<ExperienceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<EducationEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Vec<Certificate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_visibility: Option<SectionVisibility>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_subtitles: Option<SectionSubtitles>,
    /// Uploaded resume as a `data:application/pdf;base64,` URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_data_url: Option<String>,
}

impl PortfolioContent {
    /// True when no section has been stored yet.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_content_serializes_to_empty_object() {
        let content = PortfolioContent::default();
        assert!(content.is_empty());
        assert_eq!(serde_json::to_value(&content).unwrap(), json!({}));
    }

    #[test]
    fn test_present_sections_use_camel_case_keys() {
        let content = PortfolioContent {
            hero_roles: Some(HeroRoles(vec!["AI Engineer".into()])),
            section_visibility: Some(SectionVisibility::default()),
            ..Default::default()
        };
        let value = serde_json::to_value(&content).unwrap();
        assert_eq!(value["heroRoles"], json!(["AI Engineer"]));
        assert_eq!(value["sectionVisibility"]["contact"], true);
        assert!(value.get("profile").is_none());
        assert!(!content.is_empty());
    }
}
