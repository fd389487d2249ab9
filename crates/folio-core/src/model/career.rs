//! Skills, work history and education.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Normalize, Prunable};
use crate::value::{field_list, field_text};

/// A titled group of skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    /// Group heading.
    pub title: String,
    /// Short description under the heading.
    pub blurb: String,
    /// Individual skills, in display order.
    pub items: Vec<String>,
}

impl Normalize for SkillGroup {
    fn normalize(raw: &Value) -> Self {
        Self {
            title: field_text(raw, "title"),
            blurb: field_text(raw, "blurb"),
            items: field_list(raw, "items"),
        }
    }
}

impl Prunable for SkillGroup {
    fn is_meaningful(&self) -> bool {
        !self.title.is_empty() || !self.items.is_empty()
    }
}

/// One position in the experience timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    /// Employer.
    pub company: String,
    /// Job title.
    pub role: String,
    /// Free-form date range, e.g. "2021 - 2023".
    pub period: String,
    /// Location.
    pub location: String,
    /// Achievement lines.
    pub bullets: Vec<String>,
}

impl Normalize for ExperienceEntry {
    fn normalize(raw: &Value) -> Self {
        Self {
            company: field_text(raw, "company"),
            role: field_text(raw, "role"),
            period: field_text(raw, "period"),
            location: field_text(raw, "location"),
            bullets: field_list(raw, "bullets"),
        }
    }
}

impl Prunable for ExperienceEntry {
    fn is_meaningful(&self) -> bool {
        !self.company.is_empty() || !self.role.is_empty()
    }
}

/// One school, degree or course.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    /// School or provider name.
    pub school: String,
    /// Degree or course name.
    pub degree: String,
    /// Date range.
    pub period: String,
    /// Free-form notes.
    pub details: String,
    /// Short badge such as "Degree" or "Certificate".
    pub type_label: String,
    /// Location.
    pub location: String,
    /// Logo or crest image.
    pub image_url: String,
    /// Alt text for `image_url`.
    pub image_alt: String,
}

impl Normalize for EducationEntry {
    fn normalize(raw: &Value) -> Self {
        Self {
            school: field_text(raw, "school"),
            degree: field_text(raw, "degree"),
            period: field_text(raw, "period"),
            details: field_text(raw, "details"),
            type_label: field_text(raw, "typeLabel"),
            location: field_text(raw, "location"),
            image_url: field_text(raw, "imageUrl"),
            image_alt: field_text(raw, "imageAlt"),
        }
    }
}

impl Prunable for EducationEntry {
    fn is_meaningful(&self) -> bool {
        !self.school.is_empty() || !self.degree.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::normalize_list;
    use serde_json::json;

    #[test]
    fn test_skill_groups_keep_untitled_with_items() {
        let groups: Vec<SkillGroup> = normalize_list(&json!([
            {"title": "", "items": "Rust, Go"},
            {"title": "", "items": []},
            {"title": "Data", "blurb": " SQL first "}
        ]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].items, vec!["Rust", "Go"]);
        assert_eq!(groups[1].title, "Data");
        assert_eq!(groups[1].blurb, "SQL first");
    }

    #[test]
    fn test_experience_requires_company_or_role() {
        let entries: Vec<ExperienceEntry> = normalize_list(&json!([
            {"period": "2024", "bullets": ["shipped"]},
            {"role": "ML Engineer", "bullets": "Trained models, Deployed APIs"}
        ]));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, "ML Engineer");
        assert_eq!(entries[0].bullets.len(), 2);
    }

    #[test]
    fn test_education_camel_case_fields() {
        let entries: Vec<EducationEntry> = normalize_list(&json!([
            {"school": "My Own School", "typeLabel": "Degree", "imageUrl": "/a.jpg", "imageAlt": "crest"}
        ]));
        let value = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(value["typeLabel"], "Degree");
        assert_eq!(value["imageUrl"], "/a.jpg");
        assert_eq!(value["imageAlt"], "crest");
    }

    #[test]
    fn test_education_drops_blank_entries() {
        let entries: Vec<EducationEntry> =
            normalize_list(&json!([{"details": "only details"}, null, 7]));
        assert!(entries.is_empty());
    }
}
