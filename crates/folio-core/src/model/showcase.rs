//! Projects and certifications. Entries here are never pruned: the editor
//! adds blank templates and fills them in over several saves.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::profile::PLACEHOLDER_LINK;
use super::{Normalize, Prunable};
use crate::value::{field_list, field_text, field_text_or};

/// Project category used when none is given.
pub const DEFAULT_PROJECT_TYPE: &str = "Data";

/// Outbound links for a project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLinks {
    /// Live demo URL.
    pub demo: String,
    /// Source repository URL.
    pub repo: String,
}

impl Default for ProjectLinks {
    fn default() -> Self {
        Self {
            demo: PLACEHOLDER_LINK.to_string(),
            repo: PLACEHOLDER_LINK.to_string(),
        }
    }
}

impl Normalize for ProjectLinks {
    fn normalize(raw: &Value) -> Self {
        Self {
            demo: field_text_or(raw, "demo", PLACEHOLDER_LINK),
            repo: field_text_or(raw, "repo", PLACEHOLDER_LINK),
        }
    }
}

/// A portfolio project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Title.
    pub title: String,
    /// Category label, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Short description.
    pub blurb: String,
    /// Measured outcome, shown highlighted.
    pub impact: String,
    /// Technology tags.
    pub tags: Vec<String>,
    /// Demo and repository links.
    pub links: ProjectLinks,
}

impl Normalize for Project {
    fn normalize(raw: &Value) -> Self {
        Self {
            title: field_text(raw, "title"),
            kind: field_text_or(raw, "type", DEFAULT_PROJECT_TYPE),
            blurb: field_text(raw, "blurb"),
            impact: field_text(raw, "impact"),
            tags: field_list(raw, "tags"),
            links: raw
                .get("links")
                .map(ProjectLinks::normalize)
                .unwrap_or_default(),
        }
    }
}

impl Prunable for Project {}

/// A certification or course credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Title.
    pub title: String,
    /// Issuing organisation.
    pub issuer: String,
    /// Year awarded.
    pub year: String,
    /// Verification link, `#` when unset.
    pub credential_url: String,
}

impl Normalize for Certificate {
    fn normalize(raw: &Value) -> Self {
        Self {
            title: field_text(raw, "title"),
            issuer: field_text(raw, "issuer"),
            year: field_text(raw, "year"),
            credential_url: field_text_or(raw, "credentialUrl", PLACEHOLDER_LINK),
        }
    }
}

impl Prunable for Certificate {}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::normalize_list;
    use serde_json::json;

    #[test]
    fn test_project_defaults() {
        let project = Project::normalize(&json!({"title": "Churn Predictor"}));
        assert_eq!(project.kind, "Data");
        assert_eq!(project.links, ProjectLinks::default());
        assert!(project.tags.is_empty());
    }

    #[test]
    fn test_project_links_partial() {
        let project = Project::normalize(&json!({
            "links": {"demo": " https://demo ", "repo": 42}
        }));
        assert_eq!(project.links.demo, "https://demo");
        assert_eq!(project.links.repo, "#");
    }

    #[test]
    fn test_project_type_key_round_trips() {
        let project = Project::normalize(&json!({"type": "AI / ML", "tags": "Python, Streamlit"}));
        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(value["type"], "AI / ML");
        assert_eq!(value["tags"], json!(["Python", "Streamlit"]));
    }

    #[test]
    fn test_projects_never_pruned() {
        let projects: Vec<Project> = normalize_list(&json!([{}, null, "x"]));
        assert_eq!(projects.len(), 3);
        assert!(projects.iter().all(|p| p.title.is_empty()));
    }

    #[test]
    fn test_certificate_defaults() {
        let cert = Certificate::normalize(&json!({"title": "AWS", "year": 2024}));
        assert_eq!(cert.title, "AWS");
        assert_eq!(cert.year, "");
        assert_eq!(cert.credential_url, "#");
        let value = serde_json::to_value(&cert).unwrap();
        assert_eq!(value["credentialUrl"], "#");
    }
}
