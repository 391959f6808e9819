use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Social platform name → URL. Serialized with keys in sorted order.
pub type SocialLinks = BTreeMap<String, String>;

/// The portfolio owner. At most one row exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i32,
    pub name: String,
    pub headline: String,
    pub about: String,
    pub location: String,
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: i32,
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: i32,
    pub school: String,
    pub degree: String,
    pub duration: String,
    pub description: String,
}

/// A skill category and its ordered items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: i32,
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub github_link: Option<String>,
    pub link: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Insert shapes: every field except the storage-assigned id
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub name: String,
    pub headline: String,
    pub about: String,
    pub location: String,
    #[serde(default)]
    pub social_links: SocialLinks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExperience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEducation {
    pub school: String,
    pub degree: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSkill {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub github_link: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_serializes_with_camel_case_keys() {
        let project = Project {
            id: 7,
            title: "Real-time Data Pipeline".to_string(),
            description: "ETL".to_string(),
            tech_stack: vec!["Apache Spark".to_string(), "Kafka".to_string()],
            github_link: Some("#".to_string()),
            link: None,
        };

        let value = serde_json::to_value(&project).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 7,
                "title": "Real-time Data Pipeline",
                "description": "ETL",
                "techStack": ["Apache Spark", "Kafka"],
                "githubLink": "#",
                "link": null
            })
        );
    }

    #[test]
    fn profile_social_links_serialize_as_object() {
        let mut social_links = SocialLinks::new();
        social_links.insert("github".to_string(), "https://github.com/x".to_string());
        social_links.insert("email".to_string(), "x@example.com".to_string());
        let profile = Profile {
            id: 1,
            name: "Ada".to_string(),
            headline: "Engineer".to_string(),
            about: "Bio".to_string(),
            location: "London".to_string(),
            social_links,
        };

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["socialLinks"]["github"], "https://github.com/x");
        assert_eq!(value["socialLinks"]["email"], "x@example.com");
        assert!(value.get("social_links").is_none());
    }

    #[test]
    fn new_project_links_are_optional() {
        let project: NewProject = serde_json::from_value(json!({
            "title": "CDP Module",
            "description": "Unified customer profiles",
            "techStack": ["Java", "SQL"]
        }))
        .unwrap();

        assert_eq!(project.github_link, None);
        assert_eq!(project.link, None);
        assert_eq!(project.tech_stack, vec!["Java", "SQL"]);
    }

    #[test]
    fn new_profile_defaults_to_no_social_links() {
        let profile: NewProfile = serde_json::from_value(json!({
            "name": "Ada",
            "headline": "Engineer",
            "about": "Bio",
            "location": "London"
        }))
        .unwrap();
        assert!(profile.social_links.is_empty());
    }
}
