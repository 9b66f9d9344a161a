//! Job posting and application models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One job posting aggregated by the interview service from external boards.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub salary_range: Option<String>,
    pub posting_url: String,
    /// Board the posting came from, e.g. "linkedin" or "indeed"
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub posted_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub experience_level: String,
}

/// One tracked job application for the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct JobApplication {
    pub id: String,
    pub job_id: String,
    /// Service-side status, e.g. "applied", "interviewing", "offer"
    pub status: String,
    #[serde(default)]
    pub applied_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Job search criteria. An empty filter means "no search": the personalized
/// recommendations endpoint applies instead.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    pub keywords: Vec<String>,
    pub location: Option<String>,
    pub experience_level: Option<String>,
    /// Recommendation count only; the search endpoint ignores it
    pub limit: Option<u32>,
}

impl JobFilter {
    /// True when no search criteria are set.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty() && self.location.is_none() && self.experience_level.is_none()
    }

    /// Builds the query pairs for the search endpoint; `keywords` repeats
    /// once per entry.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        for keyword in &self.keywords {
            query.push(("keywords", keyword.clone()));
        }
        if let Some(location) = &self.location {
            query.push(("location", location.clone()));
        }
        if let Some(experience_level) = &self.experience_level {
            query.push(("experience_level", experience_level.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posting_deserializes_with_optional_fields_absent() {
        let body = r#"{
            "id": "a1b2c3d4",
            "title": "Backend Engineer",
            "company": "Acme",
            "location": "Remote",
            "description": "Build services.",
            "posting_url": "https://jobs.example.com/a1b2c3d4"
        }"#;
        let posting: JobPosting = serde_json::from_str(body).unwrap();
        assert_eq!(posting.title, "Backend Engineer");
        assert!(posting.requirements.is_empty());
        assert!(posting.salary_range.is_none());
        assert!(posting.experience_level.is_empty());
        assert!(posting.posted_date.is_none());
    }

    #[test]
    fn search_query_repeats_keywords() {
        let filter = JobFilter {
            keywords: vec!["rust".to_string(), "backend".to_string()],
            location: Some("Berlin".to_string()),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("keywords", "rust".to_string()),
                ("keywords", "backend".to_string()),
                ("location", "Berlin".to_string()),
            ]
        );
    }

    #[test]
    fn limit_alone_still_means_recommendations() {
        let filter = JobFilter {
            limit: Some(20),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.to_query().is_empty());
    }
}
