//! Interview question and progress models.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One practice question from the interview service catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: String,
    pub category: String,
    pub difficulty: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub sample_answer: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub company_tags: Vec<String>,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Per-question practice progress for the authenticated user.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionProgress {
    pub question_id: String,
    /// Service-side status, e.g. "in_progress" or "completed"
    pub status: String,
    pub attempts: u32,
    #[serde(default)]
    pub last_attempt_date: Option<DateTime<Utc>>,
}

/// Optional catalog filters; all default to unfiltered.
#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub category: Option<String>,
    pub difficulty: Option<String>,
    pub tag: Option<String>,
    pub company: Option<String>,
    pub limit: Option<u32>,
}

impl QuestionFilter {
    /// Builds the query pairs the service expects, skipping unset filters.
    /// The service caps `limit` at 50.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(category) = &self.category {
            query.push(("category", category.clone()));
        }
        if let Some(difficulty) = &self.difficulty {
            query.push(("difficulty", difficulty.clone()));
        }
        if let Some(tag) = &self.tag {
            query.push(("tag", tag.clone()));
        }
        if let Some(company) = &self.company {
            query.push(("company", company.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.min(50).to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_deserializes_with_optional_fields_absent() {
        let body = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "category": "algorithms",
            "difficulty": "medium",
            "title": "Explain binary search",
            "description": "Walk through the algorithm and its complexity."
        }"#;
        let question: Question = serde_json::from_str(body).unwrap();
        assert_eq!(question.title, "Explain binary search");
        assert!(question.keywords.is_empty());
        assert_eq!(question.likes, 0);
        assert!(question.created_at.is_none());
    }

    #[test]
    fn filter_skips_unset_fields_and_caps_limit() {
        let filter = QuestionFilter {
            category: Some("algorithms".to_string()),
            limit: Some(500),
            ..Default::default()
        };
        let query = filter.to_query();
        assert_eq!(
            query,
            vec![
                ("category", "algorithms".to_string()),
                ("limit", "50".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filter_produces_no_query() {
        assert!(QuestionFilter::default().to_query().is_empty());
    }
}
