//! Knowledge-base article and query-log entity models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A curated knowledge-base article.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KnowledgeArticle {
    /// Unique article identifier.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Article body, if authored in-app.
    pub content: Option<String>,
    /// Top-level category.
    pub category: String,
    /// Optional subcategory.
    pub subcategory: Option<String>,
    /// Source document URL, if the article references one.
    pub document_url: Option<String>,
    /// Page reference within the source document.
    pub page_reference: Option<i32>,
    /// Section reference within the source document.
    pub section_reference: Option<String>,
    /// Whether the article is featured on the landing view.
    pub is_featured: bool,
    /// Reader rating.
    pub rating: Option<f64>,
    /// View count.
    pub views: i64,
    /// When the article was created.
    pub created_at: DateTime<Utc>,
    /// When the article was last modified.
    pub updated_at: DateTime<Utc>,
}

/// One entry in the knowledge query history log.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct KnowledgeQuery {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The case the query was asked from, if any.
    pub case_id: Option<Uuid>,
    /// The question asked.
    pub query: String,
    /// The assistant's answer, if one was produced.
    pub response: Option<String>,
    /// When the query was logged.
    pub created_at: DateTime<Utc>,
}
