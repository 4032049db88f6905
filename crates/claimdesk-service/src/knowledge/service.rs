//! Knowledge-base browsing and query logging.

use std::sync::Arc;

use uuid::Uuid;

use claimdesk_core::error::AppError;
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::KnowledgeRepository;
use claimdesk_entity::knowledge::{KnowledgeArticle, KnowledgeQuery};

/// Manages knowledge articles and the query log.
#[derive(Debug, Clone)]
pub struct KnowledgeService {
    /// Knowledge repository.
    knowledge_repo: Arc<KnowledgeRepository>,
}

impl KnowledgeService {
    /// Creates a new knowledge service.
    pub fn new(knowledge_repo: Arc<KnowledgeRepository>) -> Self {
        Self { knowledge_repo }
    }

    /// Lists articles, optionally filtered by category. Featured articles
    /// sort first, then by view count.
    pub async fn list_articles(&self, category: Option<&str>) -> AppResult<Vec<KnowledgeArticle>> {
        self.knowledge_repo.find_articles(category).await
    }

    /// Reads one article, counting the view.
    pub async fn read_article(&self, article_id: Uuid) -> AppResult<KnowledgeArticle> {
        self.knowledge_repo
            .read_article(article_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Article {article_id} not found")))
    }

    /// Records a knowledge query and its response for later review.
    pub async fn log_query(
        &self,
        case_id: Option<Uuid>,
        query: &str,
        response: Option<&str>,
    ) -> AppResult<KnowledgeQuery> {
        self.knowledge_repo.log_query(case_id, query, response).await
    }

    /// Lists recent queries, newest first.
    pub async fn recent_queries(&self, limit: i64) -> AppResult<Vec<KnowledgeQuery>> {
        self.knowledge_repo.find_queries(limit).await
    }
}
