//! Knowledge-base repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use claimdesk_core::error::{AppError, ErrorKind};
use claimdesk_core::result::AppResult;
use claimdesk_entity::knowledge::{KnowledgeArticle, KnowledgeQuery};

/// Repository for knowledge articles and the query history log.
#[derive(Debug, Clone)]
pub struct KnowledgeRepository {
    pool: PgPool,
}

impl KnowledgeRepository {
    /// Create a new knowledge repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List articles, featured first, then most viewed.
    pub async fn find_articles(&self, category: Option<&str>) -> AppResult<Vec<KnowledgeArticle>> {
        sqlx::query_as::<_, KnowledgeArticle>(
            "SELECT * FROM knowledge_articles \
             WHERE $1::TEXT IS NULL OR category = $1 \
             ORDER BY is_featured DESC, views DESC",
        )
        .bind(category)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list articles", e))
    }

    /// Find an article by id, incrementing its view count.
    pub async fn read_article(&self, article_id: Uuid) -> AppResult<Option<KnowledgeArticle>> {
        sqlx::query_as::<_, KnowledgeArticle>(
            "UPDATE knowledge_articles SET views = views + 1 WHERE id = $1 RETURNING *",
        )
        .bind(article_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read article", e))
    }

    /// Log a knowledge query with its response.
    pub async fn log_query(
        &self,
        case_id: Option<Uuid>,
        query: &str,
        response: Option<&str>,
    ) -> AppResult<KnowledgeQuery> {
        sqlx::query_as::<_, KnowledgeQuery>(
            "INSERT INTO knowledge_queries (case_id, query, response) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(case_id)
        .bind(query)
        .bind(response)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to log query", e))
    }

    /// List recent queries, newest first.
    pub async fn find_queries(&self, limit: i64) -> AppResult<Vec<KnowledgeQuery>> {
        sqlx::query_as::<_, KnowledgeQuery>(
            "SELECT * FROM knowledge_queries ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list queries", e))
    }
}
