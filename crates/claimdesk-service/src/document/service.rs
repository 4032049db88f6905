//! Document CRUD and AI-ranked semantic search.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use claimdesk_ai::search::CandidateDocument;
use claimdesk_ai::GatewayClient;
use claimdesk_core::error::AppError;
use claimdesk_core::events::{ChangeEvent, Table};
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{DocumentRepository, NewDocument};
use claimdesk_entity::document::{Document, DocumentStatus};
use claimdesk_realtime::ChangeFeedHub;

/// One search hit: the ranked explanation joined back to the full row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matching document.
    pub document: Document,
    /// Relevance in [0, 1].
    pub relevance_score: f64,
    /// Why the document matched.
    pub explanation: String,
}

/// The full search response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSearchResult {
    /// Ranked hits, best first.
    pub results: Vec<SearchHit>,
    /// Overall summary of the result set.
    pub summary: String,
}

/// Manages the document library and its AI-backed search.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document repository.
    doc_repo: Arc<DocumentRepository>,
    /// Gateway client used for search ranking.
    gateway: Arc<GatewayClient>,
    /// Change-feed hub for fan-out after writes.
    hub: Arc<ChangeFeedHub>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(
        doc_repo: Arc<DocumentRepository>,
        gateway: Arc<GatewayClient>,
        hub: Arc<ChangeFeedHub>,
    ) -> Self {
        Self {
            doc_repo,
            gateway,
            hub,
        }
    }

    /// Lists all documents, newest first.
    pub async fn list(&self) -> AppResult<Vec<Document>> {
        self.doc_repo.find_all().await
    }

    /// Fetches one document.
    pub async fn get(&self, document_id: Uuid) -> AppResult<Document> {
        self.doc_repo
            .find_by_id(document_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))
    }

    /// Registers an uploaded document (status starts as `pending`) and
    /// fans out the insert event.
    pub async fn create(&self, new_doc: NewDocument) -> AppResult<Document> {
        let document = self.doc_repo.create(&new_doc).await?;
        self.hub
            .publish(Table::Documents, ChangeEvent::inserted(&document)?);
        info!(document_id = %document.id, title = %document.title, "Document registered");
        Ok(document)
    }

    /// Advances the indexing status and fans out the update event.
    pub async fn set_status(
        &self,
        document_id: Uuid,
        status: DocumentStatus,
    ) -> AppResult<Document> {
        let document = self
            .doc_repo
            .set_status(document_id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Document {document_id} not found")))?;
        self.hub
            .publish(Table::Documents, ChangeEvent::updated(&document, document.id)?);
        Ok(document)
    }

    /// Deletes a document row and fans out the delete event.
    pub async fn delete(&self, document_id: Uuid) -> AppResult<()> {
        let document = self.get(document_id).await?;
        if !self.doc_repo.delete(document_id).await? {
            return Err(AppError::not_found(format!(
                "Document {document_id} not found"
            )));
        }
        self.hub
            .publish(Table::Documents, ChangeEvent::deleted(&document, document_id)?);
        info!(document_id = %document_id, "Document deleted");
        Ok(())
    }

    /// Semantic search over the whole library.
    ///
    /// The candidate list is the entire document table; the gateway ranks
    /// it and the ranked ids are joined back to full rows here. Hits whose
    /// document vanished between the fetch and the ranking are dropped.
    pub async fn search(&self, query: &str) -> AppResult<DocumentSearchResult> {
        let documents = self.doc_repo.find_all().await?;
        let candidates: Vec<CandidateDocument> = documents
            .iter()
            .map(|d| CandidateDocument {
                id: d.id,
                title: d.title.clone(),
                description: d.description.clone(),
                category: d.category.clone(),
                file_url: d.file_url.clone(),
            })
            .collect();

        let outcome = claimdesk_ai::search::rank(&self.gateway, query, &candidates).await?;

        let results = outcome
            .results
            .into_iter()
            .filter_map(|ranked| {
                documents
                    .iter()
                    .find(|d| d.id == ranked.id)
                    .map(|document| SearchHit {
                        document: document.clone(),
                        relevance_score: ranked.relevance_score,
                        explanation: ranked.explanation,
                    })
            })
            .collect();

        Ok(DocumentSearchResult {
            results,
            summary: outcome.summary,
        })
    }
}
