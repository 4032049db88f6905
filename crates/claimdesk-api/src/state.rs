//! Application state shared across all handlers.

use std::sync::Arc;

use sqlx::PgPool;

use claimdesk_ai::{DocQaClient, GatewayClient};
use claimdesk_core::config::AppConfig;
use claimdesk_core::result::AppResult;
use claimdesk_database::repositories::{
    AgentRepository, CaseHistoryRepository, CaseRepository, ChatRepository,
    CollaboratorRepository, DocumentRepository, KnowledgeRepository, NotificationRepository,
};
use claimdesk_realtime::ChangeFeedHub;
use claimdesk_service::{
    AgentService, CaseService, ChatService, CollaboratorService, DocumentService,
    KnowledgeService, NotificationService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool.
    pub db_pool: PgPool,
    /// Change-feed hub.
    pub hub: Arc<ChangeFeedHub>,
    /// AI gateway client.
    pub gateway: Arc<GatewayClient>,
    /// Document-QA client.
    pub docqa: Arc<DocQaClient>,
    /// Case service.
    pub case_service: Arc<CaseService>,
    /// Document service.
    pub document_service: Arc<DocumentService>,
    /// Notification service.
    pub notification_service: Arc<NotificationService>,
    /// Chat service.
    pub chat_service: Arc<ChatService>,
    /// Knowledge service.
    pub knowledge_service: Arc<KnowledgeService>,
    /// Agent service.
    pub agent_service: Arc<AgentService>,
    /// Collaborator service.
    pub collaborator_service: Arc<CollaboratorService>,
}

impl AppState {
    /// Wires repositories, services and AI clients from configuration and
    /// an established pool.
    pub fn new(config: AppConfig, db_pool: PgPool) -> AppResult<Self> {
        let hub = Arc::new(ChangeFeedHub::new(config.realtime.channel_buffer_size));

        let gateway = Arc::new(GatewayClient::new(config.ai.clone())?);
        let docqa = Arc::new(DocQaClient::new(
            config.ai.clone(),
            GatewayClient::new(config.ai.clone())?,
        )?);

        let case_repo = Arc::new(CaseRepository::new(db_pool.clone()));
        let history_repo = Arc::new(CaseHistoryRepository::new(db_pool.clone()));
        let document_repo = Arc::new(DocumentRepository::new(db_pool.clone()));
        let notification_repo = Arc::new(NotificationRepository::new(db_pool.clone()));
        let chat_repo = Arc::new(ChatRepository::new(db_pool.clone()));
        let knowledge_repo = Arc::new(KnowledgeRepository::new(db_pool.clone()));
        let agent_repo = Arc::new(AgentRepository::new(db_pool.clone()));
        let collaborator_repo = Arc::new(CollaboratorRepository::new(db_pool.clone()));

        let case_service = Arc::new(CaseService::new(
            case_repo.clone(),
            history_repo,
            hub.clone(),
        ));
        let document_service = Arc::new(DocumentService::new(
            document_repo,
            gateway.clone(),
            hub.clone(),
        ));
        let notification_service =
            Arc::new(NotificationService::new(notification_repo, hub.clone()));
        let chat_service = Arc::new(ChatService::new(
            chat_repo,
            case_repo,
            gateway.clone(),
            hub.clone(),
        ));
        let knowledge_service = Arc::new(KnowledgeService::new(knowledge_repo));
        let agent_service = Arc::new(AgentService::new(agent_repo, hub.clone()));
        let collaborator_service =
            Arc::new(CollaboratorService::new(collaborator_repo, hub.clone()));

        Ok(Self {
            config: Arc::new(config),
            db_pool,
            hub,
            gateway,
            docqa,
            case_service,
            document_service,
            notification_service,
            chat_service,
            knowledge_service,
            agent_service,
            collaborator_service,
        })
    }
}
