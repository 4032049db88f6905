//! Case entity model: the root aggregate of the claims workflow.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Workflow status of a claims case.
///
/// Transitions are deliberately unconstrained: any status may move to any
/// other (no server-side state machine; see DESIGN.md).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "case_status", rename_all = "snake_case")]
pub enum CaseStatus {
    /// Newly filed, not yet assigned.
    Open,
    /// Under active review by an agent.
    InReview,
    /// Waiting on external input.
    Pending,
    /// Claim approved.
    Approved,
    /// Claim denied.
    Denied,
}

impl CaseStatus {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InReview => "in_review",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

/// Triage priority of a case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "case_priority", rename_all = "snake_case")]
pub enum CasePriority {
    /// Routine handling.
    Low,
    /// Standard handling.
    Medium,
    /// Expedited handling.
    High,
}

impl CasePriority {
    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// An insurance claims case.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Case {
    /// Unique case identifier.
    pub id: Uuid,
    /// Name of the policy holder.
    pub customer_name: String,
    /// Policy number as printed on the policy document.
    pub policy_number: String,
    /// Claim type (e.g. "Auto", "Property", "General").
    pub claim_type: String,
    /// US state the claim was filed in.
    pub state: String,
    /// Claimed amount in dollars.
    pub claim_amount: f64,
    /// Date the incident occurred.
    pub date_of_incident: NaiveDate,
    /// Free-text description of the incident.
    pub description: Option<String>,
    /// Workflow status. Defaults to [`CaseStatus::Open`] on creation.
    pub status: CaseStatus,
    /// Triage priority.
    pub priority: CasePriority,
    /// Agent the case is assigned to, if any.
    pub assigned_to: Option<Uuid>,
    /// When the case was created.
    pub created_at: DateTime<Utc>,
    /// When the case was last modified.
    pub updated_at: DateTime<Utc>,
}
