//! Case domain entities.

pub mod history;
pub mod model;

pub use history::CaseHistory;
pub use model::{Case, CasePriority, CaseStatus};
