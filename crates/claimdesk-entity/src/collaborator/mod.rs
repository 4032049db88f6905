//! Case collaborator (presence join row) entities.

pub mod model;

pub use model::CaseCollaborator;
