use thiserror::Error;

#[derive(Error, Debug)]
pub enum CivicDeskError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Issue not found: {0}")]
    NotFound(uuid::Uuid),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: crate::types::Status,
        to: crate::types::Status,
    },

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
