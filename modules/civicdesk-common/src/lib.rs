pub mod error;
pub mod events;
pub mod scoring;
pub mod types;

pub use error::CivicDeskError;
pub use events::{DomainEvent, EventKind};
pub use types::*;
