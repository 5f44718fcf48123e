//! Issue lifecycle and in-memory indexing engine for municipal issue
//! reporting.
//!
//! Citizens submit issues and earn points and badges; staff move issues
//! through a forward-only status state machine. The engine owns the
//! canonical issue collection, keeps four secondary indexes consistent
//! with it, derives per-user gamification state deterministically from
//! submission history, and fans out domain events to registered
//! observers. All state is in process memory; persistence, HTTP, auth,
//! and attachment storage are external collaborators.

pub mod coordinator;
pub mod dispatch;
pub mod gamify;
pub mod index;
pub mod rank;
pub mod store;

pub use coordinator::CivicDesk;
pub use dispatch::NotificationDispatcher;
pub use index::{default_zone_classifier, SecondaryIndexes, ZoneClassifier};
pub use rank::IssueSortKey;
pub use store::IssueStore;
