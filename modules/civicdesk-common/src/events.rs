//! Domain events — facts about what happened to issues and users.
//!
//! Created by the lifecycle coordinator, consumed by dispatcher
//! subscribers (notification feeds, UI collaborators). Never persisted
//! by the engine itself. The `type` tag makes the serialized form
//! self-describing for feed collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{BadgeId, Category, Priority, Status};

/// A fact about the issue lifecycle. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    IssueSubmitted {
        issue_id: Uuid,
        user_id: String,
        category: Category,
        priority: Priority,
        at: DateTime<Utc>,
    },

    IssueStatusChanged {
        issue_id: Uuid,
        from: Status,
        to: Status,
        at: DateTime<Utc>,
    },

    BadgeEarned {
        user_id: String,
        badge: BadgeId,
        at: DateTime<Utc>,
    },

    IssueResolved {
        issue_id: Uuid,
        user_id: String,
        at: DateTime<Utc>,
    },
}

/// Discriminant used for subscription routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    IssueSubmitted,
    IssueStatusChanged,
    BadgeEarned,
    IssueResolved,
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::IssueSubmitted { .. } => EventKind::IssueSubmitted,
            DomainEvent::IssueStatusChanged { .. } => EventKind::IssueStatusChanged,
            DomainEvent::BadgeEarned { .. } => EventKind::BadgeEarned,
            DomainEvent::IssueResolved { .. } => EventKind::IssueResolved,
        }
    }

    /// Timestamp of the fact, regardless of variant.
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::IssueSubmitted { at, .. }
            | DomainEvent::IssueStatusChanged { at, .. }
            | DomainEvent::BadgeEarned { at, .. }
            | DomainEvent::IssueResolved { at, .. } => *at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        let e = DomainEvent::IssueResolved {
            issue_id: Uuid::new_v4(),
            user_id: "u1".into(),
            at: Utc::now(),
        };
        assert_eq!(e.kind(), EventKind::IssueResolved);
    }

    #[test]
    fn serializes_with_snake_case_tag() {
        let e = DomainEvent::BadgeEarned {
            user_id: "u1".into(),
            badge: BadgeId::FirstReport,
            at: Utc::now(),
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "badge_earned");
        assert_eq!(v["badge"], "first_report");
    }
}
