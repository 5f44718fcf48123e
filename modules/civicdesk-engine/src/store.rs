//! IssueStore — the canonical issue collection.
//!
//! Owns identity assignment and nothing else: no indexing, no
//! notification, no derived state. Those concerns are composed by the
//! coordinator, which also owns the lock — the store itself is a plain
//! single-threaded container.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use civicdesk_common::{CivicDeskError, Issue, IssueDraft, Status};

/// Canonical issue collection. The single source of truth for issue
/// records; ids are assigned here and never reused.
#[derive(Debug, Default)]
pub struct IssueStore {
    issues: HashMap<Uuid, Issue>,
}

impl IssueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a draft and store it as a fresh Open issue.
    ///
    /// `points_awarded` starts at zero; the coordinator computes the real
    /// value immediately after creation and writes it back through
    /// [`IssueStore::update`] — the one sanctioned use of `update` outside
    /// status transitions.
    pub fn create(&mut self, draft: IssueDraft, now: DateTime<Utc>) -> Result<Uuid, CivicDeskError> {
        if draft.title.trim().is_empty() {
            return Err(CivicDeskError::Validation("title must not be empty".into()));
        }
        if draft.location.trim().is_empty() {
            return Err(CivicDeskError::Validation(
                "location must not be empty".into(),
            ));
        }
        if draft.submitted_by.trim().is_empty() {
            return Err(CivicDeskError::Validation(
                "submitting user must not be empty".into(),
            ));
        }

        let id = Uuid::new_v4();
        let issue = Issue {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            status: Status::Open,
            location: draft.location,
            submitted_by: draft.submitted_by,
            submitted_at: now,
            resolved_at: None,
            attachments: draft.attachments,
            points_awarded: 0,
        };
        self.issues.insert(id, issue);
        Ok(id)
    }

    pub fn get(&self, id: Uuid) -> Result<&Issue, CivicDeskError> {
        self.issues.get(&id).ok_or(CivicDeskError::NotFound(id))
    }

    /// Replace the stored record wholesale. Reserved for the coordinator's
    /// lifecycle paths; arbitrary callers go through the coordinator so
    /// creation-time invariants (fixed points, forward-only status) hold.
    pub fn update(&mut self, issue: Issue) -> Result<(), CivicDeskError> {
        match self.issues.get_mut(&issue.id) {
            Some(slot) => {
                *slot = issue;
                Ok(())
            }
            None => Err(CivicDeskError::NotFound(issue.id)),
        }
    }

    /// Snapshot of all issues. Order is unspecified; callers sort.
    pub fn list_all(&self) -> Vec<Issue> {
        self.issues.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use civicdesk_common::{Category, Priority};

    fn draft(title: &str, location: &str, user: &str) -> IssueDraft {
        IssueDraft {
            title: title.into(),
            description: "desc".into(),
            category: Category::Roads,
            priority: Priority::Medium,
            location: location.into(),
            submitted_by: user.into(),
            attachments: vec![],
        }
    }

    #[test]
    fn create_assigns_id_and_open_status() {
        let mut store = IssueStore::new();
        let now = Utc::now();
        let id = store.create(draft("Pothole", "North Ave", "u1"), now).unwrap();

        let issue = store.get(id).unwrap();
        assert_eq!(issue.status, Status::Open);
        assert_eq!(issue.submitted_at, now);
        assert_eq!(issue.points_awarded, 0);
        assert!(issue.resolved_at.is_none());
    }

    #[test]
    fn create_rejects_blank_required_fields() {
        let mut store = IssueStore::new();
        let now = Utc::now();

        for d in [
            draft("", "North Ave", "u1"),
            draft("   ", "North Ave", "u1"),
            draft("Pothole", "", "u1"),
            draft("Pothole", "North Ave", ""),
        ] {
            let err = store.create(d, now).unwrap_err();
            assert!(matches!(err, CivicDeskError::Validation(_)));
        }
        assert!(store.is_empty());
    }

    #[test]
    fn get_unknown_is_not_found() {
        let store = IssueStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(store.get(id), Err(CivicDeskError::NotFound(e)) if e == id));
    }

    #[test]
    fn update_unknown_is_not_found() {
        let mut store = IssueStore::new();
        let id = store
            .create(draft("Pothole", "North Ave", "u1"), Utc::now())
            .unwrap();
        let mut issue = store.get(id).unwrap().clone();
        issue.id = Uuid::new_v4();
        assert!(matches!(
            store.update(issue),
            Err(CivicDeskError::NotFound(_))
        ));
    }

    #[test]
    fn update_replaces_record() {
        let mut store = IssueStore::new();
        let id = store
            .create(draft("Pothole", "North Ave", "u1"), Utc::now())
            .unwrap();
        let mut issue = store.get(id).unwrap().clone();
        issue.points_awarded = 20;
        store.update(issue).unwrap();
        assert_eq!(store.get(id).unwrap().points_awarded, 20);
    }
}
