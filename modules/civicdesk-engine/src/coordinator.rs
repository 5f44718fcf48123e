//! IssueLifecycleCoordinator — the one entry point for mutations.
//!
//! Each operation is a single critical section over store + indexes +
//! user progress, so index updates and gamification recomputation for a
//! user are never interleaved with another operation on the same user or
//! issue. Domain events are dispatched inside the critical section;
//! subscribers observe per-issue events in generation order.
//!
//! Handlers registered on the dispatcher must not call back into the
//! coordinator — they run while the state lock is held.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use civicdesk_common::{
    Category, CivicDeskError, DomainEvent, EventKind, Issue, IssueDraft, Priority, Status,
    SubmissionResult, UserProgress, Zone,
};

use crate::dispatch::NotificationDispatcher;
use crate::gamify;
use crate::index::{SecondaryIndexes, ZoneClassifier};
use crate::rank::{self, IssueSortKey};
use crate::store::IssueStore;

struct CoreState {
    store: IssueStore,
    indexes: SecondaryIndexes,
    progress: HashMap<String, UserProgress>,
    /// Per-user issue ids in submission order — the history badge rules
    /// are evaluated over.
    submissions: HashMap<String, Vec<Uuid>>,
}

/// The engine facade. Cheap to clone; clones share state. Constructed
/// once by the composition root — no static collections anywhere.
#[derive(Clone)]
pub struct CivicDesk {
    state: Arc<Mutex<CoreState>>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl Default for CivicDesk {
    fn default() -> Self {
        Self::new()
    }
}

impl CivicDesk {
    pub fn new() -> Self {
        Self::with_zone_classifier(crate::index::default_zone_classifier)
    }

    pub fn with_zone_classifier(classify: ZoneClassifier) -> Self {
        Self {
            state: Arc::new(Mutex::new(CoreState {
                store: IssueStore::new(),
                indexes: SecondaryIndexes::new(classify),
                progress: HashMap::new(),
                submissions: HashMap::new(),
            })),
            dispatcher: Arc::new(NotificationDispatcher::new()),
        }
    }

    /// Register an observer for one event kind. See [`NotificationDispatcher`].
    pub fn subscribe<F>(&self, kind: EventKind, handler: F)
    where
        F: Fn(&DomainEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.dispatcher.subscribe(kind, handler);
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Accept a submission: validate and store, index, award points,
    /// update the user's progress, evaluate badges, and notify.
    ///
    /// Validation failure commits nothing — no index entry, no progress
    /// change, no event. The result carries only what this call awarded.
    pub fn submit_issue(&self, draft: IssueDraft) -> Result<SubmissionResult, CivicDeskError> {
        let mut state = self.state.lock().expect("coordinator state lock poisoned");
        let now = Utc::now();

        let id = state.store.create(draft, now)?;
        let mut issue = state.store.get(id)?.clone();
        state.indexes.on_issue_created(&issue);

        // Points are computed after the id exists and written back through
        // the store — the one sanctioned update of a just-created issue.
        let points = gamify::points_for_submission(issue.priority, issue.attachments.len());
        issue.points_awarded = points;
        state.store.update(issue.clone())?;

        let user_id = issue.submitted_by.clone();
        state
            .submissions
            .entry(user_id.clone())
            .or_default()
            .push(id);

        let history: Vec<Issue> = {
            let ids = &state.submissions[&user_id];
            ids.iter()
                .filter_map(|i| state.store.get(*i).ok().cloned())
                .collect()
        };

        let progress = state
            .progress
            .entry(user_id.clone())
            .or_insert_with(|| UserProgress::new(user_id.clone()));
        progress.points += points;
        progress.level = gamify::level_for_points(progress.points);
        progress.issues_submitted += 1;

        let evaluation = gamify::evaluate_badges(&history, |b| progress.has_badge(b));
        for award in &evaluation.newly_earned {
            progress.badges.push(award.clone());
        }

        debug!(
            issue_id = %id,
            user_id = %user_id,
            points,
            new_badges = evaluation.newly_earned.len(),
            "Issue submitted"
        );

        for award in &evaluation.newly_earned {
            self.dispatcher.dispatch(&DomainEvent::BadgeEarned {
                user_id: user_id.clone(),
                badge: award.badge,
                at: award.earned_at,
            });
        }
        self.dispatcher.dispatch(&DomainEvent::IssueSubmitted {
            issue_id: id,
            user_id,
            category: issue.category,
            priority: issue.priority,
            at: now,
        });

        Ok(SubmissionResult {
            issue,
            points_awarded: points,
            badges_earned: evaluation.newly_earned,
        })
    }

    /// Move an issue forward through the status state machine.
    ///
    /// The resolution timestamp is set the first time the issue enters
    /// Resolved or Closed and never cleared. Transitions do not re-trigger
    /// point or badge computation; submission is the only awarding moment.
    pub fn transition_status(
        &self,
        id: Uuid,
        new_status: Status,
    ) -> Result<Issue, CivicDeskError> {
        let mut state = self.state.lock().expect("coordinator state lock poisoned");

        let mut issue = state.store.get(id)?.clone();
        let old_status = issue.status;
        if !old_status.can_transition_to(new_status) {
            return Err(CivicDeskError::InvalidTransition {
                from: old_status,
                to: new_status,
            });
        }

        let now = Utc::now();
        issue.status = new_status;
        if new_status.is_settled() && issue.resolved_at.is_none() {
            issue.resolved_at = Some(now);
        }
        state.store.update(issue.clone())?;
        state.indexes.on_status_changed(id, old_status, new_status);

        debug!(issue_id = %id, from = %old_status, to = %new_status, "Status changed");

        self.dispatcher.dispatch(&DomainEvent::IssueStatusChanged {
            issue_id: id,
            from: old_status,
            to: new_status,
            at: now,
        });
        if new_status == Status::Resolved {
            self.dispatcher.dispatch(&DomainEvent::IssueResolved {
                issue_id: id,
                user_id: issue.submitted_by.clone(),
                at: now,
            });
        }

        Ok(issue)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn issue(&self, id: Uuid) -> Result<Issue, CivicDeskError> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.store.get(id).cloned()
    }

    /// Snapshot of all issues, unspecified order.
    pub fn issues(&self) -> Vec<Issue> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.store.list_all()
    }

    /// Snapshot sorted for display — the single sort path for listings.
    pub fn issues_sorted(&self, key: IssueSortKey) -> Vec<Issue> {
        let mut issues = self.issues();
        rank::sort_issues(&mut issues, key);
        issues
    }

    pub fn issue_ids_by_status(&self, status: Status) -> HashSet<Uuid> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.indexes.by_status(status)
    }

    pub fn issue_ids_by_category(&self, category: Category) -> HashSet<Uuid> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.indexes.by_category(category)
    }

    pub fn issue_ids_by_priority(&self, priority: Priority) -> HashSet<Uuid> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.indexes.by_priority(priority)
    }

    pub fn issue_ids_by_zone(&self, zone: Zone) -> HashSet<Uuid> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.indexes.by_zone(zone)
    }

    pub fn user_progress(&self, user_id: &str) -> Option<UserProgress> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.progress.get(user_id).cloned()
    }

    /// Top `n` users by points, deterministic tie-break on user id.
    pub fn leaderboard(&self, n: usize) -> Vec<UserProgress> {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        rank::leaderboard(state.progress.values().cloned().collect(), n)
    }

    pub fn issue_count(&self) -> usize {
        let state = self.state.lock().expect("coordinator state lock poisoned");
        state.store.len()
    }
}
