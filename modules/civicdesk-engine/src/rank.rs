//! Ranking helpers for the page layer: leaderboard and sorted issue
//! listings. One sort-by-key utility over the standard library sort —
//! the sort algorithm is not part of any contract here.

use civicdesk_common::{Issue, UserProgress};

/// Sort order for issue listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueSortKey {
    /// Most recently submitted first.
    Newest,
    /// Highest priority first; ties broken newest-first.
    Priority,
}

/// Sort issues in place by the requested key.
pub fn sort_issues(issues: &mut [Issue], key: IssueSortKey) {
    match key {
        IssueSortKey::Newest => {
            issues.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        }
        IssueSortKey::Priority => {
            issues.sort_by(|a, b| {
                b.priority
                    .cmp(&a.priority)
                    .then(b.submitted_at.cmp(&a.submitted_at))
            });
        }
    }
}

/// Top `n` users by points. Ties break on user id so the board is stable
/// across identical snapshots.
pub fn leaderboard(mut users: Vec<UserProgress>, n: usize) -> Vec<UserProgress> {
    users.sort_by(|a, b| b.points.cmp(&a.points).then(a.user_id.cmp(&b.user_id)));
    users.truncate(n);
    users
}
