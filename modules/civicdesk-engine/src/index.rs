//! Secondary indexes over the issue set — category, priority, status,
//! and derived location zone.
//!
//! The indexes never observe the store directly. Every store mutation is
//! paired with exactly one call here by the coordinator: `on_issue_created`
//! for creation, `on_status_changed` for a transition. Applying the paired
//! call once keeps each id under exactly one key per dimension.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use civicdesk_common::{Category, Issue, Priority, Status, Zone};

/// Pluggable free-text-location → zone heuristic.
pub type ZoneClassifier = fn(&str) -> Zone;

/// Case-insensitive substring match on compass directions; anything
/// unrecognized lands in `Zone::Other`. Callers with real geodata can
/// plug in their own classifier.
pub fn default_zone_classifier(location: &str) -> Zone {
    let lower = location.to_lowercase();
    if lower.contains("north") {
        Zone::North
    } else if lower.contains("south") {
        Zone::South
    } else if lower.contains("east") {
        Zone::East
    } else if lower.contains("west") {
        Zone::West
    } else if lower.contains("central") || lower.contains("downtown") {
        Zone::Central
    } else {
        Zone::Other
    }
}

/// Category / priority / status / zone buckets, each mapping a key to the
/// set of issue ids currently holding it.
pub struct SecondaryIndexes {
    by_category: HashMap<Category, HashSet<Uuid>>,
    by_priority: HashMap<Priority, HashSet<Uuid>>,
    by_status: HashMap<Status, HashSet<Uuid>>,
    by_zone: HashMap<Zone, HashSet<Uuid>>,
    classify: ZoneClassifier,
}

impl Default for SecondaryIndexes {
    fn default() -> Self {
        Self::new(default_zone_classifier)
    }
}

impl SecondaryIndexes {
    pub fn new(classify: ZoneClassifier) -> Self {
        Self {
            by_category: HashMap::new(),
            by_priority: HashMap::new(),
            by_status: HashMap::new(),
            by_zone: HashMap::new(),
            classify,
        }
    }

    /// Insert a freshly created issue into all four dimensions. The status
    /// bucket uses the issue's current status, which is always Open at
    /// creation.
    pub fn on_issue_created(&mut self, issue: &Issue) {
        self.by_category
            .entry(issue.category)
            .or_default()
            .insert(issue.id);
        self.by_priority
            .entry(issue.priority)
            .or_default()
            .insert(issue.id);
        self.by_status
            .entry(issue.status)
            .or_default()
            .insert(issue.id);
        let zone = (self.classify)(&issue.location);
        self.by_zone.entry(zone).or_default().insert(issue.id);
    }

    /// Move an id between status buckets. Category, priority, and zone are
    /// fixed at submission and unaffected.
    pub fn on_status_changed(&mut self, id: Uuid, old: Status, new: Status) {
        if let Some(bucket) = self.by_status.get_mut(&old) {
            bucket.remove(&id);
        }
        self.by_status.entry(new).or_default().insert(id);
    }

    pub fn by_category(&self, category: Category) -> HashSet<Uuid> {
        self.by_category.get(&category).cloned().unwrap_or_default()
    }

    pub fn by_priority(&self, priority: Priority) -> HashSet<Uuid> {
        self.by_priority.get(&priority).cloned().unwrap_or_default()
    }

    pub fn by_status(&self, status: Status) -> HashSet<Uuid> {
        self.by_status.get(&status).cloned().unwrap_or_default()
    }

    pub fn by_zone(&self, zone: Zone) -> HashSet<Uuid> {
        self.by_zone.get(&zone).cloned().unwrap_or_default()
    }

    /// Union of all status buckets. Equals the full issue set whenever
    /// every store mutation was paired with its index call.
    pub fn all_ids(&self) -> HashSet<Uuid> {
        self.by_status.values().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issue(category: Category, priority: Priority, location: &str) -> Issue {
        Issue {
            id: Uuid::new_v4(),
            title: "t".into(),
            description: "d".into(),
            category,
            priority,
            status: Status::Open,
            location: location.into(),
            submitted_by: "u1".into(),
            submitted_at: Utc::now(),
            resolved_at: None,
            attachments: vec![],
            points_awarded: 0,
        }
    }

    #[test]
    fn zone_heuristic_is_case_insensitive() {
        assert_eq!(default_zone_classifier("North Ridge Rd"), Zone::North);
        assert_eq!(default_zone_classifier("SOUTHGATE"), Zone::South);
        assert_eq!(default_zone_classifier("east end"), Zone::East);
        assert_eq!(default_zone_classifier("12 Westbrook Ln"), Zone::West);
        assert_eq!(default_zone_classifier("Downtown plaza"), Zone::Central);
        assert_eq!(default_zone_classifier("Maple St"), Zone::Other);
        assert_eq!(default_zone_classifier(""), Zone::Other);
    }

    #[test]
    fn creation_populates_every_dimension() {
        let mut idx = SecondaryIndexes::default();
        let i = issue(Category::Roads, Priority::High, "North Ave");
        idx.on_issue_created(&i);

        assert!(idx.by_category(Category::Roads).contains(&i.id));
        assert!(idx.by_priority(Priority::High).contains(&i.id));
        assert!(idx.by_status(Status::Open).contains(&i.id));
        assert!(idx.by_zone(Zone::North).contains(&i.id));
    }

    #[test]
    fn status_change_moves_between_buckets_only() {
        let mut idx = SecondaryIndexes::default();
        let i = issue(Category::Roads, Priority::High, "North Ave");
        idx.on_issue_created(&i);
        idx.on_status_changed(i.id, Status::Open, Status::InProgress);

        assert!(!idx.by_status(Status::Open).contains(&i.id));
        assert!(idx.by_status(Status::InProgress).contains(&i.id));
        assert!(idx.by_category(Category::Roads).contains(&i.id));
        assert!(idx.by_zone(Zone::North).contains(&i.id));
    }

    #[test]
    fn unknown_keys_return_empty_sets() {
        let idx = SecondaryIndexes::default();
        assert!(idx.by_category(Category::Electricity).is_empty());
        assert!(idx.by_priority(Priority::Low).is_empty());
        assert!(idx.by_status(Status::Closed).is_empty());
        assert!(idx.by_zone(Zone::Central).is_empty());
    }

    #[test]
    fn unzonable_location_indexes_under_other() {
        let mut idx = SecondaryIndexes::default();
        let i = issue(Category::Other, Priority::Low, "???");
        idx.on_issue_created(&i);
        assert!(idx.by_zone(Zone::Other).contains(&i.id));
    }
}
