use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Enums ---

/// Closed set of municipal issue categories. An issue's category never
/// changes after submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WaterSupply,
    Electricity,
    Roads,
    WasteManagement,
    PublicSafety,
    ParksAndRecreation,
    BuildingPermits,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::WaterSupply,
        Category::Electricity,
        Category::Roads,
        Category::WasteManagement,
        Category::PublicSafety,
        Category::ParksAndRecreation,
        Category::BuildingPermits,
        Category::Other,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::WaterSupply => write!(f, "Water Supply"),
            Category::Electricity => write!(f, "Electricity"),
            Category::Roads => write!(f, "Roads"),
            Category::WasteManagement => write!(f, "Waste Management"),
            Category::PublicSafety => write!(f, "Public Safety"),
            Category::ParksAndRecreation => write!(f, "Parks and Recreation"),
            Category::BuildingPermits => write!(f, "Building Permits"),
            Category::Other => write!(f, "Other"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

/// Issue lifecycle status. Transitions move forward only; nothing ever
/// returns to `Open` after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Open,
        Status::InProgress,
        Status::Resolved,
        Status::Closed,
    ];

    /// Legal forward transitions:
    /// Open → InProgress | Resolved, InProgress → Resolved | Closed,
    /// Resolved → Closed. No reopening.
    pub fn can_transition_to(self, next: Status) -> bool {
        matches!(
            (self, next),
            (Status::Open, Status::InProgress)
                | (Status::Open, Status::Resolved)
                | (Status::InProgress, Status::Resolved)
                | (Status::InProgress, Status::Closed)
                | (Status::Resolved, Status::Closed)
        )
    }

    /// Resolved and Closed both fix the resolution timestamp.
    pub fn is_settled(self) -> bool {
        matches!(self, Status::Resolved | Status::Closed)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Open => write!(f, "open"),
            Status::InProgress => write!(f, "in_progress"),
            Status::Resolved => write!(f, "resolved"),
            Status::Closed => write!(f, "closed"),
        }
    }
}

/// Coarse geographic bucket derived from a free-text location string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    North,
    South,
    East,
    West,
    Central,
    Other,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Zone::North => write!(f, "north"),
            Zone::South => write!(f, "south"),
            Zone::East => write!(f, "east"),
            Zone::West => write!(f, "west"),
            Zone::Central => write!(f, "central"),
            Zone::Other => write!(f, "other"),
        }
    }
}

/// Reporter tier, derived from cumulative points. Never stored
/// independently of the points that imply it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Bronze => write!(f, "bronze"),
            Level::Silver => write!(f, "silver"),
            Level::Gold => write!(f, "gold"),
            Level::Platinum => write!(f, "platinum"),
            Level::Diamond => write!(f, "diamond"),
        }
    }
}

// --- Issue ---

/// A municipal problem report. The canonical record held by the store.
///
/// `points_awarded` is fixed at submission time and never mutated;
/// `resolved_at` is set the instant status first becomes Resolved or
/// Closed and is never cleared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub status: Status,
    pub location: String,
    pub submitted_by: String,
    pub submitted_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    /// Opaque references into external attachment storage. The engine
    /// only counts them.
    pub attachments: Vec<String>,
    pub points_awarded: u32,
}

/// Caller-supplied fields of a submission. Identity, status, timestamps,
/// and points are assigned by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub priority: Priority,
    pub location: String,
    pub submitted_by: String,
    #[serde(default)]
    pub attachments: Vec<String>,
}

// --- Badges ---

/// Every badge the catalog defines. Definitions are compiled in; the only
/// mutable projection is the per-user earned set.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    FirstReport,
    CommunityHelper,
    ConsistentReporter,
    CommunityChampion,
    MediaContributor,
    EmergencyResponder,
    CategorySpecialist(Category),
    WaterSaver,
    PowerSaver,
    RoadWarrior,
    EcoGuardian,
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BadgeId::FirstReport => write!(f, "First Report"),
            BadgeId::CommunityHelper => write!(f, "Community Helper"),
            BadgeId::ConsistentReporter => write!(f, "Consistent Reporter"),
            BadgeId::CommunityChampion => write!(f, "Community Champion"),
            BadgeId::MediaContributor => write!(f, "Media Contributor"),
            BadgeId::EmergencyResponder => write!(f, "Emergency Responder"),
            BadgeId::CategorySpecialist(c) => write!(f, "{c} Specialist"),
            BadgeId::WaterSaver => write!(f, "Water Saver"),
            BadgeId::PowerSaver => write!(f, "Power Saver"),
            BadgeId::RoadWarrior => write!(f, "Road Warrior"),
            BadgeId::EcoGuardian => write!(f, "Eco Guardian"),
        }
    }
}

/// A badge granted to a user. `earned_at` is the submission time of the
/// issue that first satisfied the badge's rule, not evaluation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeAward {
    pub badge: BadgeId,
    pub earned_at: DateTime<Utc>,
}

// --- User progress ---

/// Derived gamification state for one user. Created lazily on first
/// submission, never deleted. Points only increase; badges are never
/// removed; `level` always matches what `points` implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProgress {
    pub user_id: String,
    pub points: u32,
    pub level: Level,
    /// Earned badges in award order. Append-only; the catalog evaluation
    /// order keeps this stable for a given history.
    pub badges: Vec<BadgeAward>,
    pub issues_submitted: u32,
}

impl UserProgress {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            points: 0,
            level: Level::Bronze,
            badges: Vec::new(),
            issues_submitted: 0,
        }
    }

    pub fn has_badge(&self, badge: BadgeId) -> bool {
        self.badges.iter().any(|a| a.badge == badge)
    }
}

// --- Submission result ---

/// What one `submit_issue` call produced: the stored record plus the
/// points and badges awarded by this call alone (not cumulative totals).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub issue: Issue,
    pub points_awarded: u32,
    pub badges_earned: Vec<BadgeAward>,
}
