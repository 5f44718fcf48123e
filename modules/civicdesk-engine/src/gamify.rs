//! Gamification — points, levels, and badges derived from a user's
//! submission history.
//!
//! Everything here is a pure function. No I/O, no clocks, no mutable
//! state: the coordinator owns UserProgress and feeds the full
//! submission-ordered history in. Badge earn timestamps are backdated to
//! the submission that first satisfied the rule, so re-running an
//! evaluation over the same history always reproduces the same awards.

use chrono::{DateTime, Utc};

use civicdesk_common::scoring::*;
use civicdesk_common::{BadgeAward, BadgeId, Category, Issue, Level, Priority};

// ---------------------------------------------------------------------------
// Points and levels
// ---------------------------------------------------------------------------

/// Points for one submission: base + priority bonus + attachment bonus.
/// Fixed at submission time; never recomputed from anything else.
pub fn points_for_submission(priority: Priority, attachment_count: usize) -> u32 {
    let priority_bonus = match priority {
        Priority::Low => PRIORITY_BONUS_LOW,
        Priority::Medium => PRIORITY_BONUS_MEDIUM,
        Priority::High => PRIORITY_BONUS_HIGH,
        Priority::Critical => PRIORITY_BONUS_CRITICAL,
    };
    let attachment_bonus = if attachment_count > 0 {
        ATTACHMENT_BONUS
    } else {
        0
    };
    BASE_SUBMISSION_POINTS + priority_bonus + attachment_bonus
}

/// Highest tier whose threshold the points meet. Total over all inputs.
pub fn level_for_points(points: u32) -> Level {
    match points {
        p if p >= LEVEL_DIAMOND_POINTS => Level::Diamond,
        p if p >= LEVEL_PLATINUM_POINTS => Level::Platinum,
        p if p >= LEVEL_GOLD_POINTS => Level::Gold,
        p if p >= LEVEL_SILVER_POINTS => Level::Silver,
        _ => Level::Bronze,
    }
}

// ---------------------------------------------------------------------------
// Badge catalog
// ---------------------------------------------------------------------------

/// How a badge is earned. Each rule is evaluated independently over the
/// full history; rules are not mutually exclusive.
#[derive(Debug, Clone, Copy)]
enum BadgeRule {
    /// Total report count reaches the threshold.
    TotalReports(usize),
    /// At least one report carries an attachment.
    AnyWithAttachment,
    /// At least one report has Critical priority.
    AnyCritical,
    /// Report count within the listed categories (combined) reaches the
    /// threshold.
    CategoryReports {
        categories: &'static [Category],
        required: usize,
    },
}

const ECO_CATEGORIES: &[Category] = &[Category::WasteManagement, Category::ParksAndRecreation];

/// The full compiled-in catalog. CategorySpecialist expands to one entry
/// per category, so a user can hold several at once.
fn catalog() -> Vec<(BadgeId, BadgeRule)> {
    let mut defs = vec![
        (BadgeId::FirstReport, BadgeRule::TotalReports(1)),
        (
            BadgeId::CommunityHelper,
            BadgeRule::TotalReports(COMMUNITY_HELPER_REPORTS),
        ),
        (
            BadgeId::ConsistentReporter,
            BadgeRule::TotalReports(CONSISTENT_REPORTER_REPORTS),
        ),
        (
            BadgeId::CommunityChampion,
            BadgeRule::TotalReports(COMMUNITY_CHAMPION_REPORTS),
        ),
        (BadgeId::MediaContributor, BadgeRule::AnyWithAttachment),
        (BadgeId::EmergencyResponder, BadgeRule::AnyCritical),
    ];
    for category in Category::ALL {
        defs.push((
            BadgeId::CategorySpecialist(category),
            BadgeRule::CategoryReports {
                categories: specialist_slice(category),
                required: CATEGORY_SPECIALIST_REPORTS,
            },
        ));
    }
    defs.push((
        BadgeId::WaterSaver,
        BadgeRule::CategoryReports {
            categories: &[Category::WaterSupply],
            required: THEMED_BADGE_REPORTS,
        },
    ));
    defs.push((
        BadgeId::PowerSaver,
        BadgeRule::CategoryReports {
            categories: &[Category::Electricity],
            required: THEMED_BADGE_REPORTS,
        },
    ));
    defs.push((
        BadgeId::RoadWarrior,
        BadgeRule::CategoryReports {
            categories: &[Category::Roads],
            required: THEMED_BADGE_REPORTS,
        },
    ));
    defs.push((
        BadgeId::EcoGuardian,
        BadgeRule::CategoryReports {
            categories: ECO_CATEGORIES,
            required: THEMED_BADGE_REPORTS,
        },
    ));
    defs
}

/// One-element 'static slice per category, so specialist rules share the
/// same rule shape as the themed group badges.
fn specialist_slice(category: Category) -> &'static [Category] {
    match category {
        Category::WaterSupply => &[Category::WaterSupply],
        Category::Electricity => &[Category::Electricity],
        Category::Roads => &[Category::Roads],
        Category::WasteManagement => &[Category::WasteManagement],
        Category::PublicSafety => &[Category::PublicSafety],
        Category::ParksAndRecreation => &[Category::ParksAndRecreation],
        Category::BuildingPermits => &[Category::BuildingPermits],
        Category::Other => &[Category::Other],
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Outcome of evaluating the catalog over one user's history.
#[derive(Debug, Clone)]
pub struct BadgeEvaluation {
    /// Every badge the history qualifies for, with backdated timestamps.
    pub earned: Vec<BadgeAward>,
    /// The subset not present in the previously recorded earned set.
    pub newly_earned: Vec<BadgeAward>,
}

/// Evaluate every badge rule over `history` (ordered by submission time).
///
/// `already_earned` is the user's previously recorded badge set; anything
/// qualifying that is absent from it comes back in `newly_earned`. Earned
/// badges never leave the set, so evaluation is monotone: a badge in
/// `already_earned` is never re-reported as new even if the rule would
/// somehow no longer match.
pub fn evaluate_badges<F>(history: &[Issue], already_earned: F) -> BadgeEvaluation
where
    F: Fn(BadgeId) -> bool,
{
    let mut earned = Vec::new();
    let mut newly_earned = Vec::new();

    for (badge, rule) in catalog() {
        let Some(at) = earn_time(rule, history) else {
            continue;
        };
        let award = BadgeAward {
            badge,
            earned_at: at,
        };
        if !already_earned(badge) {
            newly_earned.push(award.clone());
        }
        earned.push(award);
    }

    BadgeEvaluation {
        earned,
        newly_earned,
    }
}

/// Submission time of the issue that first satisfied the rule, or None if
/// the history does not qualify.
fn earn_time(rule: BadgeRule, history: &[Issue]) -> Option<DateTime<Utc>> {
    match rule {
        BadgeRule::TotalReports(required) => {
            history.get(required.checked_sub(1)?).map(|i| i.submitted_at)
        }
        BadgeRule::AnyWithAttachment => history
            .iter()
            .find(|i| !i.attachments.is_empty())
            .map(|i| i.submitted_at),
        BadgeRule::AnyCritical => history
            .iter()
            .find(|i| i.priority == Priority::Critical)
            .map(|i| i.submitted_at),
        BadgeRule::CategoryReports {
            categories,
            required,
        } => history
            .iter()
            .filter(|i| categories.contains(&i.category))
            .nth(required.checked_sub(1)?)
            .map(|i| i.submitted_at),
    }
}
