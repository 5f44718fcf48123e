//! Compiled-in scoring constants. No runtime configuration — the point
//! schedule and level thresholds are part of the engine's contract.

/// Every accepted submission earns this much before bonuses.
pub const BASE_SUBMISSION_POINTS: u32 = 10;

/// Priority bonus, Low through Critical.
pub const PRIORITY_BONUS_LOW: u32 = 5;
pub const PRIORITY_BONUS_MEDIUM: u32 = 10;
pub const PRIORITY_BONUS_HIGH: u32 = 15;
pub const PRIORITY_BONUS_CRITICAL: u32 = 20;

/// Flat bonus when a submission carries at least one attachment.
pub const ATTACHMENT_BONUS: u32 = 5;

/// Level thresholds — highest matching tier wins.
pub const LEVEL_SILVER_POINTS: u32 = 100;
pub const LEVEL_GOLD_POINTS: u32 = 250;
pub const LEVEL_PLATINUM_POINTS: u32 = 500;
pub const LEVEL_DIAMOND_POINTS: u32 = 1000;

/// Report-count badge thresholds (inclusive).
pub const COMMUNITY_HELPER_REPORTS: usize = 3;
pub const CONSISTENT_REPORTER_REPORTS: usize = 5;
pub const COMMUNITY_CHAMPION_REPORTS: usize = 10;

/// A user becomes a specialist in a category after this many reports in it.
pub const CATEGORY_SPECIALIST_REPORTS: usize = 2;

/// Themed category badges (Water Saver, Power Saver, Road Warrior,
/// Eco Guardian) require this many qualifying reports.
pub const THEMED_BADGE_REPORTS: usize = 3;
