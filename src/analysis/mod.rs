//! Image statistics and folder ranking

/// Folder ranking by metric and leaderboard reports
pub mod ranking;
/// Whole-image color statistics
pub mod scan;
