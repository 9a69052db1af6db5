pub mod leaderboard;
pub mod opportunities;
pub mod recommendations;
pub mod scores;
