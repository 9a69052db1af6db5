pub mod activity;
pub mod leaderboard;
pub mod opportunity;
pub mod profile;
pub mod recommendation;
pub mod score;
