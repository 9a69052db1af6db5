pub mod leaderboard;
pub mod opportunity;
pub mod recommendation;
pub mod score;
