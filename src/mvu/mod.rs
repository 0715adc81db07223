pub mod leaderboard;
pub mod runtime;
pub mod scorer;
