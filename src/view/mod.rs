pub mod layout;
pub mod leaderboard;
pub mod scorer;

pub use layout::*;
pub use leaderboard::*;
pub use scorer::*;
