pub mod hole;
pub mod score;
pub mod types;

pub use hole::*;
pub use score::*;
pub use types::*;
