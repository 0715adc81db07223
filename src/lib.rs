pub mod args;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod model;
pub mod mvu;
pub mod session;
pub mod view;

pub const HTMX_PATH: &str = "https://cdn.jsdelivr.net/npm/htmx.org@2.0.8/dist/htmx.min.js";

pub use controller::{AppState, configure};
pub use error::AppError;
pub use gateway::{ApiConfig, ScoreApi, SheetGateway};
