pub mod leaderboard;
pub mod scorer;
pub mod session;

use actix_web::web;
use std::sync::Arc;

use crate::gateway::ScoreApi;
use crate::session::SessionStore;

/// Shared by every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn ScoreApi>,
    pub sessions: SessionStore,
}

impl AppState {
    #[must_use]
    pub fn new(api: Arc<dyn ScoreApi>) -> Self {
        Self {
            api,
            sessions: SessionStore::new(),
        }
    }
}

/// Registers the page and fragment routes. Static files and `/health` are
/// left to the caller.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(scorer::scorer_page))
        .route("/scorer/load", web::post().to(scorer::scorer_load))
        .route("/scorer/hole", web::post().to(scorer::scorer_hole))
        .route("/scorer/score", web::post().to(scorer::scorer_score))
        .route("/scorer/bump", web::post().to(scorer::scorer_bump))
        .route("/scorer/submit", web::post().to(scorer::scorer_submit))
        .route("/scorer/toast", web::get().to(scorer::scorer_toast))
        .route("/leaderboard", web::get().to(leaderboard::leaderboard_page))
        .route("/leaderboard/rows", web::get().to(leaderboard::leaderboard_rows));
}
