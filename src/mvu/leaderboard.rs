use crate::error::AppError;
use crate::gateway::ScoreApi;
use crate::model::{Leaderboard, LeaderboardRow};

#[derive(Debug, Clone, Default)]
pub struct LeaderboardModel {
    pub rows: Vec<LeaderboardRow>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Clone)]
pub enum Msg {
    Refresh,
    RowsLoaded(Leaderboard),
    Failed(AppError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchRows,
}

pub fn update(model: &mut LeaderboardModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::Refresh => {
            model.error = None;
            model.loading = true;
            vec![Effect::FetchRows]
        }
        Msg::RowsLoaded(board) => {
            // Server order is the ranking.
            model.rows = board.rows;
            model.loading = false;
            vec![]
        }
        Msg::Failed(e) => {
            let message = e.display_message();
            model.error = Some(if message.trim().is_empty() {
                "Load failed".to_string()
            } else {
                message
            });
            model.loading = false;
            vec![]
        }
    }
}

#[derive(Clone, Copy)]
pub struct Deps<'a> {
    pub api: &'a dyn ScoreApi,
}

pub async fn run_effect(effect: Effect, deps: Deps<'_>) -> Msg {
    match effect {
        Effect::FetchRows => match deps.api.leaderboard().await {
            Ok(board) => Msg::RowsLoaded(board),
            Err(e) => Msg::Failed(e),
        },
    }
}
