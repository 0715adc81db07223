use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppError;
use crate::gateway::ScoreApi;
use crate::mvu::leaderboard::{self, LeaderboardModel};
use crate::mvu::scorer::{self, Busy, ScorerModel};
use crate::session::{ScorerWork, SessionStore};

/// Runs the MVU loop for one session's scorer: applies `msg` to the stored
/// model, drains the effects it produces, and stores the settled result.
///
/// The drain runs on its own task, so a dropped request still settles the
/// session instead of leaving it busy.
pub async fn run_scorer(
    sessions: &SessionStore,
    session: Uuid,
    msg: scorer::Msg,
    api: Arc<dyn ScoreApi>,
) -> ScorerModel {
    let work = sessions.apply_scorer(session, msg).await;
    if work.effects.is_empty() {
        return work.model;
    }
    let kind = work.model.busy.unwrap_or(Busy::Loading);
    let mount = work.mount;
    let task = tokio::spawn(drain_scorer(sessions.clone(), session, work, api));
    match task.await {
        Ok(model) => model,
        Err(e) => {
            tracing::error!(session = %session, error = %e, "scorer task aborted");
            let failed = scorer::Msg::Failed(kind, AppError::Other("request aborted".into()));
            let mut model = sessions.scorer(session).await;
            scorer::update(&mut model, failed);
            sessions.finish_scorer(session, mount, model).await
        }
    }
}

async fn drain_scorer(
    sessions: SessionStore,
    session: Uuid,
    work: ScorerWork,
    api: Arc<dyn ScoreApi>,
) -> ScorerModel {
    let ScorerWork {
        mount,
        mut model,
        mut effects,
    } = work;
    let deps = scorer::Deps { api: api.as_ref() };
    while let Some(effect) = effects.pop() {
        let msg = scorer::run_effect(effect, deps).await;
        if let scorer::Msg::Failed(_, e) = &msg {
            tracing::warn!(session = %session, error = %e, "scorer request failed");
        }
        let next = scorer::update(&mut model, msg);
        effects.extend(next);
    }
    sessions.finish_scorer(session, mount, model).await
}

/// Seeds the leaderboard model with `init_msg` and drains effects.
pub async fn run_leaderboard(
    model: &mut LeaderboardModel,
    init_msg: leaderboard::Msg,
    deps: leaderboard::Deps<'_>,
) {
    let mut effects = leaderboard::update(model, init_msg);
    while let Some(effect) = effects.pop() {
        let msg = leaderboard::run_effect(effect, deps).await;
        if let leaderboard::Msg::Failed(e) = &msg {
            tracing::warn!(error = %e, "leaderboard fetch failed");
        }
        effects.extend(leaderboard::update(model, msg));
    }
}
