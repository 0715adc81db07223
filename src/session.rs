use ahash::AHashMap;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::mvu::leaderboard::LeaderboardModel;
use crate::mvu::scorer::{Effect, Msg, ScorerModel, update};

pub const SESSION_COOKIE: &str = "scorer_session";
pub const SESSION_IDLE: chrono::Duration = chrono::Duration::minutes(12 * 60);

/// View state for one browser. Each screen's model is rebuilt when that
/// screen is mounted.
#[derive(Debug, Clone)]
pub struct Session {
    pub scorer: ScorerModel,
    pub leaderboard: LeaderboardModel,
    scorer_mount: u64,
    last_seen: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            scorer: ScorerModel::default(),
            leaderboard: LeaderboardModel::default(),
            scorer_mount: 0,
            last_seen: Utc::now(),
        }
    }
}

/// A scorer update whose effects still have to run outside the lock.
#[derive(Debug)]
pub struct ScorerWork {
    pub mount: u64,
    pub model: ScorerModel,
    pub effects: Vec<Effect>,
}

pub type SessionMap = Arc<RwLock<AHashMap<Uuid, Session>>>;

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: SessionMap,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh scorer state, discarding whatever the session had.
    pub async fn mount_scorer(&self, id: Uuid) -> ScorerModel {
        let mut map = self.inner.write().await;
        prune_idle(&mut map, Utc::now());
        let session = map.entry(id).or_default();
        session.last_seen = Utc::now();
        session.scorer = ScorerModel::default();
        session.scorer_mount += 1;
        session.scorer.clone()
    }

    pub async fn scorer(&self, id: Uuid) -> ScorerModel {
        let map = self.inner.read().await;
        map.get(&id).map(|s| s.scorer.clone()).unwrap_or_default()
    }

    /// Applies `msg` to the stored model under the lock.
    ///
    /// While a load or save is in flight, user actions are dropped and the
    /// returned work carries no effects.
    pub async fn apply_scorer(&self, id: Uuid, msg: Msg) -> ScorerWork {
        let mut map = self.inner.write().await;
        let session = map.entry(id).or_default();
        session.last_seen = Utc::now();
        if session.scorer.busy.is_some() && msg.is_user_action() {
            tracing::debug!(session = %id, "scorer busy, ignoring action");
            return ScorerWork {
                mount: session.scorer_mount,
                model: session.scorer.clone(),
                effects: vec![],
            };
        }
        let effects = update(&mut session.scorer, msg);
        ScorerWork {
            mount: session.scorer_mount,
            model: session.scorer.clone(),
            effects,
        }
    }

    /// Stores the settled model unless the screen was remounted meanwhile.
    pub async fn finish_scorer(&self, id: Uuid, mount: u64, model: ScorerModel) -> ScorerModel {
        let mut map = self.inner.write().await;
        let session = map.entry(id).or_default();
        if session.scorer_mount == mount {
            session.scorer = model;
        } else {
            tracing::debug!(session = %id, "scorer remounted during request, dropping result");
        }
        session.scorer.clone()
    }

    pub async fn mount_leaderboard(&self, id: Uuid) -> LeaderboardModel {
        let mut map = self.inner.write().await;
        prune_idle(&mut map, Utc::now());
        let session = map.entry(id).or_default();
        session.last_seen = Utc::now();
        session.leaderboard = LeaderboardModel::default();
        session.leaderboard.clone()
    }

    pub async fn leaderboard(&self, id: Uuid) -> LeaderboardModel {
        let map = self.inner.read().await;
        map.get(&id)
            .map(|s| s.leaderboard.clone())
            .unwrap_or_default()
    }

    pub async fn store_leaderboard(&self, id: Uuid, model: LeaderboardModel) {
        let mut map = self.inner.write().await;
        let session = map.entry(id).or_default();
        session.leaderboard = model;
    }
}

fn prune_idle(map: &mut AHashMap<Uuid, Session>, now: DateTime<Utc>) {
    map.retain(|_, s| now - s.last_seen < SESSION_IDLE);
}
