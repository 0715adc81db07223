use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::gateway::ScoreApi;
use crate::model::{
    Direction, GroupSnapshot, Player, Progress, Score, SubmitHole, SubmitReceipt, FIRST_HOLE,
    available_holes, first_available, normalize_completed, progress, step_hole,
};

/// How long a confirmation stays on screen.
pub const TOAST_MILLIS: i64 = 1800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Busy {
    Loading,
    Saving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadReason {
    Manual,
    HoleChanged,
    AfterSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScorerState {
    Empty,
    Loading,
    Saving,
    Loaded,
    LoadedWithError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub text: String,
    pub shown_at: DateTime<Utc>,
}

impl Toast {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            shown_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn expired_at(&self, now: DateTime<Utc>) -> bool {
        now - self.shown_at >= chrono::Duration::milliseconds(TOAST_MILLIS)
    }
}

/// Score entry view state for one browser session.
///
/// `players` always belong to `(group_id, hole)` as of the last successful
/// load; nothing typed locally survives a reload.
#[derive(Debug, Clone)]
pub struct ScorerModel {
    pub group_id: String,
    pub pin: String,
    pub hole: u8,
    pub players: Vec<Player>,
    pub completed_holes: Vec<u8>,
    pub loaded: bool,
    pub busy: Option<Busy>,
    pub error: Option<String>,
    pub toast: Option<Toast>,
}

impl Default for ScorerModel {
    fn default() -> Self {
        Self {
            group_id: String::new(),
            pin: String::new(),
            hole: FIRST_HOLE,
            players: Vec::new(),
            completed_holes: Vec::new(),
            loaded: false,
            busy: None,
            error: None,
            toast: None,
        }
    }
}

impl ScorerModel {
    #[must_use]
    pub fn state(&self) -> ScorerState {
        match (self.busy, self.loaded, self.error.is_some()) {
            (Some(Busy::Loading), _, _) => ScorerState::Loading,
            (Some(Busy::Saving), _, _) => ScorerState::Saving,
            (None, false, _) => ScorerState::Empty,
            (None, true, false) => ScorerState::Loaded,
            (None, true, true) => ScorerState::LoadedWithError,
        }
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress(&self.players)
    }

    #[must_use]
    pub fn available_holes(&self) -> Vec<u8> {
        available_holes(&self.completed_holes)
    }

    #[must_use]
    pub fn can_step(&self, direction: Direction) -> bool {
        self.busy.is_none() && step_hole(self.hole, &self.completed_holes, direction).is_some()
    }

    #[must_use]
    pub fn visible_toast(&self, now: DateTime<Utc>) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|t| !t.expired_at(now))
            .map(|t| t.text.as_str())
    }

    /// `player` is the card's `PlayerId::key`.
    fn player_mut(&mut self, player: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.player_id.key() == player)
    }

    fn fetch(&mut self, hole: u8, reason: LoadReason) -> Vec<Effect> {
        self.busy = Some(Busy::Loading);
        vec![Effect::FetchGroup {
            group_id: self.group_id.trim().to_string(),
            hole,
            reason,
        }]
    }
}

#[derive(Debug, Clone)]
pub enum Msg {
    FieldsEdited { group_id: String, pin: String },
    LoadRequested,
    ScoreEntered { player: String, raw: String },
    ScoreBumped { player: String, delta: i32 },
    HoleStepped(Direction),
    SubmitRequested,
    ToastTick(DateTime<Utc>),
    GroupLoaded {
        reason: LoadReason,
        hole: u8,
        snapshot: GroupSnapshot,
    },
    Submitted(SubmitReceipt),
    Failed(Busy, AppError),
}

impl Msg {
    /// Messages that come from a control the view disables while busy.
    #[must_use]
    pub fn is_user_action(&self) -> bool {
        !matches!(
            self,
            Msg::ToastTick(_) | Msg::GroupLoaded { .. } | Msg::Submitted(_) | Msg::Failed(..)
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchGroup {
        group_id: String,
        hole: u8,
        reason: LoadReason,
    },
    SubmitHole(SubmitHole),
}

pub fn update(model: &mut ScorerModel, msg: Msg) -> Vec<Effect> {
    match msg {
        Msg::FieldsEdited { group_id, pin } => {
            model.group_id = group_id;
            model.pin = pin;
            vec![]
        }
        Msg::LoadRequested => {
            if model.group_id.trim().is_empty() {
                return vec![];
            }
            model.error = None;
            model.fetch(model.hole, LoadReason::Manual)
        }
        Msg::ScoreEntered { player, raw } => {
            if let (Some(p), Some(score)) = (model.player_mut(&player), Score::parse_input(&raw)) {
                p.score = score;
            }
            vec![]
        }
        Msg::ScoreBumped { player, delta } => {
            if let Some(p) = model.player_mut(&player) {
                p.score = p.score.bumped(delta);
            }
            vec![]
        }
        Msg::HoleStepped(direction) => {
            let Some(hole) = step_hole(model.hole, &model.completed_holes, direction) else {
                return vec![];
            };
            model.hole = hole;
            if model.loaded && !model.group_id.trim().is_empty() {
                model.error = None;
                model.fetch(hole, LoadReason::HoleChanged)
            } else {
                vec![]
            }
        }
        Msg::SubmitRequested => {
            if model.players.is_empty() || model.pin.trim().is_empty() {
                return vec![];
            }
            model.error = None;
            model.busy = Some(Busy::Saving);
            vec![Effect::SubmitHole(SubmitHole::new(
                &model.group_id,
                &model.pin,
                model.hole,
                &model.players,
            ))]
        }
        Msg::ToastTick(now) => {
            if model.toast.as_ref().is_some_and(|t| t.expired_at(now)) {
                model.toast = None;
            }
            vec![]
        }
        Msg::GroupLoaded {
            reason,
            hole,
            snapshot,
        } => {
            model.completed_holes = normalize_completed(&snapshot.completed_holes);
            model.players = snapshot.players;
            model.loaded = true;
            model.busy = None;
            if reason != LoadReason::AfterSubmit {
                model.toast = Some(Toast::new(format!(
                    "Loaded {} • Hole {hole}",
                    model.group_id.trim()
                )));
            }
            if model.completed_holes.contains(&model.hole) {
                if let Some(next) = first_available(&model.completed_holes) {
                    model.hole = next;
                    return model.fetch(next, reason);
                }
            }
            vec![]
        }
        Msg::Submitted(receipt) => {
            let text = receipt
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Saved Hole {}", model.hole));
            model.toast = Some(Toast::new(text));
            model.fetch(model.hole, LoadReason::AfterSubmit)
        }
        Msg::Failed(kind, err) => {
            model.busy = None;
            let message = err.display_message();
            model.error = Some(if message.trim().is_empty() {
                match kind {
                    Busy::Loading => "Load failed".to_string(),
                    Busy::Saving => "Save failed".to_string(),
                }
            } else {
                message
            });
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
        Effect::FetchGroup {
            group_id,
            hole,
            reason,
        } => match deps.api.group(&group_id, hole).await {
            Ok(snapshot) => Msg::GroupLoaded {
                reason,
                hole,
                snapshot,
            },
            Err(e) => Msg::Failed(Busy::Loading, e),
        },
        Effect::SubmitHole(body) => match deps.api.submit_hole(&body).await {
            Ok(receipt) => Msg::Submitted(receipt),
            Err(e) => Msg::Failed(Busy::Saving, e),
        },
    }
}
