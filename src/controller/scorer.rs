use actix_web::web::{self, Data};
use actix_web::{HttpRequest, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::AppState;
use super::session::{html_response, session_id};
use crate::model::Direction;
use crate::mvu::runtime::run_scorer;
use crate::mvu::scorer::Msg;
use crate::view::{Screen, render_page, render_scorer, render_toast};

/// Fields every scorer action posts. `group` and `pin` come from the inputs
/// at the top of the panel; the rest depend on the control.
#[derive(Debug, Default, Deserialize)]
pub struct ScorerForm {
    pub group: Option<String>,
    pub pin: Option<String>,
    pub player: Option<String>,
    pub value: Option<String>,
    pub delta: Option<i32>,
    pub dir: Option<Direction>,
}

pub async fn scorer_page(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    let (id, fresh) = session_id(&req);
    let model = state.sessions.mount_scorer(id).await;
    let markup = render_page("Scorer", Screen::Scorer, &render_scorer(&model, Utc::now()));
    html_response(markup, id, fresh)
}

pub async fn scorer_load(
    req: HttpRequest,
    form: web::Form<ScorerForm>,
    state: Data<AppState>,
) -> HttpResponse {
    dispatch(&req, form.into_inner(), &state, Msg::LoadRequested).await
}

pub async fn scorer_hole(
    req: HttpRequest,
    form: web::Form<ScorerForm>,
    state: Data<AppState>,
) -> HttpResponse {
    let form = form.into_inner();
    let Some(direction) = form.dir else {
        return HttpResponse::BadRequest().json(json!({"error": "dir must be prev or next"}));
    };
    dispatch(&req, form, &state, Msg::HoleStepped(direction)).await
}

pub async fn scorer_score(
    req: HttpRequest,
    form: web::Form<ScorerForm>,
    state: Data<AppState>,
) -> HttpResponse {
    let mut form = form.into_inner();
    let Some(player) = form.player.take() else {
        return HttpResponse::BadRequest().json(json!({"error": "player is required"}));
    };
    let raw = form.value.take().unwrap_or_default();
    dispatch(&req, form, &state, Msg::ScoreEntered { player, raw }).await
}

pub async fn scorer_bump(
    req: HttpRequest,
    form: web::Form<ScorerForm>,
    state: Data<AppState>,
) -> HttpResponse {
    let mut form = form.into_inner();
    let (Some(player), Some(delta)) = (form.player.take(), form.delta) else {
        return HttpResponse::BadRequest().json(json!({"error": "player and delta are required"}));
    };
    dispatch(&req, form, &state, Msg::ScoreBumped { player, delta }).await
}

pub async fn scorer_submit(
    req: HttpRequest,
    form: web::Form<ScorerForm>,
    state: Data<AppState>,
) -> HttpResponse {
    dispatch(&req, form.into_inner(), &state, Msg::SubmitRequested).await
}

pub async fn scorer_toast(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    let (id, fresh) = session_id(&req);
    let now = Utc::now();
    let model = run_scorer(&state.sessions, id, Msg::ToastTick(now), state.api.clone()).await;
    html_response(render_toast(&model, now), id, fresh)
}

/// Applies the posted field values, then `msg`, and re-renders the panel.
async fn dispatch(
    req: &HttpRequest,
    form: ScorerForm,
    state: &AppState,
    msg: Msg,
) -> HttpResponse {
    let (id, fresh) = session_id(req);

    if form.group.is_some() || form.pin.is_some() {
        let current = state.sessions.scorer(id).await;
        let edited = Msg::FieldsEdited {
            group_id: form.group.unwrap_or(current.group_id),
            pin: form.pin.unwrap_or(current.pin),
        };
        run_scorer(&state.sessions, id, edited, state.api.clone()).await;
    }

    tracing::debug!(session = %id, ?msg, "scorer action");
    let model = run_scorer(&state.sessions, id, msg, state.api.clone()).await;

    html_response(render_scorer(&model, Utc::now()), id, fresh)
}
