use actix_web::web::Data;
use actix_web::{HttpRequest, HttpResponse};

use super::AppState;
use super::session::{html_response, session_id};
use crate::mvu::leaderboard::{Deps, Msg};
use crate::mvu::runtime::run_leaderboard;
use crate::view::{Screen, render_leaderboard, render_page};

/// Mounting the page starts from an empty model and fetches immediately.
pub async fn leaderboard_page(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    let (id, fresh) = session_id(&req);
    let mut model = state.sessions.mount_leaderboard(id).await;
    run_leaderboard(
        &mut model,
        Msg::Refresh,
        Deps {
            api: state.api.as_ref(),
        },
    )
    .await;
    state.sessions.store_leaderboard(id, model.clone()).await;
    let markup = render_page(
        "Leaderboard",
        Screen::Leaderboard,
        &render_leaderboard(&model),
    );
    html_response(markup, id, fresh)
}

/// Manual refresh. Rows are replaced wholesale on success; a failed refresh
/// keeps the rows already shown.
pub async fn leaderboard_rows(req: HttpRequest, state: Data<AppState>) -> HttpResponse {
    let (id, fresh) = session_id(&req);
    let mut model = state.sessions.leaderboard(id).await;
    run_leaderboard(
        &mut model,
        Msg::Refresh,
        Deps {
            api: state.api.as_ref(),
        },
    )
    .await;
    state.sessions.store_leaderboard(id, model.clone()).await;
    html_response(render_leaderboard(&model), id, fresh)
}
