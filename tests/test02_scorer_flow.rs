use std::sync::Arc;
use uuid::Uuid;

use golf_scorer::error::AppError;
use golf_scorer::model::{Direction, PlayerId};
use golf_scorer::mvu::runtime::run_scorer;
use golf_scorer::mvu::scorer::{Msg, ScorerModel, ScorerState};
use golf_scorer::session::SessionStore;

mod common;
use common::MemoryApi;

const ROSTER: &[(&str, &str)] = &[("P1", "Ann"), ("P2", "Bo"), ("P3", "Cy")];

fn key(id: &str) -> String {
    PlayerId::Text(id.to_string()).key()
}

async fn send(store: &SessionStore, id: Uuid, api: &Arc<MemoryApi>, msg: Msg) -> ScorerModel {
    run_scorer(store, id, msg, api.clone()).await
}

async fn load(store: &SessionStore, id: Uuid, api: &Arc<MemoryApi>, group: &str, pin: &str) -> ScorerModel {
    send(
        store,
        id,
        api,
        Msg::FieldsEdited {
            group_id: group.to_string(),
            pin: pin.to_string(),
        },
    )
    .await;
    send(store, id, api, Msg::LoadRequested).await
}

#[tokio::test]
async fn test02_completed_hole_advances_to_first_open() {
    let api = Arc::new(MemoryApi::new(ROSTER).with_completed(&[1]));
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    let model = load(&store, id, &api, "G01", "").await;
    assert_eq!(model.hole, 2);
    assert_eq!(model.state(), ScorerState::Loaded);
    assert_eq!(model.players.len(), 3);
    assert_eq!(
        api.group_calls(),
        vec![("G01".to_string(), 1), ("G01".to_string(), 2)]
    );
    assert_eq!(model.available_holes(), (2..=18).collect::<Vec<u8>>());
    assert_eq!(model.visible_toast(chrono::Utc::now()), Some("Loaded G01 • Hole 2"));
}

#[tokio::test]
async fn test02_empty_group_and_pin_never_hit_network() {
    let api = Arc::new(MemoryApi::new(ROSTER));
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    let model = load(&store, id, &api, "   ", "1234").await;
    assert_eq!(model.state(), ScorerState::Empty);
    let model = send(&store, id, &api, Msg::SubmitRequested).await;
    assert!(model.busy.is_none());
    assert_eq!(api.network_calls(), 0);

    let model = load(&store, id, &api, "G01", "  ").await;
    assert_eq!(model.players.len(), 3);
    let before = api.network_calls();
    send(&store, id, &api, Msg::SubmitRequested).await;
    assert_eq!(api.network_calls(), before);
    assert!(api.submits.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test02_submit_reloads_from_server() {
    let mut api = MemoryApi::new(ROSTER);
    api.mark_completed_on_submit = false;
    api.correction_on_submit = Some(("P2".to_string(), 6));
    let api = Arc::new(api);
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    load(&store, id, &api, "G01", " 1234 ").await;
    send(
        &store,
        id,
        &api,
        Msg::ScoreEntered {
            player: key("P1"),
            raw: "5".into(),
        },
    )
    .await;
    let model = send(
        &store,
        id,
        &api,
        Msg::ScoreBumped {
            player: key("P3"),
            delta: 1,
        },
    )
    .await;
    assert_eq!(model.progress().filled, 2);

    let model = send(&store, id, &api, Msg::SubmitRequested).await;

    let submits = api.submits.lock().unwrap().clone();
    assert_eq!(submits.len(), 1);
    assert_eq!(submits[0].pin, "1234");
    assert_eq!(submits[0].hole, 1);
    assert!(!submits[0].scores[1].value.is_set());

    // Reloaded the same hole; P2 now carries the server's value.
    assert_eq!(
        api.group_calls(),
        vec![("G01".to_string(), 1), ("G01".to_string(), 1)]
    );
    let values: Vec<Option<u8>> = model.players.iter().map(|p| p.score.value()).collect();
    assert_eq!(values, vec![Some(5), Some(6), Some(1)]);
    assert_eq!(model.visible_toast(chrono::Utc::now()), Some("Saved Hole 1"));
    assert_eq!(model.state(), ScorerState::Loaded);
}

#[tokio::test]
async fn test02_submit_marks_hole_and_moves_on() {
    let api = Arc::new(MemoryApi::new(ROSTER));
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    load(&store, id, &api, "G01", "1234").await;
    let model = send(&store, id, &api, Msg::SubmitRequested).await;
    assert_eq!(model.hole, 2);
    assert_eq!(model.completed_holes, vec![1]);
    assert_eq!(
        api.group_calls(),
        vec![
            ("G01".to_string(), 1),
            ("G01".to_string(), 1),
            ("G01".to_string(), 2)
        ]
    );
    // Previous is now a boundary: hole 1 is completed.
    let model = send(&store, id, &api, Msg::HoleStepped(Direction::Prev)).await;
    assert_eq!(model.hole, 2);
}

#[tokio::test]
async fn test02_failed_save_keeps_entries() {
    let api = Arc::new(MemoryApi::new(ROSTER));
    *api.submit_failure.lock().unwrap() = Some(AppError::Http {
        status: 401,
        message: "Wrong PIN".into(),
    });
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    load(&store, id, &api, "G01", "0000").await;
    send(
        &store,
        id,
        &api,
        Msg::ScoreEntered {
            player: key("P1"),
            raw: "4".into(),
        },
    )
    .await;
    let model = send(&store, id, &api, Msg::SubmitRequested).await;
    assert_eq!(model.state(), ScorerState::LoadedWithError);
    assert_eq!(model.error.as_deref(), Some("Wrong PIN"));
    assert_eq!(model.players[0].score.value(), Some(4));
    assert_eq!(api.group_calls().len(), 1);
}

#[tokio::test]
async fn test02_navigation_reloads_each_hole() {
    let api = Arc::new(MemoryApi::new(ROSTER).with_completed(&[2, 3]));
    let store = SessionStore::new();
    let id = Uuid::new_v4();

    load(&store, id, &api, "G01", "").await;
    let model = send(&store, id, &api, Msg::HoleStepped(Direction::Prev)).await;
    assert_eq!(model.hole, 1);
    let model = send(&store, id, &api, Msg::HoleStepped(Direction::Next)).await;
    assert_eq!(model.hole, 4);
    assert_eq!(
        api.group_calls(),
        vec![("G01".to_string(), 1), ("G01".to_string(), 4)]
    );
}
