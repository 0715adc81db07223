#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::web::{self, Bytes, Data};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use golf_scorer::error::AppError;
use golf_scorer::gateway::ScoreApi;
use golf_scorer::model::{
    GroupSnapshot, Leaderboard, Player, PlayerId, Score, SubmitHole, SubmitReceipt,
};

/// What the fake sheet endpoint saw and what it will answer, keyed by `op`.
#[derive(Clone, Default)]
pub struct SheetState {
    pub hits: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
    replies: Arc<Mutex<HashMap<String, VecDeque<(u16, String)>>>>,
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub query: HashMap<String, String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl SheetState {
    /// Queue a reply for `op`. The last queued reply keeps being served.
    pub fn reply(&self, op: &str, status: u16, body: &str) {
        self.replies
            .lock()
            .unwrap()
            .entry(op.to_string())
            .or_default()
            .push_back((status, body.to_string()));
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }

    fn next_reply(&self, op: &str) -> (u16, String) {
        let mut replies = self.replies.lock().unwrap();
        match replies.get_mut(op) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if queue.len() == 1 => queue[0].clone(),
            _ => (404, r#"{"message":"unknown op"}"#.to_string()),
        }
    }
}

async fn fake_sheet(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    body: Bytes,
    state: Data<SheetState>,
) -> HttpResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let body = String::from_utf8_lossy(&body).to_string();
    let op = if req.method() == actix_web::http::Method::POST {
        serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("op").and_then(Value::as_str).map(String::from))
            .unwrap_or_default()
    } else {
        query.get("op").cloned().unwrap_or_default()
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        query: query.into_inner(),
        content_type: req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        body,
    });
    let (status, reply) = state.next_reply(&op);
    HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
        .content_type("application/json")
        .body(reply)
}

/// Serves the fake sheet on an ephemeral port; returns its `/exec` URL.
pub async fn start_fake_sheet(state: SheetState) -> std::io::Result<(String, ServerHandle)> {
    let data = state.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(Data::new(data.clone()))
            .default_service(web::to(fake_sheet))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}/exec"), handle))
}

/// In-process stand-in for the sheet that keeps per-hole scores like the
/// real one does.
pub struct MemoryApi {
    roster: Vec<(String, String)>,
    pub scores: Mutex<HashMap<u8, HashMap<String, Score>>>,
    pub completed: Mutex<Vec<i64>>,
    pub group_calls: Mutex<Vec<(String, u8)>>,
    pub submits: Mutex<Vec<SubmitHole>>,
    pub leaderboard_calls: AtomicUsize,
    pub leaderboard: Mutex<Result<Leaderboard, AppError>>,
    pub submit_failure: Mutex<Option<AppError>>,
    pub mark_completed_on_submit: bool,
    /// Applied by the "server" after storing a submission.
    pub correction_on_submit: Option<(String, i64)>,
}

impl MemoryApi {
    pub fn new(roster: &[(&str, &str)]) -> Self {
        Self {
            roster: roster
                .iter()
                .map(|(id, name)| ((*id).to_string(), (*name).to_string()))
                .collect(),
            scores: Mutex::new(HashMap::new()),
            completed: Mutex::new(Vec::new()),
            group_calls: Mutex::new(Vec::new()),
            submits: Mutex::new(Vec::new()),
            leaderboard_calls: AtomicUsize::new(0),
            leaderboard: Mutex::new(Ok(Leaderboard::default())),
            submit_failure: Mutex::new(None),
            mark_completed_on_submit: true,
            correction_on_submit: None,
        }
    }

    pub fn with_completed(self, holes: &[i64]) -> Self {
        *self.completed.lock().unwrap() = holes.to_vec();
        self
    }

    pub fn network_calls(&self) -> usize {
        self.group_calls.lock().unwrap().len()
            + self.submits.lock().unwrap().len()
            + self.leaderboard_calls.load(Ordering::SeqCst)
    }

    pub fn group_calls(&self) -> Vec<(String, u8)> {
        self.group_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoreApi for MemoryApi {
    async fn leaderboard(&self) -> Result<Leaderboard, AppError> {
        self.leaderboard_calls.fetch_add(1, Ordering::SeqCst);
        self.leaderboard.lock().unwrap().clone()
    }

    async fn group(&self, group_id: &str, hole: u8) -> Result<GroupSnapshot, AppError> {
        self.group_calls
            .lock()
            .unwrap()
            .push((group_id.to_string(), hole));
        let scores = self.scores.lock().unwrap();
        let hole_scores = scores.get(&hole);
        Ok(GroupSnapshot {
            players: self
                .roster
                .iter()
                .map(|(id, name)| Player {
                    player_id: PlayerId::Text(id.clone()),
                    name: name.clone(),
                    score: hole_scores
                        .and_then(|s| s.get(id))
                        .copied()
                        .unwrap_or(Score::UNSET),
                })
                .collect(),
            completed_holes: self.completed.lock().unwrap().clone(),
        })
    }

    async fn submit_hole(&self, body: &SubmitHole) -> Result<SubmitReceipt, AppError> {
        self.submits.lock().unwrap().push(body.clone());
        if let Some(err) = self.submit_failure.lock().unwrap().clone() {
            return Err(err);
        }
        let mut scores = self.scores.lock().unwrap();
        let hole_scores = scores.entry(body.hole).or_default();
        for entry in &body.scores {
            hole_scores.insert(entry.player_id.to_string(), entry.value);
        }
        if let Some((player, strokes)) = &self.correction_on_submit {
            hole_scores.insert(player.clone(), Score::new(*strokes).unwrap_or(Score::UNSET));
        }
        if self.mark_completed_on_submit {
            self.completed.lock().unwrap().push(i64::from(body.hole));
        }
        Ok(SubmitReceipt { message: None })
    }
}
