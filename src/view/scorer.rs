use chrono::{DateTime, Utc};
use maud::{Markup, html};
use serde_json::json;

use crate::model::{Direction, Player};
use crate::mvu::scorer::{Busy, ScorerModel, TOAST_MILLIS};

pub const EMPTY_SCORER: &str = "Enter a group and press Load to start scoring";
const QUICK_PICKS: std::ops::RangeInclusive<u8> = 3..=7;
const DISABLE_WHILE_BUSY: &str = "#scorer button, #scorer input.score";

/// The whole scorer panel. Every action swaps this element.
#[must_use]
pub fn render_scorer(model: &ScorerModel, now: DateTime<Utc>) -> Markup {
    let progress = model.progress();
    let idle = model.busy.is_none();
    html! {
        div id="scorer" class="scorer" {
            div class="controls" {
                div class="controls-head" {
                    div class="title" { "⛳ Scorer" }
                    div class="progress" {
                        "Filled: "
                        span class="strong" { (progress.filled) "/" (progress.total) }
                    }
                }

                div id="scorer-fields" class="fields" {
                    label class="field field-group" {
                        span { "Group" }
                        input type="text" name="group" placeholder="G01" value=(model.group_id);
                    }
                    label class="field field-pin" {
                        span { "PIN" }
                        input type="text" name="pin" placeholder="482913" inputmode="numeric" value=(model.pin);
                    }
                }

                div class="hole-bar" {
                    button class="square"
                        hx-post="scorer/hole" hx-vals=(json!({"dir": "prev"}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        disabled[!model.can_step(Direction::Prev)] { "◀" }
                    div class="hole" { "Hole " (model.hole) }
                    button class="square"
                        hx-post="scorer/hole" hx-vals=(json!({"dir": "next"}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        disabled[!model.can_step(Direction::Next)] { "▶" }
                    div class="spacer" {}
                    button class="load"
                        hx-post="scorer/load"
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        disabled[!idle] {
                        @if model.busy == Some(Busy::Loading) { "Loading..." } @else { "Load" }
                    }
                    button class="save"
                        hx-post="scorer/submit"
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        hx-confirm=(format!("Confirm save • {} • Hole {}?", model.group_id.trim(), model.hole))
                        disabled[!idle || model.players.is_empty()] {
                        @if model.busy == Some(Busy::Saving) { "Saving..." } @else { "Save" }
                    }
                }

                @if let Some(err) = &model.error {
                    div class="error" role="alert" { (err) }
                }
                (render_toast(model, now))
            }

            @if model.players.is_empty() {
                div class="empty" { (EMPTY_SCORER) }
            } @else {
                div class="cards" {
                    @for (idx, player) in model.players.iter().enumerate() {
                        (render_player_card(idx, player, idle))
                    }
                }
            }
        }
    }
}

fn render_player_card(idx: usize, player: &Player, idle: bool) -> Markup {
    let id = player.player_id.key();
    let current = player.score.value();
    html! {
        div class="card" data-player=(id) {
            div class="card-head" {
                div {
                    div class="muted" { "Player " (idx + 1) }
                    div class="name" { (player.name) }
                }
                div class="adjust" {
                    button class="square bump"
                        hx-post="scorer/bump" hx-vals=(json!({"player": id, "delta": -1}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        disabled[!idle] { "−" }
                    input class="score" type="text" inputmode="numeric" name="value" placeholder="—"
                        value=(current.map(|v| v.to_string()).unwrap_or_default())
                        hx-post="scorer/score" hx-trigger="change"
                        hx-vals=(json!({"player": id}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        disabled[!idle];
                    button class="square bump"
                        hx-post="scorer/bump" hx-vals=(json!({"player": id, "delta": 1}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        hx-disabled-elt=(DISABLE_WHILE_BUSY)
                        disabled[!idle] { "+" }
                }
            }
            div class="quick" {
                @for n in QUICK_PICKS {
                    button.pick.selected[current == Some(n)]
                        hx-post="scorer/score" hx-vals=(json!({"player": id, "value": n.to_string()}).to_string())
                        hx-include="#scorer-fields" hx-target="#scorer" hx-swap="outerHTML"
                        disabled[!idle] { (n) }
                }
            }
            div class="tip muted" { "Tip: tap 3–7 for quick entry, or use +/−" }
        }
    }
}

/// Confirmation banner. While visible it polls once its time is up so the
/// server can drop it.
#[must_use]
pub fn render_toast(model: &ScorerModel, now: DateTime<Utc>) -> Markup {
    match (model.visible_toast(now), model.toast.as_ref()) {
        (Some(text), Some(toast)) => {
            let elapsed = (now - toast.shown_at).num_milliseconds().max(0);
            let remaining = (TOAST_MILLIS - elapsed).max(0);
            html! {
                div id="toast" class="toast" role="status"
                    hx-get="scorer/toast" hx-trigger=(format!("load delay:{remaining}ms")) hx-swap="outerHTML" {
                    (text)
                }
            }
        }
        _ => html! { div id="toast" {} },
    }
}
