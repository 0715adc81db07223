use maud::{Markup, html};

use crate::mvu::leaderboard::LeaderboardModel;

pub const EMPTY_LEADERBOARD: &str = "No scores yet (or GOLF_API_URL is not configured)";

#[must_use]
pub fn render_leaderboard(model: &LeaderboardModel) -> Markup {
    html! {
        div id="leaderboard" class="leaderboard" {
            div class="leaderboard-head" {
                h1 { "Leaderboard" }
                button class="refresh"
                    hx-get="leaderboard/rows" hx-target="#leaderboard" hx-swap="outerHTML"
                    hx-disabled-elt="this"
                    disabled[model.loading] {
                    @if model.loading { "Loading..." } @else { "Refresh" }
                }
            }

            @if let Some(err) = &model.error {
                div class="error" role="alert" { (err) }
            }

            div class="table-wrap" {
                table class="styled-table" {
                    thead {
                        tr {
                            th class="rank" { "#" }
                            th { "Name" }
                            th { "Group" }
                            th { "Total" }
                        }
                    }
                    tbody {
                        @if model.rows.is_empty() {
                            tr {
                                td class="empty" colspan="4" { (EMPTY_LEADERBOARD) }
                            }
                        } @else {
                            @for (idx, row) in model.rows.iter().enumerate() {
                                tr {
                                    td class="rank" { (idx + 1) }
                                    td { (row.name) }
                                    td { (row.group_display()) }
                                    td class="total" { (row.total_display()) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
