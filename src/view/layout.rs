use maud::{DOCTYPE, Markup, html};

use crate::HTMX_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Scorer,
    Leaderboard,
}

/// Shared page shell: header with navigation, then `content`.
///
/// Links are relative so the app works when mounted under a path prefix.
#[must_use]
pub fn render_page(title: &str, active: Screen, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                link rel="stylesheet" href="static/app.css";
                title { (title) }
                script src=(HTMX_PATH) defer integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" crossorigin="anonymous" {}
            }
            body {
                header class="topbar" {
                    div class="topbar-inner" {
                        div class="brand" { "⛳ Golf Score" }
                        nav {
                            a.nav-link.active[active == Screen::Scorer] href="./" { "Scorer" }
                            a.nav-link.active[active == Screen::Leaderboard] href="leaderboard" { "Leaderboard" }
                        }
                    }
                }
                main class="page" {
                    (content)
                }
            }
        }
    }
}
