use axum::{routing::get, Json, Router};
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::state::AppState;

const QUOTES: &[&str] = &[
    "Consistency beats talent when talent stops practicing.",
    "One checkbox today is one step closer to your offer letter.",
    "You don't need motivation. You need discipline.",
    "Placements are not luck. They are logged effort.",
    "Even 30 minutes daily beats zero hours perfectly.",
    "Success is the sum of small efforts, repeated day in and day out.",
    "Don't watch the clock; do what it does. Keep going.",
    "The secret of getting ahead is getting started.",
    "It always seems impossible until it's done.",
    "Dream big. Start small. Act now.",
];

#[derive(Debug, Serialize)]
pub struct Quote {
    pub quote: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/motivation", get(motivation))
}

pub async fn motivation() -> Json<Quote> {
    let quote = QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0]);
    Json(Quote { quote })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn always_returns_a_known_quote() {
        for _ in 0..20 {
            let Json(q) = motivation().await;
            assert!(QUOTES.contains(&q.quote));
        }
    }
}
