//! Landing redirect and embedded static test client.
//!
//! Trivial glue around the relay: the router neither serves nor depends
//! on this page beyond accepting connections at `/ws`.

use axum::response::{Html, Redirect};

/// GET / — redirect to the test client.
pub async fn landing() -> Redirect {
    Redirect::to("/client")
}

/// GET /client — static HTML/JS test client.
pub async fn client_page() -> Html<&'static str> {
    Html(include_str!("../../static/client.html"))
}
