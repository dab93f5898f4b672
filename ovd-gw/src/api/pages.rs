//! Page routes
//!
//! The navigation surface only: small HTML documents embedded in the
//! binary. The detector page is gated; unauthenticated viewers are
//! redirected to the login entry point.

use crate::api::AppContext;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::debug;

const HOME_HTML: &str = include_str!("../pages/home.html");
const LOGIN_HTML: &str = include_str!("../pages/login.html");
const SIGNUP_HTML: &str = include_str!("../pages/signup.html");
const ABOUT_HTML: &str = include_str!("../pages/about.html");
const DETECTOR_HTML: &str = include_str!("../pages/detector.html");

/// GET / - Home page
pub async fn home() -> Html<&'static str> {
    Html(HOME_HTML)
}

/// GET /login - Login entry point
pub async fn login() -> Html<&'static str> {
    Html(LOGIN_HTML)
}

/// GET /signup - Signup page
pub async fn signup() -> Html<&'static str> {
    Html(SIGNUP_HTML)
}

/// GET /about - Informational page
pub async fn about() -> Html<&'static str> {
    Html(ABOUT_HTML)
}

/// GET /detector - Gated detector page
pub async fn detector(State(ctx): State<AppContext>) -> Response {
    if ctx.gate.current_identity().await.is_none() {
        debug!("Unauthenticated viewer redirected to /login");
        return Redirect::to("/login").into_response();
    }
    Html(DETECTOR_HTML).into_response()
}
