//! Bearer token persisted in `localStorage`.
//!
//! Issuing the token is the login page's job; this module only reads it for
//! outgoing requests and tears the session down when the backend answers 401.

use web_sys::Storage;

const TOKEN_KEY: &str = "token";
const LOGIN_ROUTE: &str = "/login";

fn storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn token() -> Option<String> {
    storage()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
        .filter(|token| !token.trim().is_empty())
}

/// Clears the stored token and sends the browser to the login route.
pub fn end_session() {
    log::warn!("session rejected by the API; redirecting to {LOGIN_ROUTE}");
    if let Some(storage) = storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(LOGIN_ROUTE);
    }
}
