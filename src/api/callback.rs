use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::types::AuthState;

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthState>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(auth_state) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&auth_state.state) {
        auth_state.outcome = Some(Err("state mismatch on callback".into()));
        return Html("<h4>Login failed: state mismatch.</h4>");
    }

    if let Some(error) = params.get("error") {
        auth_state.outcome = Some(Err(format!("authorization denied: {}", error)));
        return Html("<h4>Login was cancelled.</h4>");
    }

    match params.get("code") {
        Some(code) => {
            auth_state.outcome = Some(Ok(code.clone()));
            Html("<h2>Authentication successful.</h2><p>Close the browser window.</p>")
        }
        None => {
            auth_state.outcome = Some(Err("callback without authorization code".into()));
            Html("<h4>Missing authorization code.</h4>")
        }
    }
}
