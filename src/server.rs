use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{Res, api, types::AuthState};

pub fn router(state: Arc<Mutex<Option<AuthState>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Binds the callback server address.
///
/// Done before the login starts so an occupied port fails right away.
pub async fn bind(server_addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(server_addr)
        .map_err(|e| format!("Failed to parse server address {}: {}", server_addr, e))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", addr, e))?;
    Ok(listener)
}

pub async fn start_api_server(
    listener: TcpListener,
    state: Arc<Mutex<Option<AuthState>>>,
) -> Res<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
