use crate::{cli, config::Config, info, success};

pub async fn auth(config: &Config) {
    let session = cli::connect(config).await;

    success!("Authentication successful!");
    if let Some(token) = session.tokens().current() {
        info!("Granted scopes: {}", token.scope);
        info!(
            "Access token valid until {}",
            token.expires_at.format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
}
