use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::config::ServeArgs;
use crate::error::ServerError;

pub async fn run(args: ServeArgs) -> Result<(), ServerError> {
    let config = args.common.resolve()?;
    let port = args.port.unwrap_or(config.api_port);
    let handler = Arc::new(super::build_handler(&config).await);

    // --- CancellationToken for graceful shutdown ---
    let token = CancellationToken::new();

    let api_token = token.clone();
    let mut api_handle: JoinHandle<Result<(), String>> =
        tokio::spawn(async move { scan_api_server::run(port, handler, api_token).await });

    tracing::info!(port, "server ready");

    tokio::select! {
        res = &mut api_handle => return api_result(res),
        res = tokio::signal::ctrl_c() => {
            res?;
            tracing::info!("shutting down...");
            token.cancel();
        }
    }

    api_result(api_handle.await)?;
    tracing::info!("shutdown complete");
    Ok(())
}

fn api_result(res: Result<Result<(), String>, tokio::task::JoinError>) -> Result<(), ServerError> {
    res.map_err(|e| ServerError::Api(format!("api task: {e}")))?
        .map_err(ServerError::Api)
}
