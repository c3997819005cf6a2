use lambda_http::{Body, Request, RequestExt, Response, service_fn};

use scan_engine::Invocation;

use crate::config::CommonArgs;
use crate::error::ServerError;

pub async fn run(args: CommonArgs) -> Result<(), ServerError> {
    let config = args.resolve()?;
    let handler = super::build_handler(&config).await;
    let handler = &handler;

    lambda_http::run(service_fn(move |event: Request| async move {
        let invocation = Invocation {
            request_id: event.lambda_context_ref().map(|ctx| ctx.request_id.clone()),
        };
        let envelope = handler.handle(&invocation).await?;
        let response: Response<Body> = envelope.into_http()?;
        Ok::<_, lambda_http::Error>(response)
    }))
    .await
    .map_err(ServerError::Lambda)
}
