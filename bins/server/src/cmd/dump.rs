use std::io::Write;

use scan_engine::Invocation;

use crate::config::CommonArgs;
use crate::error::ServerError;

pub async fn run(args: CommonArgs) -> Result<(), ServerError> {
    let config = args.resolve()?;
    let handler = super::build_handler(&config).await;

    let envelope = handler.handle(&Invocation::default()).await?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "{}", envelope.body)?;
    Ok(())
}
