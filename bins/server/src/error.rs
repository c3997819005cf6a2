#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("{0}")]
    Engine(#[from] scan_engine::EngineError),

    #[error("lambda runtime: {0}")]
    Lambda(lambda_http::Error),

    #[error("http api: {0}")]
    Api(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
