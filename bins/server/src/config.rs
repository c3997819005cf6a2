use std::num::NonZeroUsize;

use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use storage_dynamodb::DynamoTableConfig;

use crate::error::ServerError;

#[derive(Parser)]
#[command(name = "scan-server", about = "Dump a DynamoDB table as a JSON array")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run under the AWS Lambda runtime (API Gateway events)
    Lambda(CommonArgs),
    /// Serve the handler over local HTTP
    Serve(ServeArgs),
    /// Run one invocation and print the body to stdout
    Dump(CommonArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    /// Path to a TOML config file
    #[arg(long, env = "CONFIG_PATH")]
    pub config: Option<String>,

    /// Table to scan
    #[arg(long, env = "TABLE_NAME")]
    pub table: Option<String>,

    /// AWS region of the table
    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    /// DynamoDB endpoint override (DynamoDB Local)
    #[arg(long, env = "DYNAMODB_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// Fail instead of scanning past this many pages
    #[arg(long, env = "MAX_SCAN_PAGES")]
    pub max_pages: Option<NonZeroUsize>,
}

#[derive(Args, Clone, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// HTTP port, overrides `api_port` from the config file
    #[arg(long, env = "API_PORT")]
    pub port: Option<u16>,
}

// ---- TOML Config ----

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_api_port")]
    pub api_port: u16,
    /// Page ceiling for a single scan. Absent means unbounded.
    #[serde(default)]
    pub max_pages: Option<NonZeroUsize>,
    #[serde(default)]
    pub dynamodb: DynamoTableConfig,
}

fn default_api_port() -> u16 {
    9200
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_port: default_api_port(),
            max_pages: None,
            dynamodb: DynamoTableConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<Self, ServerError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ServerError::Config { context: "read", detail: format!("'{path}': {e}") })?;
        Self::parse(&content)
            .map_err(|e| ServerError::Config { context: "parse", detail: format!("'{path}': {e}") })
    }

    pub fn parse(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

impl CommonArgs {
    /// Config file (or defaults) with command-line / environment overrides applied.
    pub fn resolve(&self) -> Result<ServerConfig, ServerError> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };
        if let Some(table) = &self.table {
            config.dynamodb.table = table.clone();
        }
        if let Some(region) = &self.region {
            config.dynamodb.region = region.clone();
        }
        if let Some(url) = &self.endpoint_url {
            config.dynamodb.endpoint_url = Some(url.clone());
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = Some(max_pages);
        }
        Ok(config)
    }
}
