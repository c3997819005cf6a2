// ════════════════════════════════════════════════════════════════
//  Configuration
// ════════════════════════════════════════════════════════════════

fn default_table() -> String {
    "movies".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DynamoTableConfig {
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Override of the service endpoint, e.g. `http://localhost:8000` for
    /// DynamoDB Local.
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for DynamoTableConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            region: default_region(),
            endpoint_url: None,
        }
    }
}
