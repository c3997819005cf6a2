use std::collections::BTreeMap;

use serde::Serialize;

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Synchronous HTTP-style response, serialized in API Gateway proxy shape
/// (`statusCode`, `headers`, `body`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ResponseEnvelope {
    /// 200 with a JSON body and the single `Content-Type` header.
    pub fn json(body: String) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());
        Self {
            status_code: 200,
            headers,
            body,
        }
    }

    /// Convert into an `http::Response` for HTTP front-ends.
    pub fn into_http<B: From<String>>(self) -> Result<http::Response<B>, http::Error> {
        let mut builder = http::Response::builder().status(self.status_code);
        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder.body(B::from(self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_proxy_shape() {
        let envelope = ResponseEnvelope::json("[]".to_string());
        let value = serde_json::to_value(&envelope).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "statusCode": 200,
                "headers": {"Content-Type": "application/json"},
                "body": "[]"
            })
        );
    }

    #[test]
    fn converts_to_http_response() {
        let response: http::Response<String> = ResponseEnvelope::json("[]".to_string())
            .into_http()
            .expect("valid response");
        assert_eq!(response.status(), http::StatusCode::OK);
        assert_eq!(
            response.headers().get(http::header::CONTENT_TYPE).map(|v| v.as_bytes()),
            Some(CONTENT_TYPE_JSON.as_bytes())
        );
        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.body(), "[]");
    }
}
