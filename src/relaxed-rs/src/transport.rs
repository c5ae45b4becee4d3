use anyhow::{Context, Result};
use relaxed_core::{ClientConfig, Method, PreparedRequest, RawResponse, Transport};
use reqwest::Client as HttpClient;
use std::collections::HashMap;
use std::time::Duration;

/// reqwest-backed transport rooted at the server's base URL
pub struct HttpTransport {
    base_url: String,
    client: HttpClient,
    credentials: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: HttpClient::new(),
            credentials: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let credentials = match (&config.name, &config.password) {
            (Some(name), Some(password)) => Some((name.clone(), password.clone())),
            (Some(name), None) => Some((name.clone(), String::new())),
            _ => None,
        };

        Ok(Self {
            base_url: config.base_url(),
            client: builder.build().context("Failed to build HTTP client")?,
            credentials,
        })
    }

    pub fn with_basic_auth(mut self, name: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((name.into(), password.into()));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn http_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Head => reqwest::Method::HEAD,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &PreparedRequest) -> Result<RawResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self.client.request(http_method(request.method), &url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some((name, password)) = &self.credentials {
            builder = builder.basic_auth(name, Some(password));
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("{} {} failed", request.method, url))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await.context("Failed to read response body")?;

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relaxed_core::{bind, catalog, KeyPolicy, Params, Segments};
    use serde_json::json;
    use wiremock::matchers::{body_json, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_get_sends_query() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/_all_dbs"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(["_users"])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let request = bind(
            &catalog::ALL_DBS,
            &Segments::new(),
            &Params::new().with("limit", 5),
            None,
            KeyPolicy::Permissive,
        )
        .unwrap();
        let response = transport.execute(&request).await.expect("response");

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"["_users"]"#.to_vec());

        let received = server.received_requests().await.unwrap();
        assert_eq!(received[0].url.query(), Some("limit=5"));
    }

    #[tokio::test]
    async fn test_post_sends_json_body_with_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/_dbs_info"))
            .and(header_exists("authorization"))
            .and(body_json(json!({"keys": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri()).with_basic_auth("admin", "secret");
        let request = bind(
            &catalog::DBS_INFO,
            &Segments::new(),
            &Params::new().with("keys", json!(["a", "b"])),
            None,
            KeyPolicy::Permissive,
        )
        .unwrap();
        let response = transport.execute(&request).await.expect("response");
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_error_status_is_not_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404).insert_header("ETag", "\"1-x\""))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(server.uri());
        let request = bind(
            &catalog::DB_EXISTS,
            &Segments::new().with("db", "missing"),
            &Params::new(),
            None,
            KeyPolicy::Permissive,
        )
        .unwrap();
        let response = transport.execute(&request).await.expect("response");
        assert_eq!(response.status, 404);
        assert_eq!(response.header("etag"), Some("\"1-x\""));
    }

    #[tokio::test]
    async fn test_connection_refused_is_error() {
        let transport = HttpTransport::new("http://127.0.0.1:9");
        let request = bind(&catalog::INFO, &Segments::new(), &Params::new(), None, KeyPolicy::Permissive).unwrap();
        assert!(transport.execute(&request).await.is_err());
    }

    #[test]
    fn test_from_config() {
        let config = ClientConfig::default().with_credentials("test", "test");
        let transport = HttpTransport::from_config(&config).unwrap();
        assert_eq!(transport.base_url(), "http://127.0.0.1:5984");
        assert!(transport.credentials.is_some());
    }
}
