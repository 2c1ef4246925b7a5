use std::time::Duration;

use async_trait::async_trait;
use cardkingdom_core::config::CardApiConfig;
use tracing::debug;

use crate::cards::CardQuery;
use crate::error::QueryError;

/// Raw HTTP outcome of a card query.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Source of card data.
///
/// Implementations only report transport problems as errors. Status codes and
/// payload interpretation belong to the caller.
#[async_trait]
pub trait CardApi: Send + Sync {
    async fn fetch(&self, query: &CardQuery) -> Result<ApiResponse, QueryError>;
}

/// Card API reached over HTTP GET.
pub struct HttpCardApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpCardApi {
    pub fn new(config: &CardApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        })
    }

    /// Full request URL for `query`.
    pub fn query_url(&self, query: &CardQuery) -> String {
        format!("{}?{}", self.base_url, query.query_string(&self.token))
    }
}

#[async_trait]
impl CardApi for HttpCardApi {
    async fn fetch(&self, query: &CardQuery) -> Result<ApiResponse, QueryError> {
        let url = self.query_url(query);
        debug!(single = query.is_single(), "requesting cards");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| QueryError::Transport(e.without_url().to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| QueryError::Transport(e.without_url().to_string()))?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str) -> HttpCardApi {
        HttpCardApi::new(&CardApiConfig {
            base_url: base_url.to_string(),
            token: "tok".to_string(),
            timeout_secs: 1,
        })
        .unwrap()
    }

    #[test]
    fn url_by_uuid() {
        let url = api("https://cards.example/api").query_url(&CardQuery::ByUuid("abc".into()));
        assert_eq!(url, "https://cards.example/api?uuid=abc&token=tok");
    }

    #[test]
    fn url_by_name_keeps_filters() {
        let url = api("https://cards.example/api")
            .query_url(&CardQuery::ByName("Shock&set=M19".into()));
        assert_eq!(url, "https://cards.example/api?name=Shock&set=M19&token=tok");
    }

    #[test]
    fn built_request_keeps_token_after_hash() {
        let api = api("https://cards.example/api");
        let url = api.query_url(&CardQuery::ByName("Bolt#2&set=LEA".into()));
        let req = api.client.get(&url).build().unwrap();
        assert_eq!(req.url().fragment(), None);
        assert_eq!(req.url().query(), Some("name=Bolt%232&set=LEA&token=tok"));
        let pairs: Vec<(String, String)> = req
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("name".to_string(), "Bolt#2".to_string())));
        assert!(pairs.contains(&("token".to_string(), "tok".to_string())));
    }

    #[tokio::test]
    async fn unparseable_url_is_a_transport_error() {
        let err = api("not a url")
            .fetch(&CardQuery::ByUuid("abc".into()))
            .await
            .unwrap_err();
        assert_eq!(err.tag(), "001");
    }
}
