use std::fmt;
use async_trait::async_trait;
use blog_core::{Article, ArticleApi, ArticleId, ArticleInput, Error, Result};
use reqwest::{Response, StatusCode};
use tracing::debug;
use crate::config::ClientConfig;

/// `ArticleApi` over the store's REST resource.
pub struct HttpArticleClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl fmt::Debug for HttpArticleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpArticleClient")
            .field("base_url", &self.config.base_url)
            .field("resource", &self.config.resource)
            .finish()
    }
}

impl HttpArticleClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        // fail early on a bad base URL rather than on the first request
        config.collection_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

#[async_trait]
impl ArticleApi for HttpArticleClient {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let url = self.config.collection_url()?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        let articles: Vec<Article> = check_status(response, None).await?.json().await?;
        debug!("Fetched {} articles", articles.len());
        Ok(articles)
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article> {
        let url = self.config.item_url(id)?;
        debug!("GET {}", url);
        let response = self.http.get(url).send().await?;
        Ok(check_status(response, Some(id)).await?.json().await?)
    }

    async fn create_article(&self, input: &ArticleInput) -> Result<Article> {
        let url = self.config.collection_url()?;
        debug!("POST {} ({})", url, input.title);
        let response = self.http.post(url).json(input).send().await?;
        let article: Article = check_status(response, None).await?.json().await?;
        debug!("Created article {}", article.id);
        Ok(article)
    }
}

/// Maps non-2xx answers onto the error taxonomy. A 404 is only `NotFound`
/// when a single article was requested.
async fn check_status(response: Response, requested: Option<&ArticleId>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status.canonical_reason().unwrap_or("unknown status").to_string()
    } else {
        body
    };

    Err(match (status, requested) {
        (StatusCode::NOT_FOUND, Some(id)) => Error::NotFound(id.clone()),
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => Error::Validation(message),
        _ => Error::Server {
            status: status.as_u16(),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_rejects_bad_base_url() {
        let result = HttpArticleClient::new(ClientConfig::new("::nope::"));
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_unreachable_store_is_network_error() {
        // port 9 (discard) is almost never listening
        let config = ClientConfig::new("http://127.0.0.1:9")
            .with_timeout(std::time::Duration::from_secs(2));
        let client = HttpArticleClient::new(config).unwrap();
        let err = client.list_articles().await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "unexpected error: {:?}", err);
        assert!(err.is_retryable());
    }
}
