use std::time::Duration;
use blog_core::{ArticleId, Error, Result};
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_RESOURCE: &str = "articles";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub resource: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            resource: DEFAULT_RESOURCE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `{base_url}/{resource}`
    pub fn collection_url(&self) -> Result<Url> {
        self.url_with(&[])
    }

    /// `{base_url}/{resource}/{id}`, with the id percent-encoded.
    pub fn item_url(&self, id: &ArticleId) -> Result<Url> {
        self.url_with(&[id.as_str()])
    }

    fn url_with(&self, extra: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?;
            segments.pop_if_empty();
            segments.extend(self.resource.split('/').filter(|s| !s.is_empty()));
            segments.extend(extra);
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let config = ClientConfig::default();
        assert_eq!(config.collection_url().unwrap().as_str(), "http://localhost:3001/articles");
        assert_eq!(
            config.item_url(&ArticleId::from("12")).unwrap().as_str(),
            "http://localhost:3001/articles/12"
        );
    }

    #[test]
    fn test_base_url_with_path_and_custom_resource() {
        let config = ClientConfig::new("http://example.com/api/").with_resource("blogs");
        assert_eq!(config.collection_url().unwrap().as_str(), "http://example.com/api/blogs");
        assert_eq!(
            config.item_url(&ArticleId::from("a b")).unwrap().as_str(),
            "http://example.com/api/blogs/a%20b"
        );
    }

    #[test]
    fn test_builders_chain() {
        let config = ClientConfig::default()
            .with_url("http://store:4000")
            .with_resource("blogs")
            .with_timeout(Duration::from_secs(2));
        assert_eq!(config.base_url, "http://store:4000");
        assert_eq!(config.collection_url().unwrap().as_str(), "http://store:4000/blogs");
        assert_eq!(config.timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_invalid_base_url() {
        let config = ClientConfig::new("not a url");
        assert!(matches!(config.collection_url(), Err(Error::InvalidUrl(_))));

        let config = ClientConfig::new("mailto:someone@example.com");
        assert!(matches!(config.collection_url(), Err(Error::InvalidUrl(_))));
    }
}
