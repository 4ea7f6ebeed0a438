use async_trait::async_trait;
use crate::types::{Article, ArticleId, ArticleInput};
use crate::Result;

/// Remote operations on the article collection.
///
/// Implementations talk to the store and nothing else: no caching, no retries.
#[async_trait]
pub trait ArticleApi: Send + Sync {
    /// Fetch every article in store order
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Fetch one article, `Error::NotFound` when the id is unknown
    async fn get_article(&self, id: &ArticleId) -> Result<Article>;

    /// Submit a new article; the store assigns and returns the id
    async fn create_article(&self, input: &ArticleInput) -> Result<Article>;
}
