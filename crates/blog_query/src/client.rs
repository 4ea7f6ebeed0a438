use std::fmt;
use std::sync::Arc;
use blog_core::{Article, ArticleApi, ArticleId, ArticleInput, Result};
use tracing::info;
use crate::cache::{QueryCache, QueryState};
use crate::mutation::CreateArticleMutation;
use crate::observer::{DetailQuery, ListQuery};
use crate::retry::RetryPolicy;

/// Key of the one list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArticlesKey;

/// Key of a detail query: the entity kind is the type, the id is the value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleKey(pub ArticleId);

pub type ArticleList = Arc<Vec<Article>>;

/// Session-wide query cache in front of an `ArticleApi`.
///
/// Cloning is cheap and every clone shares the same cache.
#[derive(Clone)]
pub struct QueryClient {
    api: Arc<dyn ArticleApi>,
    lists: QueryCache<ArticlesKey, ArticleList>,
    details: QueryCache<ArticleKey, Arc<Article>>,
    retry: RetryPolicy,
}

impl fmt::Debug for QueryClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl QueryClient {
    pub fn new(api: Arc<dyn ArticleApi>) -> Self {
        Self {
            api,
            lists: QueryCache::new(),
            details: QueryCache::new(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub async fn fetch_articles(&self) -> Result<ArticleList> {
        let api = self.api.clone();
        let retry = self.retry;
        self.lists
            .fetch(ArticlesKey, move || async move {
                let api = api.as_ref();
                retry.run(move || api.list_articles()).await.map(Arc::new)
            })
            .await
    }

    pub async fn fetch_article(&self, id: &ArticleId) -> Result<Arc<Article>> {
        let api = self.api.clone();
        let retry = self.retry;
        let id = id.clone();
        self.details
            .fetch(ArticleKey(id.clone()), move || async move {
                let api = api.as_ref();
                let id = &id;
                retry.run(move || api.get_article(id)).await.map(Arc::new)
            })
            .await
    }

    /// Creates an article and marks the list stale. The new article is not
    /// spliced into the cached list and detail entries are left alone.
    pub async fn create_article(&self, input: &ArticleInput) -> Result<Article> {
        let article = self.api.create_article(input).await?;
        info!("✨ Created article {} ({})", article.id, article.title);
        self.invalidate_articles();
        Ok(article)
    }

    pub fn invalidate_articles(&self) {
        self.lists.invalidate(&ArticlesKey);
    }

    pub fn invalidate_article(&self, id: &ArticleId) {
        self.details.invalidate(&ArticleKey(id.clone()));
    }

    pub fn articles_state(&self) -> QueryState<ArticleList> {
        self.lists.state(&ArticlesKey)
    }

    pub fn article_state(&self, id: &ArticleId) -> QueryState<Arc<Article>> {
        self.details.state(&ArticleKey(id.clone()))
    }

    pub fn articles_stale(&self) -> bool {
        self.lists.is_stale(&ArticlesKey)
    }

    pub fn article_stale(&self, id: &ArticleId) -> bool {
        self.details.is_stale(&ArticleKey(id.clone()))
    }

    pub fn list_query(&self) -> ListQuery {
        ListQuery::new(self.clone(), self.lists.subscribe(&ArticlesKey))
    }

    pub fn detail_query(&self) -> DetailQuery {
        DetailQuery::new(self.clone())
    }

    pub fn create_mutation(&self) -> CreateArticleMutation {
        CreateArticleMutation::new(self.clone())
    }

    pub(crate) fn details(&self) -> &QueryCache<ArticleKey, Arc<Article>> {
        &self.details
    }
}
