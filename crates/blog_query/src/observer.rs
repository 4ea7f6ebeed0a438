use std::sync::Arc;
use blog_core::{Article, ArticleId, Result};
use tokio::sync::watch;
use tracing::debug;
use crate::cache::QueryState;
use crate::client::{ArticleKey, ArticleList, QueryClient};

/// Live view of the article list.
///
/// Holds a subscription to the list key for as long as it exists.
pub struct ListQuery {
    client: QueryClient,
    receiver: watch::Receiver<QueryState<ArticleList>>,
}

impl ListQuery {
    pub(crate) fn new(client: QueryClient, receiver: watch::Receiver<QueryState<ArticleList>>) -> Self {
        Self { client, receiver }
    }

    pub fn state(&self) -> QueryState<ArticleList> {
        self.receiver.borrow().clone()
    }

    /// Current list, empty while nothing has loaded.
    pub fn articles(&self) -> ArticleList {
        self.receiver
            .borrow()
            .data
            .clone()
            .unwrap_or_default()
    }

    /// Reads through the cache: refetches only when missing, stale or failed.
    pub async fn fetch(&self) -> Result<ArticleList> {
        self.client.fetch_articles().await
    }

    /// Waits for the next state change. `false` once the cache is gone.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

struct DetailTarget {
    id: ArticleId,
    receiver: watch::Receiver<QueryState<Arc<Article>>>,
}

/// Live view of one article, keyed by an id that may change or be absent.
///
/// With no id the query is disabled: it reports idle and never fetches.
pub struct DetailQuery {
    client: QueryClient,
    target: Option<DetailTarget>,
}

impl DetailQuery {
    pub(crate) fn new(client: QueryClient) -> Self {
        Self { client, target: None }
    }

    pub fn id(&self) -> Option<&ArticleId> {
        self.target.as_ref().map(|t| &t.id)
    }

    /// Points the query at `id`. Returns `true` when the target changed.
    /// The subscription to the previous id is dropped.
    pub fn set_id(&mut self, id: Option<ArticleId>) -> bool {
        if self.id() == id.as_ref() {
            return false;
        }
        debug!("Detail query now targets {:?}", id);
        self.target = id.map(|id| DetailTarget {
            receiver: self.client.details().subscribe(&ArticleKey(id.clone())),
            id,
        });
        true
    }

    pub fn state(&self) -> QueryState<Arc<Article>> {
        match &self.target {
            Some(target) => target.receiver.borrow().clone(),
            None => QueryState::idle(),
        }
    }

    /// Whether a result for `id` still belongs on screen. Results for an id
    /// the query has moved away from are stale and must be dropped.
    pub fn accepts(&self, id: &ArticleId) -> bool {
        self.id() == Some(id)
    }

    /// Reads the current target through the cache; `None` when disabled.
    pub async fn fetch(&self) -> Option<Result<Arc<Article>>> {
        let id = self.id()?.clone();
        Some(self.client.fetch_article(&id).await)
    }

    pub async fn changed(&mut self) -> bool {
        match &mut self.target {
            Some(target) => target.receiver.changed().await.is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{article, FakeApi};
    use blog_core::Error;

    #[tokio::test]
    async fn test_disabled_detail_never_fetches() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A")]));
        let client = QueryClient::new(api.clone());
        let mut detail = client.detail_query();

        assert!(!detail.set_id(None));
        assert!(detail.fetch().await.is_none());
        let state = detail.state();
        assert!(state.is_idle());
        assert!(!state.is_loading());
        assert_eq!(state.data, None);
        assert_eq!(api.get_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_id_reports_not_found() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A")]));
        let client = QueryClient::new(api);
        let mut detail = client.detail_query();

        detail.set_id(Some(ArticleId::from("2")));
        let result = detail.fetch().await.unwrap();
        assert_eq!(result.unwrap_err(), Error::NotFound(ArticleId::from("2")));

        let state = detail.state();
        assert!(state.is_error());
        assert_eq!(state.data, None);
    }

    #[tokio::test]
    async fn test_late_result_for_previous_id_is_discarded() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A"), article("2", "B")]));
        let release = api.hold_article("1");
        let client = QueryClient::new(api.clone());
        let mut detail = client.detail_query();

        detail.set_id(Some(ArticleId::from("1")));
        let slow = {
            let client = client.clone();
            tokio::spawn(async move { client.fetch_article(&ArticleId::from("1")).await })
        };
        tokio::task::yield_now().await;

        detail.set_id(Some(ArticleId::from("2")));
        detail.fetch().await.unwrap().unwrap();
        release.send(()).ok();
        slow.await.unwrap().unwrap();

        assert!(!detail.accepts(&ArticleId::from("1")));
        let shown = detail.state().data.unwrap();
        assert_eq!(shown.title, "B");
    }

    #[tokio::test]
    async fn test_list_observer_tracks_cache() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A")]));
        let client = QueryClient::new(api);
        let mut list = client.list_query();
        assert!(list.state().is_idle());
        assert!(list.articles().is_empty());

        let fetch = {
            let client = client.clone();
            tokio::spawn(async move { client.fetch_articles().await })
        };
        assert!(list.changed().await);
        fetch.await.unwrap().unwrap();

        assert_eq!(list.articles().len(), 1);
        assert!(list.state().is_success());
    }

    #[tokio::test]
    async fn test_detail_observer_follows_its_target() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A")]));
        let client = QueryClient::new(api);
        let mut detail = client.detail_query();
        assert!(!detail.changed().await);

        detail.set_id(Some(ArticleId::from("1")));
        let fetch = {
            let client = client.clone();
            tokio::spawn(async move { client.fetch_article(&ArticleId::from("1")).await })
        };
        assert!(detail.changed().await);
        fetch.await.unwrap().unwrap();

        assert!(detail.state().is_success());
        assert_eq!(detail.state().data.unwrap().title, "A");
    }
}
