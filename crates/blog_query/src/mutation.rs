use blog_core::{Article, ArticleInput, Error, Result};
use tracing::warn;
use crate::client::QueryClient;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Pending,
    Success(Article),
    Error(Error),
}

/// Create-article mutation with its own pending/error state.
///
/// Success invalidates the list through the `QueryClient`; failures are kept
/// here and handed back to the caller.
pub struct CreateArticleMutation {
    client: QueryClient,
    state: MutationState,
}

impl CreateArticleMutation {
    pub(crate) fn new(client: QueryClient) -> Self {
        Self {
            client,
            state: MutationState::Idle,
        }
    }

    pub fn state(&self) -> &MutationState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, MutationState::Pending)
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            MutationState::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Marks the mutation pending for callers that run the request elsewhere.
    pub fn begin(&mut self) {
        self.state = MutationState::Pending;
    }

    pub fn settle(&mut self, result: &Result<Article>) {
        self.state = match result {
            Ok(article) => MutationState::Success(article.clone()),
            Err(e) => {
                warn!("Failed to create article: {}", e);
                MutationState::Error(e.clone())
            }
        };
    }

    pub fn reset(&mut self) {
        self.state = MutationState::Idle;
    }

    pub async fn mutate(&mut self, input: &ArticleInput) -> Result<Article> {
        self.begin();
        let result = self.client.create_article(input).await;
        self.settle(&result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{article, input, FakeApi};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_mutation_states() {
        let api = Arc::new(FakeApi::with_articles(vec![article("1", "A")]));
        let client = QueryClient::new(api.clone());
        let mut mutation = client.create_mutation();
        assert_eq!(mutation.state(), &MutationState::Idle);

        let created = mutation.mutate(&input("B")).await.unwrap();
        assert_eq!(mutation.state(), &MutationState::Success(created));

        api.fail_next_create(Error::Validation("title is required".to_string()));
        let err = mutation.mutate(&input("C")).await.unwrap_err();
        assert!(!mutation.is_pending());
        assert_eq!(mutation.error(), Some(&err));

        mutation.reset();
        assert_eq!(mutation.state(), &MutationState::Idle);
    }
}
