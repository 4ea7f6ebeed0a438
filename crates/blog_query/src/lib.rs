//! Client-side state for the article browser: a keyed query cache over an
//! `ArticleApi`, observers for the list and detail panes, the create
//! mutation, the selection state machine and the creation form.

pub mod cache;
pub mod client;
pub mod form;
pub mod mutation;
pub mod observer;
pub mod retry;
pub mod selection;
pub mod session;

#[cfg(test)]
mod test_support;

pub use cache::{QueryCache, QueryKey, QueryState, QueryStatus, QueryValue};
pub use client::{ArticleKey, ArticleList, ArticlesKey, QueryClient};
pub use form::{split_categories, CreateForm, FormField};
pub use mutation::{CreateArticleMutation, MutationState};
pub use observer::{DetailQuery, ListQuery};
pub use retry::RetryPolicy;
pub use selection::{active_id, Selection};
pub use session::{BlogSession, SubmitOutcome};

pub mod prelude {
    pub use super::{BlogSession, QueryClient, QueryState, RetryPolicy, Selection, SubmitOutcome};
    pub use blog_core::{Article, ArticleId, ArticleInput, Error, Result};
}
