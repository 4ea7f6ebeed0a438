use std::sync::Arc;
use blog_core::{Article, ArticleId, ArticleInput, Error, Result};
use chrono::Utc;
use tracing::{debug, info, warn};
use crate::cache::QueryState;
use crate::client::{ArticleList, QueryClient};
use crate::form::CreateForm;
use crate::mutation::{CreateArticleMutation, MutationState};
use crate::observer::{DetailQuery, ListQuery};
use crate::selection::{active_id, Selection};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Required fields missing or a submission already pending; nothing sent.
    Blocked,
    Created(Article),
    Failed(Error),
}

/// One browsing session: list, detail pane, selection and creation form
/// over a shared `QueryClient`.
///
/// The synchronous methods only update local state and report what needs
/// loading, so a front end can run the requests wherever it likes. The
/// async helpers do both in one call.
pub struct BlogSession {
    client: QueryClient,
    list: ListQuery,
    detail: DetailQuery,
    selection: Selection,
    form: CreateForm,
    mutation: CreateArticleMutation,
    store_url: String,
}

impl BlogSession {
    pub fn new(client: QueryClient, store_url: impl Into<String>) -> Self {
        Self {
            list: client.list_query(),
            detail: client.detail_query(),
            mutation: client.create_mutation(),
            selection: Selection::default(),
            form: CreateForm::default(),
            store_url: store_url.into(),
            client,
        }
    }

    pub fn client(&self) -> &QueryClient {
        &self.client
    }

    pub fn list_state(&self) -> QueryState<ArticleList> {
        self.list.state()
    }

    pub fn articles(&self) -> ArticleList {
        self.list.articles()
    }

    pub fn detail_state(&self) -> QueryState<Arc<Article>> {
        self.detail.state()
    }

    pub fn detail_id(&self) -> Option<&ArticleId> {
        self.detail.id()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn form(&self) -> &CreateForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut CreateForm {
        &mut self.form
    }

    pub fn mutation_state(&self) -> &MutationState {
        self.mutation.state()
    }

    pub fn is_submitting(&self) -> bool {
        self.mutation.is_pending()
    }

    /// Submit is possible: required fields filled and nothing pending.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.form.is_complete()
    }

    pub fn active_id(&self) -> Option<ArticleId> {
        active_id(&self.selection, &self.list.articles())
    }

    /// Points the detail pane at the current active id. Returns the id to
    /// load when the target changed to a new article.
    pub fn sync_detail(&mut self) -> Option<ArticleId> {
        let active = self.active_id();
        if self.detail.set_id(active.clone()) {
            active
        } else {
            None
        }
    }

    /// Whether a detail result for `id` should still be applied.
    pub fn detail_accepts(&self, id: &ArticleId) -> bool {
        self.detail.accepts(id)
    }

    pub fn select(&mut self, id: ArticleId) -> Option<ArticleId> {
        debug!("Selected article {}", id);
        self.selection.select(id);
        self.sync_detail()
    }

    /// Moves the selection `delta` places from the active article, clamped to
    /// the list bounds.
    pub fn select_offset(&mut self, delta: isize) -> Option<ArticleId> {
        let articles = self.articles();
        if articles.is_empty() {
            return None;
        }
        let current = self
            .active_id()
            .and_then(|id| articles.iter().position(|a| a.id == id))
            .unwrap_or(0);
        let last = articles.len() as isize - 1;
        let target = (current as isize + delta).clamp(0, last) as usize;
        self.select(articles[target].id.clone())
    }

    pub fn reset_selection(&mut self) -> Option<ArticleId> {
        self.selection.reset();
        self.sync_detail()
    }

    /// Banner shown when the list cannot be loaded.
    pub fn list_error_message(&self) -> Option<String> {
        self.list_state().error.map(|e| {
            format!(
                "Failed to load articles ({}). Make sure the article store is running at {}",
                e, self.store_url
            )
        })
    }

    pub fn detail_error_message(&self) -> Option<String> {
        self.detail_state().error.map(|e| match e {
            Error::NotFound(id) => format!("Article {} does not exist.", id),
            other => format!(
                "Failed to load article details ({}). Make sure the article store is running at {}",
                other, self.store_url
            ),
        })
    }

    pub async fn load_list(&self) -> Result<ArticleList> {
        let result = self.list.fetch().await;
        if let Err(e) = &result {
            warn!("Failed to load articles: {}", e);
        }
        result
    }

    /// `None` when no article is active.
    pub async fn load_detail(&self) -> Option<Result<Arc<Article>>> {
        let result = self.detail.fetch().await;
        if let Some(Err(e)) = &result {
            warn!("Failed to load article {:?}: {}", self.detail.id(), e);
        }
        result
    }

    /// Loads the list, re-derives the active article and loads its details.
    /// Failures are left in the list and detail states for the front end.
    pub async fn refresh(&mut self) {
        let _ = self.load_list().await;
        self.sync_detail();
        let _ = self.load_detail().await;
    }

    /// A failed read shows up as the detail state's error.
    pub async fn select_and_load(&mut self, id: ArticleId) {
        self.select(id);
        let _ = self.load_detail().await;
    }

    /// Validates the form and marks the mutation pending. `None` means the
    /// submission is blocked and nothing must be sent.
    pub fn begin_submit(&mut self) -> Option<ArticleInput> {
        if self.is_submitting() {
            return None;
        }
        let input = self.form.to_input(Utc::now())?;
        self.form.last_error = None;
        self.mutation.begin();
        Some(input)
    }

    /// Applies a finished create. Success closes and clears the form and
    /// resets the selection; failure keeps everything the user typed.
    /// The list is stale afterwards and the caller reloads it.
    pub fn finish_submit(&mut self, result: Result<Article>) -> SubmitOutcome {
        self.mutation.settle(&result);
        match result {
            Ok(article) => {
                info!("📝 Article {} created", article.id);
                self.form.clear();
                self.form.close();
                self.selection.reset();
                SubmitOutcome::Created(article)
            }
            Err(e) => {
                self.form.last_error = Some(e.clone());
                SubmitOutcome::Failed(e)
            }
        }
    }

    pub async fn submit_form(&mut self) -> SubmitOutcome {
        let Some(input) = self.begin_submit() else {
            debug!("Submission blocked: {:?} missing", self.form.missing_fields());
            return SubmitOutcome::Blocked;
        };
        let result = self.client.create_article(&input).await;
        let outcome = self.finish_submit(result);
        if matches!(outcome, SubmitOutcome::Created(_)) {
            self.refresh().await;
        }
        outcome
    }
}
