//! In-process `ArticleApi` fake with call counters and failure injection.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use async_trait::async_trait;
use blog_core::{Article, ArticleApi, ArticleId, ArticleInput, Error, Result};
use chrono::Utc;
use tokio::sync::oneshot;

pub fn input(title: &str) -> ArticleInput {
    ArticleInput {
        title: title.to_string(),
        description: format!("About {}", title),
        content: format!("{} body.\n\nMore about {}.", title, title),
        category: vec!["TECH".to_string()],
        date: Utc::now(),
        cover_image: None,
    }
}

pub fn article(id: &str, title: &str) -> Article {
    input(title).into_article(ArticleId::from(id))
}

#[derive(Default)]
struct FakeState {
    articles: Vec<Article>,
    next_id: u64,
    list_calls: usize,
    get_calls: usize,
    create_calls: usize,
    list_failures: VecDeque<Error>,
    create_failure: Option<Error>,
    gates: HashMap<ArticleId, oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let next_id = articles.len() as u64 + 1;
        Self {
            state: Mutex::new(FakeState {
                articles,
                next_id,
                ..FakeState::default()
            }),
        }
    }

    pub fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    pub fn get_calls(&self) -> usize {
        self.state.lock().unwrap().get_calls
    }

    pub fn create_calls(&self) -> usize {
        self.state.lock().unwrap().create_calls
    }

    pub fn fail_next_lists(&self, count: usize, error: Error) {
        let mut state = self.state.lock().unwrap();
        state.list_failures.extend(std::iter::repeat(error).take(count));
    }

    pub fn fail_next_create(&self, error: Error) {
        self.state.lock().unwrap().create_failure = Some(error);
    }

    /// Holds `get_article(id)` until the returned sender fires.
    pub fn hold_article(&self, id: &str) -> oneshot::Sender<()> {
        let (release, gate) = oneshot::channel();
        self.state
            .lock()
            .unwrap()
            .gates
            .insert(ArticleId::from(id), gate);
        release
    }
}

#[async_trait]
impl ArticleApi for FakeApi {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        match state.list_failures.pop_front() {
            Some(e) => Err(e),
            None => Ok(state.articles.clone()),
        }
    }

    async fn get_article(&self, id: &ArticleId) -> Result<Article> {
        let gate = {
            let mut state = self.state.lock().unwrap();
            state.get_calls += 1;
            state.gates.remove(id)
        };
        if let Some(gate) = gate {
            gate.await.ok();
        }
        self.state
            .lock()
            .unwrap()
            .articles
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    async fn create_article(&self, input: &ArticleInput) -> Result<Article> {
        let mut state = self.state.lock().unwrap();
        state.create_calls += 1;
        if let Some(e) = state.create_failure.take() {
            return Err(e);
        }
        let id = ArticleId::new(state.next_id.to_string());
        state.next_id += 1;
        let article = input.clone().into_article(id);
        // newest first, the way a store sorted by date would answer
        state.articles.insert(0, article.clone());
        Ok(article)
    }
}
