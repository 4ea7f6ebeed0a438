use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use blog_core::{Article, ArticleId, ArticleInput, Error, Result};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

struct Collection {
    articles: Vec<Article>,
    next_id: u64,
}

impl Collection {
    /// Seeded articles must satisfy what `insert` enforces: unique ids and
    /// non-blank required fields.
    fn new(articles: Vec<Article>) -> Result<Self> {
        let mut seen = HashSet::new();
        for article in &articles {
            if !seen.insert(&article.id) {
                return Err(Error::Validation(format!("duplicate article id {}", article.id)));
            }
            let missing = article.to_input().missing_fields();
            if !missing.is_empty() {
                return Err(Error::Validation(format!(
                    "article {} missing required fields: {}",
                    article.id,
                    missing.join(", ")
                )));
            }
        }

        let next_id = articles
            .iter()
            .filter_map(|a| a.id.as_str().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Ok(Self { articles, next_id })
    }

    fn allocate_id(&mut self) -> ArticleId {
        loop {
            let id = ArticleId::new(self.next_id.to_string());
            self.next_id += 1;
            if !self.articles.iter().any(|a| a.id == id) {
                return id;
            }
        }
    }
}

/// In-memory article collection shared by every request handler.
#[derive(Clone)]
pub struct MemoryStore {
    collection: Arc<RwLock<Collection>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_collection(Collection {
            articles: Vec::new(),
            next_id: 1,
        })
    }

    /// Fails with `Validation` on duplicate ids or blank required fields.
    pub fn with_articles(articles: Vec<Article>) -> Result<Self> {
        Ok(Self::from_collection(Collection::new(articles)?))
    }

    fn from_collection(collection: Collection) -> Self {
        Self {
            collection: Arc::new(RwLock::new(collection)),
        }
    }

    /// Loads a seed file shaped either like a JSON-server database
    /// (`{"<resource>": [...]}`) or as a bare array of articles.
    pub async fn from_seed_file(path: &Path, resource: &str) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let articles = parse_seed(&raw, resource)?;
        let store = Self::with_articles(articles)?;
        info!("📚 Loaded {} seed articles from {}", store.len().await, path.display());
        Ok(store)
    }

    pub async fn list(&self) -> Vec<Article> {
        self.collection.read().await.articles.clone()
    }

    pub async fn get(&self, id: &ArticleId) -> Result<Article> {
        self.collection
            .read()
            .await
            .articles
            .iter()
            .find(|a| &a.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.clone()))
    }

    pub async fn insert(&self, input: ArticleInput) -> Result<Article> {
        let missing = input.missing_fields();
        if !missing.is_empty() {
            return Err(Error::Validation(format!("missing required fields: {}", missing.join(", "))));
        }

        let mut collection = self.collection.write().await;
        let id = collection.allocate_id();
        let article = input.into_article(id);
        collection.articles.push(article.clone());
        debug!("Stored article {} ({})", article.id, article.title);
        Ok(article)
    }

    pub async fn len(&self) -> usize {
        self.collection.read().await.articles.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn parse_seed(raw: &str, resource: &str) -> Result<Vec<Article>> {
    let value: Value = serde_json::from_str(raw)?;
    let list = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => map.remove(resource).ok_or_else(|| {
            Error::Serialization(format!("seed file has no \"{}\" collection", resource))
        })?,
        _ => return Err(Error::Serialization("seed file must be an object or an array".to_string())),
    };
    Ok(serde_json::from_value(list)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;

    fn input(title: &str) -> ArticleInput {
        ArticleInput {
            title: title.to_string(),
            description: "desc".to_string(),
            content: "body text".to_string(),
            category: vec!["TECH".to_string()],
            date: Utc::now(),
            cover_image: None,
        }
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);

        let first = store.insert(input("First")).await.unwrap();
        let second = store.insert(input("Second")).await.unwrap();
        assert_eq!(first.id.as_str(), "1");
        assert_eq!(second.id.as_str(), "2");

        let fetched = store.get(&second.id).await.unwrap();
        assert_eq!(fetched, second);
        assert_eq!(store.list().await.len(), 2);

        let missing = store.get(&ArticleId::from("99")).await;
        assert!(matches!(missing, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_blank_fields() {
        let store = MemoryStore::new();
        let mut bad = input("Title");
        bad.content = "  ".to_string();
        let err = store.insert(bad).await.unwrap_err();
        assert_eq!(err, Error::Validation("missing required fields: content".to_string()));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_seed_file_continues_numbering() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"blogs": [
                {{"id": "3", "title": "a", "description": "d", "content": "c", "category": ["FINANCE"], "date": "2024-01-01T00:00:00Z"}},
                {{"id": 7, "title": "b", "description": "d", "content": "c", "category": [], "date": "2024-01-02T00:00:00Z"}}
            ]}}"#
        )
        .unwrap();

        let store = MemoryStore::from_seed_file(file.path(), "blogs").await.unwrap();
        assert_eq!(store.len().await, 2);
        let created = store.insert(input("New")).await.unwrap();
        assert_eq!(created.id.as_str(), "8");

        let wrong = MemoryStore::from_seed_file(file.path(), "articles").await;
        assert!(matches!(wrong, Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_seed_rejects_duplicate_ids_and_blank_fields() {
        let first = input("First").into_article(ArticleId::from("1"));
        let again = input("Again").into_article(ArticleId::from("1"));
        let err = MemoryStore::with_articles(vec![first.clone(), again]).err();
        assert_eq!(err, Some(Error::Validation("duplicate article id 1".to_string())));

        let mut blank = input("  ").into_article(ArticleId::from("2"));
        blank.description = String::new();
        let err = MemoryStore::with_articles(vec![first, blank]).err();
        assert_eq!(
            err,
            Some(Error::Validation(
                "article 2 missing required fields: title, description".to_string()
            ))
        );

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "1", "title": "a", "description": "d", "content": "c", "date": "2024-01-01T00:00:00Z"}},
                {{"id": 1, "title": "b", "description": "d", "content": "c", "date": "2024-01-02T00:00:00Z"}}
            ]"#
        )
        .unwrap();
        let seeded = MemoryStore::from_seed_file(file.path(), "articles").await;
        assert!(matches!(seeded, Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_bare_array_seed() {
        let articles = parse_seed(
            r#"[{"id": "x", "title": "a", "description": "d", "content": "c", "date": "2024-01-01T00:00:00Z"}]"#,
            "articles",
        )
        .unwrap();
        assert_eq!(articles[0].id.as_str(), "x");
    }
}
