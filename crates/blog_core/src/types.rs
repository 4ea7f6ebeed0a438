use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Badge text for articles without any category.
pub const DEFAULT_CATEGORY: &str = "GENERAL";

const WORDS_PER_MINUTE: usize = 200;

/// Store-assigned article identifier.
///
/// Stores disagree on whether ids are numbers or strings, so both decode to
/// the same opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ArticleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl<'de> Deserialize<'de> for ArticleId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(id) => ArticleId(id),
            RawId::Number(id) => ArticleId(id.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Everything the client sends when creating an article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleInput {
    pub title: String,
    pub description: String,
    pub content: String,
    #[serde(default)]
    pub category: Vec<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl ArticleInput {
    /// Names of required fields that are blank after trimming.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.description.trim().is_empty() {
            missing.push("description");
        }
        if self.content.trim().is_empty() {
            missing.push("content");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    pub fn into_article(self, id: ArticleId) -> Article {
        Article {
            id,
            title: self.title,
            description: self.description,
            content: self.content,
            category: self.category,
            date: self.date,
            cover_image: self.cover_image.filter(|url| !url.trim().is_empty()),
        }
    }
}

impl Article {
    pub fn primary_category(&self) -> &str {
        self.category
            .first()
            .map(String::as_str)
            .unwrap_or(DEFAULT_CATEGORY)
    }

    /// Content split on blank lines, empty pieces dropped.
    pub fn paragraphs(&self) -> Vec<&str> {
        self.content
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }

    /// Estimated minutes to read, never less than one.
    pub fn read_time_minutes(&self) -> usize {
        self.word_count().div_ceil(WORDS_PER_MINUTE).max(1)
    }

    /// Cover image URL, `None` when absent or blank.
    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Letter shown in place of a missing cover image.
    pub fn placeholder_initial(&self) -> char {
        self.primary_category().chars().next().unwrap_or('G')
    }

    /// The fields a client would have submitted for this article.
    pub fn to_input(&self) -> ArticleInput {
        ArticleInput {
            title: self.title.clone(),
            description: self.description.clone(),
            content: self.content.clone(),
            category: self.category.clone(),
            date: self.date,
            cover_image: self.cover_image.clone(),
        }
    }
}
