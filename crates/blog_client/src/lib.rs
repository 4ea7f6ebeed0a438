pub mod client;
pub mod config;

pub use client::HttpArticleClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_RESOURCE};

pub mod prelude {
    pub use super::{ClientConfig, HttpArticleClient};
    pub use blog_core::{Article, ArticleApi, ArticleId, ArticleInput, Error, Result};
}
