pub mod api;
pub mod error;
pub mod types;

pub use api::ArticleApi;
pub use error::Error;
pub use types::{Article, ArticleId, ArticleInput, DEFAULT_CATEGORY};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::{Article, ArticleApi, ArticleId, ArticleInput, Error, Result};
}
