use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blog_core::{Article, ArticleId, ArticleInput, Error};
use serde_json::json;
use tracing::{info, warn};
use crate::AppState;

/// Store errors rendered as `{"error": "..."}` with a matching status.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<Article>> {
    Json(state.store.list().await)
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    let id = ArticleId::from(id);
    match state.store.get(&id).await {
        Ok(article) => Ok(Json(article)),
        Err(e) => {
            warn!("Lookup failed for article {}: {}", id, e);
            Err(e.into())
        }
    }
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<ArticleInput>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let article = state.store.insert(input).await?;
    info!("📝 Created article {}: {}", article.id, article.title);
    Ok((StatusCode::CREATED, Json(article)))
}
