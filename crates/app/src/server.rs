use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use bookhive_core::{
    BookCatalog, RecommendError, RecommendationRequest, RecommendationResponse, Recommender,
};
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub const PROJECT_NAME: &str = "BookHive";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct ApiError(RecommendError);

impl From<RecommendError> for ApiError {
    fn from(error: RecommendError) -> Self {
        Self(error)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            RecommendError::MissingQuery => (StatusCode::BAD_REQUEST, "No query provided."),
            RecommendError::NoResults { .. } => {
                (StatusCode::NOT_FOUND, "No books found for your search.")
            }
            error if error.is_fetch_failure() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch book data.",
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Something went wrong while ranking books.",
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "recommendation failed");
        } else {
            tracing::warn!(error = %self.0, "recommendation rejected");
        }

        let body = ErrorBody {
            error: format!("{PROJECT_NAME}: {message}"),
        };
        (status, Json(body)).into_response()
    }
}

async fn root() -> String {
    format!("Welcome to {PROJECT_NAME}. POST /recommend with {{\"query\": \"...\", \"genres\": [...]}}.")
}

async fn recommend<C>(
    State(recommender): State<Arc<Recommender<C>>>,
    Json(request): Json<RecommendationRequest>,
) -> Result<Json<RecommendationResponse>, ApiError>
where
    C: BookCatalog + Send + Sync + 'static,
{
    let recommendations = recommender.recommend(&request).await?;
    Ok(Json(RecommendationResponse { recommendations }))
}

pub fn router<C>(recommender: Recommender<C>) -> Router
where
    C: BookCatalog + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(root))
        .route("/recommend", post(recommend::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(recommender))
}

pub async fn serve<C>(bind: SocketAddr, recommender: Recommender<C>) -> anyhow::Result<()>
where
    C: BookCatalog + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(address = %listener.local_addr()?, "listening");
    axum::serve(listener, router(recommender)).await?;
    Ok(())
}
