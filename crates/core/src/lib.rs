pub mod catalog;
pub mod error;
pub mod models;
pub mod query;
pub mod ranking;
pub mod recommender;
pub mod text;

pub use catalog::{parse_volumes, BookCatalog, GoogleBooksCatalog, GOOGLE_BOOKS_VOLUMES_URL};
pub use error::{RecommendError, Result};
pub use models::{
    round_score, Candidate, Rating, Recommendation, RecommendationRequest,
    RecommendationResponse, RecommenderOptions, ScoredCandidate,
};
pub use query::{build_query, build_search_string, BuiltQuery};
pub use ranking::{cosine_similarity, RelevanceRanker, TfidfVectorizer};
pub use recommender::Recommender;
pub use text::{TextNormalizer, ENGLISH_STOPWORDS};
