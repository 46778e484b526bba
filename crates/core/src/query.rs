use crate::error::RecommendError;
use crate::models::RecommendationRequest;
use crate::text::TextNormalizer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltQuery {
    pub search: String,
    pub scoring_text: String,
}

pub fn build_search_string(query: &str, genres: &[String]) -> String {
    let subject_filters = genres
        .iter()
        .map(|genre| genre.trim())
        .filter(|genre| !genre.is_empty())
        .map(|genre| format!("subject:{genre}"))
        .collect::<Vec<_>>();

    if subject_filters.is_empty() {
        query.to_string()
    } else {
        format!("{} {}", query, subject_filters.join(" "))
    }
}

pub fn scoring_text(normalizer: &TextNormalizer, query: &str) -> String {
    let normalized = normalizer.normalize(query);
    if normalized.is_empty() {
        query.to_lowercase()
    } else {
        normalized
    }
}

pub fn build_query(
    normalizer: &TextNormalizer,
    request: &RecommendationRequest,
) -> Result<BuiltQuery, RecommendError> {
    if request.query.trim().is_empty() {
        return Err(RecommendError::MissingQuery);
    }

    Ok(BuiltQuery {
        search: build_search_string(&request.query, &request.genres),
        scoring_text: scoring_text(normalizer, &request.query),
    })
}
