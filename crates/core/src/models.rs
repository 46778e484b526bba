use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const MISSING_INFO_LINK: &str = "#";
pub const NO_RATING: &str = "No rating";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Rating {
    Score(f64),
    #[default]
    Unavailable,
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(value) => serializer.serialize_f64(*value),
            Rating::Unavailable => serializer.serialize_str(NO_RATING),
        }
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rating::Score(value) => write!(f, "{value}"),
            Rating::Unavailable => f.write_str(NO_RATING),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Candidate {
    pub title: String,
    pub author: String,
    pub cover: String,
    pub description: String,
    pub info_link: String,
    pub rating: Rating,
}

impl Candidate {
    pub fn combined_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RecommendationRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RecommendationRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            genres: Vec::new(),
        }
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = genres.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub title: String,
    pub author: String,
    pub cover: String,
    pub description: String,
    pub score: f64,
    pub info_link: String,
    pub rating: Rating,
}

impl From<ScoredCandidate> for Recommendation {
    fn from(value: ScoredCandidate) -> Self {
        let ScoredCandidate { candidate, score } = value;
        Self {
            title: candidate.title,
            author: candidate.author,
            cover: candidate.cover,
            description: candidate.description,
            score: round_score(score),
            info_link: candidate.info_link,
            rating: candidate.rating,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Clone)]
pub struct RecommenderOptions {
    pub max_results: usize,
    pub top_k: usize,
}

impl RecommenderOptions {
    pub const CATALOG_PAGE_LIMIT: usize = 40;

    pub fn validated(self) -> crate::Result<Self> {
        if self.top_k == 0 {
            return Err(crate::RecommendError::InvalidArgument(
                "top_k must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            max_results: self.max_results.clamp(1, Self::CATALOG_PAGE_LIMIT),
            top_k: self.top_k,
        })
    }
}

impl Default for RecommenderOptions {
    fn default() -> Self {
        Self {
            max_results: 20,
            top_k: 10,
        }
    }
}

// Halves go to the even neighbour.
pub fn round_score(score: f64) -> f64 {
    (score * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_serializes_as_number_or_marker() {
        let scored = serde_json::to_string(&Rating::Score(4.5)).unwrap();
        let missing = serde_json::to_string(&Rating::Unavailable).unwrap();
        assert_eq!(scored, "4.5");
        assert_eq!(missing, "\"No rating\"");
    }

    #[test]
    fn request_fields_default_when_absent() {
        let request: RecommendationRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_empty());
        assert!(request.genres.is_empty());
    }

    #[test]
    fn request_null_fields_read_as_absent() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"query": null, "genres": null}"#).unwrap();
        assert!(request.query.is_empty());
        assert!(request.genres.is_empty());

        let request: RecommendationRequest =
            serde_json::from_str(r#"{"query": "dune", "genres": null}"#).unwrap();
        assert_eq!(request, RecommendationRequest::new("dune"));
    }

    #[test]
    fn recommendation_rounds_score_to_two_places() {
        let scored = ScoredCandidate {
            candidate: Candidate {
                title: "Dune".to_string(),
                author: "Frank Herbert".to_string(),
                cover: String::new(),
                description: "Desert planet".to_string(),
                info_link: MISSING_INFO_LINK.to_string(),
                rating: Rating::Unavailable,
            },
            score: 0.45678,
        };

        let recommendation = Recommendation::from(scored);
        assert_eq!(recommendation.score, 0.46);
        assert_eq!(recommendation.title, "Dune");
    }

    #[test]
    fn halfway_scores_round_to_even() {
        assert_eq!(round_score(0.125), 0.12);
        assert_eq!(round_score(0.625), 0.62);
        assert_eq!(round_score(0.375), 0.38);
        assert_eq!(round_score(1.0), 1.0);
        assert_eq!(round_score(0.0), 0.0);
    }

    #[test]
    fn options_clamp_page_size_and_reject_zero_top_k() {
        let options = RecommenderOptions {
            max_results: 500,
            top_k: 10,
        }
        .validated()
        .unwrap();
        assert_eq!(options.max_results, RecommenderOptions::CATALOG_PAGE_LIMIT);

        let invalid = RecommenderOptions {
            max_results: 20,
            top_k: 0,
        }
        .validated();
        assert!(invalid.is_err());
    }
}
