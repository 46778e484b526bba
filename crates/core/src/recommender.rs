use crate::catalog::BookCatalog;
use crate::query::build_query;
use crate::ranking::RelevanceRanker;
use crate::text::TextNormalizer;
use crate::{Recommendation, RecommendError, RecommendationRequest, RecommenderOptions};

pub struct Recommender<C>
where
    C: BookCatalog,
{
    catalog: C,
    normalizer: TextNormalizer,
    options: RecommenderOptions,
}

impl<C> Recommender<C>
where
    C: BookCatalog + Send + Sync,
{
    pub fn new(catalog: C, options: RecommenderOptions) -> Result<Self, RecommendError> {
        Ok(Self {
            catalog,
            normalizer: TextNormalizer::new()?,
            options: options.validated()?,
        })
    }

    pub fn options(&self) -> &RecommenderOptions {
        &self.options
    }

    pub async fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let query = build_query(&self.normalizer, request)?;
        tracing::debug!(search = %query.search, scoring_text = %query.scoring_text, "built catalog query");

        let candidates = self
            .catalog
            .search_volumes(&query.search, self.options.max_results)
            .await?;

        if candidates.is_empty() {
            return Err(RecommendError::NoResults {
                search: query.search,
            });
        }

        let candidate_count = candidates.len();
        let ranked = RelevanceRanker::new(&self.normalizer, self.options.top_k)
            .rank(&query.scoring_text, candidates);

        tracing::info!(
            search = %query.search,
            candidate_count,
            returned = ranked.len(),
            top_score = ranked.first().map(|hit| hit.score).unwrap_or_default(),
            "ranked catalog candidates"
        );

        Ok(ranked.into_iter().map(Recommendation::from).collect())
    }
}
