use crate::models::{Candidate, ScoredCandidate};
use crate::text::TextNormalizer;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn fit(documents: &[Vec<String>]) -> Self {
        let mut document_frequency = BTreeMap::<String, usize>::new();
        for terms in documents {
            let mut seen = terms.iter().collect::<Vec<_>>();
            seen.sort_unstable();
            seen.dedup();
            for term in seen {
                *document_frequency.entry(term.clone()).or_insert(0) += 1;
            }
        }

        let total = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (index, (term, frequency)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + total) / (1.0 + frequency as f64)).ln() + 1.0);
            vocabulary.insert(term, index);
        }

        Self { vocabulary, idf }
    }

    pub fn transform(&self, terms: &[String]) -> Vec<f64> {
        let mut vector = vec![0f64; self.vocabulary.len()];
        for term in terms {
            if let Some(&index) = self.vocabulary.get(term) {
                vector[index] += 1.0;
            }
        }

        for (value, idf) in vector.iter_mut().zip(&self.idf) {
            *value *= idf;
        }

        let magnitude = magnitude(&vector);
        if magnitude > 0.0 {
            for value in &mut vector {
                *value /= magnitude;
            }
        }

        vector
    }
}

fn magnitude(vector: &[f64]) -> f64 {
    vector.iter().map(|value| value * value).sum::<f64>().sqrt()
}

pub fn cosine_similarity(left: &[f64], right: &[f64]) -> f64 {
    let denominator = magnitude(left) * magnitude(right);
    if denominator == 0.0 {
        return 0.0;
    }

    let dot = left
        .iter()
        .zip(right)
        .map(|(a, b)| a * b)
        .sum::<f64>();
    (dot / denominator).clamp(0.0, 1.0)
}

pub struct RelevanceRanker<'a> {
    normalizer: &'a TextNormalizer,
    top_k: usize,
}

impl<'a> RelevanceRanker<'a> {
    pub fn new(normalizer: &'a TextNormalizer, top_k: usize) -> Self {
        Self { normalizer, top_k }
    }

    pub fn rank(&self, scoring_text: &str, candidates: Vec<Candidate>) -> Vec<ScoredCandidate> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let documents = candidates
            .iter()
            .map(|candidate| {
                let normalized = self.normalizer.normalize(&candidate.combined_text());
                self.normalizer.vocabulary_terms(&normalized)
            })
            .collect::<Vec<_>>();

        let vectorizer = TfidfVectorizer::fit(&documents);
        let query_vector = vectorizer.transform(&self.normalizer.vocabulary_terms(scoring_text));

        let mut scored = candidates
            .into_iter()
            .zip(&documents)
            .map(|(candidate, terms)| {
                let document_vector = vectorizer.transform(terms);
                ScoredCandidate {
                    candidate,
                    score: cosine_similarity(&query_vector, &document_vector),
                }
            })
            .collect::<Vec<_>>();

        scored.sort_by(|left, right| right.score.total_cmp(&left.score));
        scored.truncate(self.top_k);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rating;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().expect("word pattern compiles")
    }

    fn candidate(title: &str, description: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            author: "Someone".to_string(),
            cover: String::new(),
            description: description.to_string(),
            info_link: "#".to_string(),
            rating: Rating::Unavailable,
        }
    }

    fn terms(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn idf_favors_rare_terms() {
        let vectorizer = TfidfVectorizer::fit(&[terms("dragon castle"), terms("castle siege")]);
        let vector = vectorizer.transform(&terms("dragon castle"));
        // vocabulary is sorted: castle, dragon, siege
        assert!(vector[1] > vector[0]);
        assert_eq!(vector.len(), 3);
        assert_eq!(vector[2], 0.0);
    }

    #[test]
    fn transform_is_unit_length_or_zero() {
        let vectorizer = TfidfVectorizer::fit(&[terms("alpha beta"), terms("beta gamma")]);
        let vector = vectorizer.transform(&terms("alpha gamma gamma"));
        assert!((magnitude(&vector) - 1.0).abs() < 1e-9);

        let unknown = vectorizer.transform(&terms("delta"));
        assert!(unknown.iter().all(|value| *value == 0.0));
    }

    #[test]
    fn cosine_of_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn identical_text_outranks_unrelated_text() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 10);
        let ranked = ranker.rank(
            "space opera",
            vec![
                candidate("Gardening Basics", "Growing tomatoes in small yards"),
                candidate("Space Opera", "space opera"),
            ],
        );

        assert_eq!(ranked[0].candidate.title, "Space Opera");
        assert!(ranked[0].score > ranked[1].score);
        assert_eq!(ranked[1].score, 0.0);
    }

    #[test]
    fn ranking_is_bounded_sorted_and_in_unit_range() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 3);
        let candidates = vec![
            candidate("Dune", "A desert planet and spice"),
            candidate("Foundation", "Galactic empire falls"),
            candidate("Hyperion", "Pilgrims on a distant planet"),
            candidate("Neuromancer", "Cyberspace heist"),
            candidate("Solaris", "A sentient ocean planet"),
        ];

        let ranked = ranker.rank("desert planet", candidates);
        assert_eq!(ranked.len(), 3);
        assert!(ranked.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(ranked
            .iter()
            .all(|item| (0.0..=1.0).contains(&item.score)));
        assert_eq!(ranked[0].candidate.title, "Dune");
    }

    #[test]
    fn ties_keep_fetch_order() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 10);
        let ranked = ranker.rank(
            "cooking",
            vec![
                candidate("First", "gardening"),
                candidate("Second", "woodwork"),
                candidate("Third", "knitting"),
            ],
        );

        let titles = ranked
            .iter()
            .map(|item| item.candidate.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn stopword_query_scores_without_dividing_by_zero() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 10);
        let ranked = ranker.rank("the of a", vec![candidate("The Hobbit", "There and back")]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].score, 0.0);
    }

    #[test]
    fn candidates_without_terms_score_zero_in_fetch_order() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 10);
        let ranked = ranker.rank(
            "space opera",
            vec![
                candidate("The", "of a"),
                candidate("It", "is what it is"),
                candidate("A", "x y z"),
            ],
        );

        let titles = ranked
            .iter()
            .map(|item| item.candidate.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, vec!["The", "It", "A"]);
        assert!(ranked.iter().all(|item| item.score == 0.0));
    }

    #[test]
    fn empty_batch_ranks_to_nothing() {
        let normalizer = normalizer();
        let ranker = RelevanceRanker::new(&normalizer, 10);
        assert!(ranker.rank("anything", Vec::new()).is_empty());
    }
}
