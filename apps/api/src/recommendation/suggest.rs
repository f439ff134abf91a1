//! Cluster-then-rank resource suggestions for the IT domain.
//!
//! A query is vectorized, assigned to its nearest cluster, and compared by
//! cosine similarity against every document in that cluster. The top
//! `TOP_N` documents are returned grouped by category.

use serde::Serialize;
use tracing::debug;

use crate::ml::kmeans::{KMeans, KMeansConfig};
use crate::ml::sparse::{cosine_similarity, SparseVector};
use crate::ml::vectorizer::{FittedVectorizer, TfidfVectorizer};
use crate::ml::FitError;
use crate::recommendation::corpus::{Category, Corpus};

pub const TOP_N: usize = 5;

/// Suggested documents per category. All three keys are always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Suggestions {
    #[serde(rename = "Certifications")]
    pub certifications: Vec<String>,
    #[serde(rename = "Internships")]
    pub internships: Vec<String>,
    #[serde(rename = "Projects")]
    pub projects: Vec<String>,
}

impl Suggestions {
    fn bucket_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Certifications => &mut self.certifications,
            Category::Internships => &mut self.internships,
            Category::Projects => &mut self.projects,
        }
    }

    pub fn total(&self) -> usize {
        self.certifications.len() + self.internships.len() + self.projects.len()
    }
}

/// The fitted IT bundle: corpus, vectorizer, document vectors and k-means
/// model. Built once, then only read.
#[derive(Debug)]
pub struct ItModel {
    corpus: Corpus,
    vectorizer: FittedVectorizer,
    vectors: Vec<SparseVector>,
    kmeans: KMeans,
}

impl ItModel {
    pub fn fit(corpus: Corpus, config: &KMeansConfig) -> Result<Self, FitError> {
        if corpus.is_empty() {
            return Err(FitError::EmptyCorpus);
        }
        let (vectorizer, vectors) = TfidfVectorizer::new()
            .with_english_stop_words()
            .fit_transform(corpus.documents())?;
        let kmeans = KMeans::fit(&vectors, vectorizer.dimension(), config)?;

        Ok(Self {
            corpus,
            vectorizer,
            vectors,
            kmeans,
        })
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Cluster id per document, index-aligned with the corpus.
    pub fn assignments(&self) -> &[usize] {
        self.kmeans.labels()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.kmeans.cluster_sizes()
    }

    pub fn inertia(&self) -> f64 {
        self.kmeans.inertia()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.dimension()
    }

    /// Up to `TOP_N` documents from the query's cluster, most similar first.
    /// Equal similarities keep ascending corpus order.
    pub fn suggest(&self, role: &str, skill: &str) -> Suggestions {
        let query = self.vectorizer.transform(&format!("{role} {skill}"));
        if query.is_zero() {
            debug!("Query '{role} {skill}' has no known terms");
        }
        let cluster = self.kmeans.predict(&query);

        let mut scored: Vec<(usize, f64)> = self
            .assignments()
            .iter()
            .enumerate()
            .filter(|(_, &label)| label == cluster)
            .map(|(idx, _)| (idx, cosine_similarity(&query, &self.vectors[idx])))
            .collect();

        debug!(
            "Query '{role} {skill}' -> cluster {cluster} with {} candidates",
            scored.len()
        );

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        scored.truncate(TOP_N);

        let mut suggestions = Suggestions::default();
        for (idx, _) in scored {
            suggestions
                .bucket_mut(self.corpus.labels()[idx])
                .push(self.corpus.documents()[idx].clone());
        }
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::ItResources;
    use crate::models::records::ResourceRecord;
    use crate::recommendation::corpus::build_corpus;

    fn record(role: &str, skill: &str, resource: &str) -> ResourceRecord {
        ResourceRecord {
            job_role: role.to_string(),
            skill: skill.to_string(),
            resource: resource.to_string(),
        }
    }

    fn sample_model(k: usize) -> ItModel {
        let resources = ItResources {
            certifications: vec![
                record("Data Scientist", "Python", "Python Data Analysis Certificate"),
                record("Data Scientist", "Statistics", "Statistics Data Certificate"),
                record("Web Developer", "JavaScript", "JavaScript Web Certificate"),
            ],
            internships: vec![
                record("Data Scientist", "Python", "Data Analytics Internship"),
                record("Web Developer", "React", "Frontend Web Internship"),
            ],
            projects: vec![
                record("Data Scientist", "Machine Learning", "Data Prediction Project"),
                record("Web Developer", "CSS", "Web Portfolio Project"),
                record("Web Developer", "JavaScript", "Web Todo App"),
            ],
        };
        ItModel::fit(
            build_corpus(&resources),
            &KMeansConfig {
                k,
                ..KMeansConfig::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_assignments_cover_whole_corpus() {
        let model = sample_model(2);
        assert_eq!(model.assignments().len(), model.corpus().len());
        assert!(model.assignments().iter().all(|&c| c < 2));
    }

    #[test]
    fn test_suggest_returns_at_most_top_n() {
        let model = sample_model(1);
        let suggestions = model.suggest("Data Scientist", "Python");
        assert_eq!(suggestions.total(), TOP_N);
    }

    #[test]
    fn test_suggest_ranks_most_similar_first() {
        let model = sample_model(1);
        let suggestions = model.suggest("Data Scientist", "Python");
        assert_eq!(
            suggestions.certifications.first().map(String::as_str),
            Some("Data Scientist Python Python Data Analysis Certificate")
        );
        assert!(suggestions
            .internships
            .contains(&"Data Scientist Python Data Analytics Internship".to_string()));
    }

    #[test]
    fn test_equal_similarities_keep_corpus_order() {
        let same = || record("Data Scientist", "Python", "Python Course");
        let resources = ItResources {
            certifications: vec![same(), same(), same()],
            internships: vec![same(), same()],
            projects: vec![same(), same()],
        };
        let model = ItModel::fit(
            build_corpus(&resources),
            &KMeansConfig {
                k: 1,
                ..KMeansConfig::default()
            },
        )
        .unwrap();

        // Seven tied documents: indices 0..5 win, which are every
        // certification followed by both internships.
        let suggestions = model.suggest("Data Scientist", "Python");
        assert_eq!(suggestions.total(), TOP_N);
        assert_eq!(suggestions.certifications.len(), 3);
        assert_eq!(suggestions.internships.len(), 2);
        assert!(suggestions.projects.is_empty());
    }

    #[test]
    fn test_unknown_query_still_returns_all_keys() {
        let model = sample_model(2);
        let suggestions = model.suggest("", "the");
        assert!(suggestions.total() <= TOP_N);
        let json = serde_json::to_value(&suggestions).unwrap();
        for key in ["Certifications", "Internships", "Projects"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }

    #[test]
    fn test_suggestions_stay_within_query_cluster() {
        let model = sample_model(2);
        let query_cluster = model
            .kmeans
            .predict(&model.vectorizer.transform("Web Developer JavaScript"));
        let suggestions = model.suggest("Web Developer", "JavaScript");
        let all: Vec<&String> = suggestions
            .certifications
            .iter()
            .chain(&suggestions.internships)
            .chain(&suggestions.projects)
            .collect();
        for doc in all {
            let idx = model
                .corpus()
                .documents()
                .iter()
                .position(|d| d == doc)
                .unwrap();
            assert_eq!(model.assignments()[idx], query_cluster);
        }
    }

    #[test]
    fn test_fit_rejects_k_above_corpus_size() {
        let resources = ItResources {
            projects: vec![record("Tester", "Selenium", "Automation Suite")],
            ..ItResources::default()
        };
        let err = ItModel::fit(build_corpus(&resources), &KMeansConfig::default()).unwrap_err();
        assert!(matches!(err, FitError::TooFewSamples { k: 5, samples: 1 }));
    }

    #[test]
    fn test_fit_rejects_empty_corpus() {
        let err = ItModel::fit(Corpus::default(), &KMeansConfig::default()).unwrap_err();
        assert!(matches!(err, FitError::EmptyCorpus));
    }
}
