//! Non-IT pathway: cluster the student's skills, narrow to their branch, and
//! split the skills they are still missing into four fixed yearly buckets.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;

use crate::ml::kmeans::{KMeans, KMeansConfig};
use crate::ml::vectorizer::{FittedVectorizer, TfidfVectorizer};
use crate::ml::FitError;
use crate::models::records::NonItRecord;
use crate::pathway::{split_skills, LearningPath};

pub const NO_RECOMMENDATIONS: &str = "No recommendations";
const FINAL_YEAR: i32 = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonItPath {
    pub skill_division: LearningPath,
    pub certifications: String,
    pub internships: String,
    pub projects: String,
}

impl NonItPath {
    fn empty() -> Self {
        Self {
            skill_division: LearningPath::default(),
            certifications: NO_RECOMMENDATIONS.to_string(),
            internships: NO_RECOMMENDATIONS.to_string(),
            projects: NO_RECOMMENDATIONS.to_string(),
        }
    }
}

/// Fitted Non-IT bundle. The vectorizer sees only the `Skills` column and
/// keeps stop words.
#[derive(Debug)]
pub struct NonItModel {
    rows: Vec<NonItRecord>,
    clusters: Vec<usize>,
    vectorizer: FittedVectorizer,
    kmeans: KMeans,
}

impl NonItModel {
    pub fn fit(rows: Vec<NonItRecord>, config: &KMeansConfig) -> Result<Self, FitError> {
        if rows.is_empty() {
            return Err(FitError::EmptyCorpus);
        }
        let skills: Vec<&str> = rows.iter().map(|r| r.skills.as_str()).collect();
        let (vectorizer, vectors) = TfidfVectorizer::new().fit_transform(&skills)?;
        let kmeans = KMeans::fit(&vectors, vectorizer.dimension(), config)?;
        let clusters = kmeans.labels().to_vec();

        Ok(Self {
            rows,
            clusters,
            vectorizer,
            kmeans,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn cluster_sizes(&self) -> Vec<usize> {
        self.kmeans.cluster_sizes()
    }

    /// Rows sharing the skill's cluster and exactly matching `branch`.
    fn matching_rows(&self, branch: &str, skill: &str) -> Vec<&NonItRecord> {
        let cluster = self.kmeans.predict(&self.vectorizer.transform(skill));
        self.rows
            .iter()
            .zip(&self.clusters)
            .filter(|(row, &c)| c == cluster && row.branch == branch)
            .map(|(row, _)| row)
            .collect()
    }

    /// Builds the yearly skill split plus resources for one student.
    /// Resources come from the first matching row only.
    pub fn recommend_path(&self, branch: &str, role: &str, skill: &str, year: i32) -> NonItPath {
        let matched = self.matching_rows(branch, skill);
        debug!(
            "Non-IT path for branch '{branch}', role '{role}': {} matching rows",
            matched.len()
        );

        let Some(first) = matched.first() else {
            return NonItPath::empty();
        };

        let remaining = remaining_skills(&matched, skill);
        let resource = |cell: &Option<String>| {
            cell.clone()
                .unwrap_or_else(|| NO_RECOMMENDATIONS.to_string())
        };

        NonItPath {
            skill_division: divide_skills_by_year(&remaining, year),
            certifications: resource(&first.certifications),
            internships: resource(&first.internships),
            projects: resource(&first.projects),
        }
    }
}

/// Union of the matched rows' skills minus the user's own, deduplicated
/// case-insensitively in first-appearance order.
fn remaining_skills(matched: &[&NonItRecord], user_skills: &str) -> Vec<String> {
    let mut seen: HashSet<String> = split_skills(user_skills)
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let mut remaining = Vec::new();
    for row in matched {
        for skill in split_skills(&row.skills) {
            if seen.insert(skill.to_lowercase()) {
                remaining.push(skill);
            }
        }
    }
    remaining
}

/// Four buckets bounded at `max(3, n/4)`, `max(6, n/2)`, `max(9, 3n/4)`;
/// only years from `user_year` (at least 1) to year 4 are returned.
pub fn divide_skills_by_year(remaining: &[String], user_year: i32) -> LearningPath {
    let n = remaining.len();
    let bounds = [
        0,
        (n / 4).max(3).min(n),
        (n / 2).max(6).min(n),
        (3 * n / 4).max(9).min(n),
        n,
    ];

    let mut path = LearningPath::default();
    for year in user_year.max(1)..=FINAL_YEAR {
        let bucket = year as usize - 1;
        path.push_year(year, remaining[bounds[bucket]..bounds[bucket + 1]].to_vec());
    }
    path
}
