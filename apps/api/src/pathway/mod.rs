#![allow(dead_code)]

// Skill-gap scheduling: splitting a role's remaining skills across the
// student's remaining academic years.

pub mod handlers;
pub mod learning_path;
pub mod nonit;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

pub const DEFAULT_TOTAL_YEARS: i32 = 4;
/// Longest programme a learning path may span.
pub const MAX_TOTAL_YEARS: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Job role '{0}' not found.")]
    RoleNotFound(String),

    #[error("You have completed your academic years.")]
    YearsExhausted,
}

/// Ordered `"Year n"` → skills mapping. Serializes as a JSON object whose
/// keys keep year order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearningPath {
    years: Vec<(String, Vec<String>)>,
}

impl LearningPath {
    pub fn push_year(&mut self, year: i32, skills: Vec<String>) {
        self.years.push((year_label(year), skills));
    }

    pub fn get(&self, label: &str) -> Option<&[String]> {
        self.years
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, skills)| skills.as_slice())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.years.iter().map(|(l, _)| l.as_str())
    }

    /// All skills in year order.
    pub fn flatten(&self) -> Vec<String> {
        self.years
            .iter()
            .flat_map(|(_, skills)| skills.iter().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl Serialize for LearningPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.years.len()))?;
        for (label, skills) in &self.years {
            map.serialize_entry(label, skills)?;
        }
        map.end()
    }
}

pub fn year_label(year: i32) -> String {
    format!("Year {year}")
}

/// Splits a comma-separated skill list, trimming entries and dropping blanks.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
