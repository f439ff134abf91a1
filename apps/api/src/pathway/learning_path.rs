//! IT learning path: a role's skill list sliced into equal-sized yearly chunks.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::records::RoleSkillsRecord;
use crate::pathway::{split_skills, LearningPath, PathError};

/// Trimmed role name → comma-joined skills. Rows repeating a role are joined
/// with `", "` in row order; skills are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct RoleSkills {
    roles: BTreeMap<String, String>,
}

impl RoleSkills {
    pub fn from_records(records: &[RoleSkillsRecord]) -> Self {
        let mut roles: BTreeMap<String, String> = BTreeMap::new();
        for record in records {
            let role = record.job_role.trim();
            if role.is_empty() || record.skills.trim().is_empty() {
                continue;
            }
            roles
                .entry(role.to_string())
                .and_modify(|joined| {
                    joined.push_str(", ");
                    joined.push_str(&record.skills);
                })
                .or_insert_with(|| record.skills.clone());
        }
        Self { roles }
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Trimmed, case-insensitive role lookup. On a case-variant collision the
    /// lexicographically first key wins.
    pub fn skills_for(&self, role: &str) -> Option<Vec<String>> {
        let wanted = role.trim().to_lowercase();
        self.roles
            .iter()
            .find(|(key, _)| key.to_lowercase() == wanted)
            .map(|(_, joined)| split_skills(joined))
    }

    /// Distributes the role's skills over `current_year ..= total_years`,
    /// `ceil(skills / years_left)` per year.
    pub fn learning_path(
        &self,
        role: &str,
        current_year: i32,
        total_years: i32,
    ) -> Result<LearningPath, PathError> {
        let skills = self
            .skills_for(role)
            .ok_or_else(|| PathError::RoleNotFound(role.to_string()))?;

        let years_left = total_years - current_year + 1;
        if years_left <= 0 {
            return Err(PathError::YearsExhausted);
        }

        debug!(
            "Learning path for '{}': {} skills over {years_left} years",
            role.trim(),
            skills.len()
        );
        Ok(split_into_years(&skills, current_year, years_left as usize))
    }
}

/// Contiguous chunks of `ceil(len / years_left)` skills, one per year starting
/// at `current_year`. Trailing years may be short or empty.
pub fn split_into_years(skills: &[String], current_year: i32, years_left: usize) -> LearningPath {
    let mut path = LearningPath::default();
    if years_left == 0 {
        return path;
    }
    let per_year = skills.len().div_ceil(years_left);

    for i in 0..years_left {
        let start = (i * per_year).min(skills.len());
        let end = (start + per_year).min(skills.len());
        path.push_year(current_year + i as i32, skills[start..end].to_vec());
    }
    path
}
