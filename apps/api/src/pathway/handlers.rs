//! Axum route handlers for the learning-path endpoints.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::pathway::nonit::NonItPath;
use crate::pathway::{LearningPath, DEFAULT_TOTAL_YEARS, MAX_TOTAL_YEARS};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LearningPathRequest {
    pub job_role: String,
    pub current_year: Value,
    #[serde(default)]
    pub total_years: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendNonItRequest {
    pub branch: String,
    pub job_role: String,
    pub skill: String,
    pub year: Value,
}

/// POST /learning_path
///
/// Splits the role's skills across the remaining academic years.
pub async fn handle_learning_path(
    State(state): State<AppState>,
    Json(request): Json<LearningPathRequest>,
) -> Result<Json<LearningPath>, AppError> {
    let role_skills = state.role_skills()?;

    require_non_empty("job_role", &request.job_role)?;
    let current_year = parse_year("current_year", &request.current_year)?;
    let total_years = match &request.total_years {
        Some(value) => parse_total_years(value)?,
        None => DEFAULT_TOTAL_YEARS,
    };

    let path = role_skills.learning_path(&request.job_role, current_year, total_years)?;
    Ok(Json(path))
}

/// POST /recommend_nonit
///
/// Branch-aware skill split plus first-match resources for Non-IT students.
pub async fn handle_recommend_nonit(
    State(state): State<AppState>,
    Json(request): Json<RecommendNonItRequest>,
) -> Result<Json<NonItPath>, AppError> {
    let model = state.nonit_model()?;

    require_non_empty("branch", &request.branch)?;
    require_non_empty("skill", &request.skill)?;
    let year = parse_year("year", &request.year)?;

    Ok(Json(model.recommend_path(
        &request.branch,
        &request.job_role,
        &request.skill,
        year,
    )))
}

fn require_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Accepts a JSON integer or a numeric string (the frontend sends either).
fn parse_int(field: &str, value: &Value) -> Result<i32, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::Validation(format!("{field} must be an integer.")))
}

/// Years start at 1.
fn parse_year(field: &str, value: &Value) -> Result<i32, AppError> {
    match parse_int(field, value)? {
        year if year >= 1 => Ok(year),
        _ => Err(AppError::Validation(format!("{field} must be at least 1"))),
    }
}

/// Zero is let through so the scheduler reports the years as exhausted.
fn parse_total_years(value: &Value) -> Result<i32, AppError> {
    match parse_int("total_years", value)? {
        total if (0..=MAX_TOTAL_YEARS).contains(&total) => Ok(total),
        _ => Err(AppError::Validation(format!(
            "total_years must be between 0 and {MAX_TOTAL_YEARS}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_year_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_year("year", &json!(2)).unwrap(), 2);
        assert_eq!(parse_year("year", &json!(" 3 ")).unwrap(), 3);
    }

    #[test]
    fn test_parse_year_rejects_non_integers() {
        for value in [json!("two"), json!(2.5), json!(null), json!([1])] {
            assert!(matches!(
                parse_year("year", &value),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_parse_year_rejects_zero_and_negative() {
        assert!(parse_year("current_year", &json!(0)).is_err());
        assert!(parse_year("current_year", &json!("-1")).is_err());
    }

    #[test]
    fn test_total_years_is_bounded() {
        assert_eq!(parse_total_years(&json!(4)).unwrap(), 4);
        assert_eq!(parse_total_years(&json!("10")).unwrap(), MAX_TOTAL_YEARS);
        for value in [json!(11), json!(2_147_483_647), json!(-1)] {
            assert!(matches!(
                parse_total_years(&value),
                Err(AppError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_total_years_zero_reaches_scheduler() {
        assert_eq!(parse_total_years(&json!(0)).unwrap(), 0);
    }
}
