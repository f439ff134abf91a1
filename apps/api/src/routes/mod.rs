pub mod health;

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::pathway::handlers as pathway;
use crate::recommendation::handlers as recommendation;
use crate::recruitment::handlers as recruitment;
use crate::state::AppState;

pub fn build_router(state: AppState, frontend_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend_it", post(recommendation::handle_recommend_it))
        .route("/learning_path", post(pathway::handle_learning_path))
        .route("/recommend_nonit", post(pathway::handle_recommend_nonit))
        .route("/get_recruitment", post(recruitment::handle_get_recruitment))
        // Static frontend; index.html is served at "/"
        .fallback_service(ServeDir::new(frontend_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::data::loader::ItResources;
    use crate::llm_client::LlmError;
    use crate::ml::kmeans::KMeansConfig;
    use crate::models::records::{NonItRecord, ResourceRecord, RoleSkillsRecord};
    use crate::pathway::learning_path::RoleSkills;
    use crate::pathway::nonit::NonItModel;
    use crate::recommendation::corpus::build_corpus;
    use crate::recommendation::suggest::ItModel;
    use crate::recruitment::{DisabledRecruitmentSource, RecruitmentSource};

    struct EchoSource;

    #[async_trait]
    impl RecruitmentSource for EchoSource {
        async fn fetch(&self, company_name: &str, job_role: &str) -> Result<String, LlmError> {
            Ok(format!("{job_role} at {company_name}: aptitude, technical, HR"))
        }
    }

    fn single_cluster() -> KMeansConfig {
        KMeansConfig {
            k: 1,
            ..KMeansConfig::default()
        }
    }

    fn resource(role: &str, skill: &str, name: &str) -> ResourceRecord {
        ResourceRecord {
            job_role: role.to_string(),
            skill: skill.to_string(),
            resource: name.to_string(),
        }
    }

    fn loaded_state() -> AppState {
        let resources = ItResources {
            certifications: vec![resource("Data Scientist", "Python", "PCAP")],
            internships: vec![resource("Data Scientist", "SQL", "Analytics Internship")],
            projects: vec![resource("Web Developer", "React", "Portfolio")],
        };
        let it_model = ItModel::fit(build_corpus(&resources), &single_cluster()).unwrap();

        let role_skills = RoleSkills::from_records(&[RoleSkillsRecord {
            job_role: "Data Scientist".to_string(),
            skills: "Python, SQL, Statistics, ML, Deep Learning".to_string(),
        }]);

        let nonit_model = NonItModel::fit(
            vec![NonItRecord {
                branch: "Civil".to_string(),
                job_role: "Site Engineer".to_string(),
                skills: "AutoCAD, Surveying, Estimation".to_string(),
                certifications: Some("LEED".to_string()),
                internships: Some("L&T".to_string()),
                projects: Some("Bridge Model".to_string()),
            }],
            &single_cluster(),
        )
        .unwrap();

        AppState {
            it_model: Some(Arc::new(it_model)),
            role_skills: Some(Arc::new(role_skills)),
            nonit_model: Some(Arc::new(nonit_model)),
            recruitment: Arc::new(EchoSource),
        }
    }

    fn empty_state() -> AppState {
        AppState {
            it_model: None,
            role_skills: None,
            nonit_model: None,
            recruitment: Arc::new(DisabledRecruitmentSource),
        }
    }

    async fn post(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let app = build_router(state, Path::new("frontend-not-present"));
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_recommend_it_returns_three_categories() {
        let (status, body) = post(
            loaded_state(),
            "/recommend_it",
            json!({"job_role": "Data Scientist", "skill": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["Certifications"], json!(["Data Scientist Python PCAP"]));
        assert!(body["Internships"].is_array());
        assert!(body["Projects"].is_array());
    }

    #[tokio::test]
    async fn test_unloaded_models_are_unavailable() {
        let (status, body) = post(
            empty_state(),
            "/recommend_it",
            json!({"job_role": "Data Scientist", "skill": "Python"}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "MODEL_UNAVAILABLE");

        let (status, _) = post(
            empty_state(),
            "/recommend_nonit",
            json!({"branch": "Civil", "job_role": "x", "skill": "AutoCAD", "year": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_learning_path_in_year_order() {
        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "data scientist", "current_year": "2"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "Year 2": ["Python", "SQL"],
                "Year 3": ["Statistics", "ML"],
                "Year 4": ["Deep Learning"]
            })
        );
    }

    #[tokio::test]
    async fn test_learning_path_unknown_role_and_finished_years() {
        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "Astronaut", "current_year": 1}),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["message"], "Job role 'Astronaut' not found.");

        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "Data Scientist", "current_year": 5}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "YEARS_EXHAUSTED");
    }

    #[tokio::test]
    async fn test_learning_path_rejects_non_integer_year() {
        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "Data Scientist", "current_year": "second"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_learning_path_rejects_oversized_total_years() {
        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "Data Scientist", "current_year": 1, "total_years": 2_147_483_647}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_learning_path_zero_total_years_is_exhausted() {
        let (status, body) = post(
            loaded_state(),
            "/learning_path",
            json!({"job_role": "Data Scientist", "current_year": 1, "total_years": 0}),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "YEARS_EXHAUSTED");
    }

    #[tokio::test]
    async fn test_recommend_nonit_shape() {
        let (status, body) = post(
            loaded_state(),
            "/recommend_nonit",
            json!({"branch": "Civil", "job_role": "Site Engineer", "skill": "AutoCAD", "year": "3"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["skill_division"],
            json!({"Year 3": [], "Year 4": []})
        );
        assert_eq!(body["certifications"], "LEED");
        assert_eq!(body["projects"], "Bridge Model");
    }

    #[tokio::test]
    async fn test_recruitment_uses_source() {
        let (status, body) = post(
            loaded_state(),
            "/get_recruitment",
            json!({"company_name": "TCS", "job_role": "Developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["recruitment_process"],
            "Developer at TCS: aptitude, technical, HR"
        );
    }

    #[tokio::test]
    async fn test_recruitment_failure_does_not_touch_models() {
        let mut state = loaded_state();
        state.recruitment = Arc::new(DisabledRecruitmentSource);

        let (status, _) = post(
            state.clone(),
            "/get_recruitment",
            json!({"company_name": "TCS", "job_role": "Developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = post(
            state,
            "/recommend_it",
            json!({"job_role": "Web Developer", "skill": "React"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_domains() {
        let app = build_router(empty_state(), Path::new("frontend-not-present"));
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["models"]["it"], false);
        assert_eq!(body["models"]["nonit"], false);
    }
}
