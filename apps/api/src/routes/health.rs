use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and which domains loaded at startup.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "pathway-api",
        "models": {
            "it": state.it_model.is_some(),
            "learning_path": state.role_skills.is_some(),
            "nonit": state.nonit_model.is_some()
        }
    }))
}
