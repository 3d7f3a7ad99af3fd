use std::collections::BTreeMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::database::ActivityStore;
use crate::error::RegistrationError;
use crate::services::activities_service::{self, ActivityView};
use crate::services::registration_service::{self, Registration};

#[derive(Debug, Deserialize)]
pub struct RegistrationQuery {
    pub email: String,
}

pub async fn list_activities_handler(
    State(store): State<ActivityStore>,
) -> Json<BTreeMap<String, ActivityView>> {
    Json(activities_service::list_activities(&store))
}

pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<RegistrationQuery>,
    State(store): State<ActivityStore>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    registration_service::signup(&store, &activity_name, &query.email)
        .map(confirmation)
        .map_err(|e| {
            warn!(activity = %e.activity(), email = %query.email, error = %e, "signup rejected");
            rejection(&e)
        })
}

pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(query): Query<RegistrationQuery>,
    State(store): State<ActivityStore>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    registration_service::unregister(&store, &activity_name, &query.email)
        .map(confirmation)
        .map_err(|e| {
            warn!(activity = %e.activity(), email = %query.email, error = %e, "unregister rejected");
            rejection(&e)
        })
}

fn confirmation(registration: Registration) -> Json<Value> {
    Json(serde_json::json!({ "message": registration.message() }))
}

fn rejection(err: &RegistrationError) -> (StatusCode, Json<Value>) {
    let status = match err {
        RegistrationError::NotFound { .. } => StatusCode::NOT_FOUND,
        RegistrationError::Conflict { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(serde_json::json!({ "detail": err.to_string() })))
}
