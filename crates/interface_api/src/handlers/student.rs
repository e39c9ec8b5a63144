//! Profile handlers for the signed-in student

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};
use domain_student::{ChangePassword, ProfileUpdate};

use crate::auth::Claims;
use crate::dto::student::{ProfileResponse, ProfileUpdatedResponse};
use crate::dto::MessageResponse;
use crate::{error::ApiError, AppState};

/// Returns the signed-in student's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let student = state.students.profile(claims.student_id()?).await?;
    Ok(Json(ProfileResponse {
        student: (&student).into(),
    }))
}

/// Updates names and, optionally, the email
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<ProfileUpdatedResponse>, ApiError> {
    let Json(update) = payload?;
    let student = state
        .students
        .update_profile(claims.student_id()?, update)
        .await?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated successfully".to_string(),
        student: (&student).into(),
    }))
}

pub async fn change_password(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<ChangePassword>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    state
        .students
        .change_password(claims.student_id()?, request)
        .await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
