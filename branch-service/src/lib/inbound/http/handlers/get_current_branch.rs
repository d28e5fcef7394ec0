use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::branch::errors::BranchError;
use crate::domain::branch::models::Branch;
use crate::domain::branch::models::Login;
use crate::domain::branch::ports::BranchServicePort;
use crate::inbound::http::middleware::AuthenticatedBranch;
use crate::inbound::http::router::AppState;

pub async fn get_current_branch(
    State(state): State<AppState>,
    Extension(authenticated): Extension<AuthenticatedBranch>,
) -> Result<ApiSuccess<CurrentBranchResponseData>, ApiError> {
    let login = Login::new(authenticated.login)
        .map_err(|_| ApiError::Unauthorized("Invalid token".to_string()))?;

    let branch = state
        .branch_service
        .get_branch_by_login(&login)
        .await
        .map_err(|e| match e {
            // Token outlived the branch it was issued to
            BranchError::NotFoundByLogin(_) => ApiError::Unauthorized("Invalid token".to_string()),
            _ => ApiError::from(e),
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentBranchResponseData::new(&branch, authenticated.token_expires_at),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentBranchResponseData {
    pub id: i32,
    pub name: String,
    pub login: String,
    pub active: Option<bool>,
    pub token_expires_at: DateTime<Utc>,
}

impl CurrentBranchResponseData {
    fn new(branch: &Branch, token_expires_at: DateTime<Utc>) -> Self {
        Self {
            id: branch.id.0,
            name: branch.name.clone(),
            login: branch.login.as_str().to_string(),
            active: branch.active,
            token_expires_at,
        }
    }
}
