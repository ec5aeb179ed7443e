use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::{
    error::AppError,
    handlers::auth::bad_json,
    models::{account::AccountView, auth::DevicesRequest},
    state::AppState,
};

/// Lists every device registered for an account. Unauthenticated; the
/// credential is never part of the response.
pub async fn list_devices(
    State(state): State<AppState>,
    payload: Result<Json<DevicesRequest>, JsonRejection>,
) -> Result<Json<AccountView>, AppError> {
    let Json(payload) = payload.map_err(|_| bad_json())?;
    let view = state.sessions.list_devices(&payload.username).await?;
    Ok(Json(view))
}
