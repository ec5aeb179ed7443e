use axum::Json;

use crate::models::auth::StatusResponse;

pub const STATUS_MESSAGE: &str = "SignOutSync Backend Running";

pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: STATUS_MESSAGE.to_string(),
    })
}
