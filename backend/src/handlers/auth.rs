use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{
        header::{COOKIE, SET_COOKIE, USER_AGENT},
        HeaderMap,
    },
    response::IntoResponse,
    Json,
};
use chrono::Utc;

use crate::{
    error::AppError,
    models::auth::{LoginRequest, LoginResponse, LogoutResponse},
    state::AppState,
    types::CallerSessionId,
    utils::{
        cookies::{
            build_clear_session_cookie, build_session_cookie, extract_cookie_value,
            SESSION_COOKIE_NAME,
        },
        time::format_local,
    },
};

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload.map_err(|_| bad_json())?;
    let user_agent = extract_user_agent(&headers).unwrap_or_default();
    let current = extract_session_id(&headers);

    let registration = state
        .sessions
        .authenticate_and_register(
            &payload.username,
            &payload.password,
            &payload.device_name,
            &user_agent,
            current.as_ref(),
        )
        .await?;

    let device = registration.device;
    let max_age = Duration::from_secs(state.config.session_timeout.num_seconds().unsigned_abs());
    let cookie = build_session_cookie(
        &registration.session.id.to_string(),
        max_age,
        state.config.cookie_options(),
    );

    let response = LoginResponse {
        message: format!(
            "Logged in from {} at {}",
            device.device_name,
            format_local(device.login_time, &state.config.time_zone)
        ),
        device_id: device.device_id,
        user_agent: device.client_descriptor,
    };

    Ok(([(SET_COOKIE, cookie)], Json(response)))
}

pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let current = extract_session_id(&headers);
    let remaining = state.sessions.logout_collapse(current.as_ref()).await?;

    let response = LogoutResponse {
        message: format!(
            "Logged out all devices except the most recent one at {}",
            format_local(Utc::now(), &state.config.time_zone)
        ),
        remaining_device: remaining,
    };
    let cookie = build_clear_session_cookie(state.config.cookie_options());

    Ok(([(SET_COOKIE, cookie)], Json(response)))
}

pub(crate) fn bad_json() -> AppError {
    AppError::BadRequest("Request body must be a JSON object".into())
}

/// A malformed cookie is treated as no session at all.
fn extract_session_id(headers: &HeaderMap) -> Option<CallerSessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find_map(|header| extract_cookie_value(header, SESSION_COOKIE_NAME))
        .and_then(|value| value.parse().ok())
}

fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|agent| !agent.is_empty())
        .map(str::to_string)
}
