use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use parentmanager_core::{AppError, UserIdentity};
use sha2::{Digest, Sha256};
use tower_sessions::Session;
use tracing::{info, warn};

use crate::dto::BootstrapRequest;
use crate::error::ApiResult;
use crate::state::AppState;

use super::{SESSION_CREATED_AT_KEY, SESSION_USER_KEY};

/// Exchanges a host-issued bootstrap token for an authenticated session.
pub async fn bootstrap_handler(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<BootstrapRequest>,
) -> ApiResult<StatusCode> {
    if !tokens_match(&payload.token, &state.bootstrap_token) {
        warn!(subject = %payload.subject, "rejected bootstrap with invalid token");
        return Err(AppError::Unauthorized("invalid bootstrap token".to_owned()).into());
    }

    let identity = identity_from_bootstrap(payload)?;

    session
        .cycle_id()
        .await
        .map_err(|error| AppError::Internal(format!("failed to cycle session id: {error}")))?;

    session
        .insert(SESSION_USER_KEY, &identity)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session identity: {error}"))
        })?;

    session
        .insert(SESSION_CREATED_AT_KEY, chrono::Utc::now().timestamp())
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to persist session creation time: {error}"))
        })?;

    info!(subject = identity.subject(), "session established");
    Ok(StatusCode::NO_CONTENT)
}

/// Compares SHA-256 digests so the comparison time does not depend on where
/// the tokens first differ.
fn tokens_match(presented: &str, expected: &str) -> bool {
    let presented = Sha256::digest(presented.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    presented
        .iter()
        .zip(expected.iter())
        .fold(0_u8, |difference, (left, right)| difference | (left ^ right))
        == 0
}

fn identity_from_bootstrap(payload: BootstrapRequest) -> Result<UserIdentity, AppError> {
    let subject = payload.subject.trim().to_owned();
    if subject.is_empty() {
        return Err(AppError::Validation("subject must not be empty".to_owned()));
    }

    let display_name = payload
        .display_name
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| subject.clone());

    Ok(UserIdentity::new(subject, display_name, payload.email))
}

#[cfg(test)]
mod tests {
    use parentmanager_core::AppError;

    use super::{identity_from_bootstrap, tokens_match};
    use crate::dto::BootstrapRequest;

    fn request(subject: &str, display_name: Option<&str>) -> BootstrapRequest {
        BootstrapRequest {
            subject: subject.to_owned(),
            token: "token".to_owned(),
            display_name: display_name.map(ToOwned::to_owned),
            email: None,
        }
    }

    #[test]
    fn display_name_defaults_to_subject() {
        let identity = identity_from_bootstrap(request(" admin ", Some("  ")));
        assert!(identity.is_ok());
        let identity = identity.unwrap_or_else(|_| unreachable!());

        assert_eq!(identity.subject(), "admin");
        assert_eq!(identity.display_name(), "admin");
    }

    #[test]
    fn tokens_match_only_on_exact_equality() {
        assert!(tokens_match("bootstrap-token", "bootstrap-token"));
        assert!(!tokens_match("bootstrap-tokex", "bootstrap-token"));
        assert!(!tokens_match("bootstrap-token-longer", "bootstrap-token"));
        assert!(!tokens_match("", "bootstrap-token"));
    }

    #[test]
    fn blank_subject_is_rejected() {
        assert!(matches!(
            identity_from_bootstrap(request("   ", None)),
            Err(AppError::Validation(_))
        ));
    }
}
