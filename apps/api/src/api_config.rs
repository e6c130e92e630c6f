use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use parentmanager_core::AppError;
use parentmanager_domain::{DEFAULT_PARENTS_PER_PAGE, RoleId, RoleSyncSettings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub host_base_url: String,
    pub bootstrap_token: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub parent_role_auto_assign: bool,
    pub parent_role_id: i64,
    pub parents_per_page: u32,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let host_base_url = env::var("HOST_BASE_URL")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| frontend_url.clone());
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;
        let session_secret = required_env("SESSION_SECRET")?;
        if session_secret.len() < 32 {
            return Err(AppError::Validation(
                "SESSION_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = parse_flag(env::var("SESSION_COOKIE_SECURE").ok(), false);
        let parent_role_auto_assign = parse_flag(env::var("PARENT_ROLE_AUTO_ASSIGN").ok(), true);
        let parent_role_id = parse_number("PARENT_ROLE_ID", env::var("PARENT_ROLE_ID").ok(), 0)?;
        let parents_per_page = parse_number(
            "PARENTS_PER_PAGE",
            env::var("PARENTS_PER_PAGE").ok(),
            DEFAULT_PARENTS_PER_PAGE,
        )?;

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            host_base_url,
            bootstrap_token,
            api_host,
            api_port,
            cookie_secure,
            parent_role_auto_assign,
            parent_role_id,
            parents_per_page,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }

    pub fn role_sync_settings(&self) -> RoleSyncSettings {
        RoleSyncSettings::new(
            self.parent_role_auto_assign,
            RoleId::from_i64(self.parent_role_id),
        )
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

/// Reads `true`/`1`/`yes` and `false`/`0`/`no`; anything else keeps the default.
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some(flag) if ["true", "1", "yes"].iter().any(|v| flag.eq_ignore_ascii_case(v)) => true,
        Some(flag) if ["false", "0", "no"].iter().any(|v| flag.eq_ignore_ascii_case(v)) => false,
        _ => default,
    }
}

fn parse_number<T: FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, AppError>
where
    T::Err: std::fmt::Display,
{
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|error| AppError::Validation(format!("invalid {name} '{raw}': {error}"))),
    }
}

#[cfg(test)]
mod tests {
    use parentmanager_core::AppError;

    use super::{parse_flag, parse_number};

    #[test]
    fn flags_fall_back_to_default() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(Some("0".to_owned()), true));
        assert!(parse_flag(Some(" YES ".to_owned()), false));
        assert!(!parse_flag(Some("maybe".to_owned()), false));
    }

    #[test]
    fn numbers_reject_garbage() {
        assert!(matches!(parse_number::<i64>("PARENT_ROLE_ID", None, 0), Ok(0)));
        assert!(matches!(
            parse_number::<i64>("PARENT_ROLE_ID", Some("7".to_owned()), 0),
            Ok(7)
        ));
        assert!(matches!(
            parse_number::<u32>("PARENTS_PER_PAGE", Some("lots".to_owned()), 30),
            Err(AppError::Validation(_))
        ));
    }
}
