use parentmanager_core::AppError;
use parentmanager_domain::UserId;
use url::Url;

const PROFILE_PATH: &str = "user/profile.php";

/// Builds links to user profiles on the host platform.
#[derive(Debug, Clone)]
pub struct ProfileLinks {
    profile_base: Url,
}

impl ProfileLinks {
    pub fn new(host_base_url: &str) -> Result<Self, AppError> {
        let mut base = Url::parse(host_base_url).map_err(|error| {
            AppError::Validation(format!("invalid HOST_BASE_URL '{host_base_url}': {error}"))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let profile_base = base.join(PROFILE_PATH).map_err(|error| {
            AppError::Validation(format!("invalid HOST_BASE_URL '{host_base_url}': {error}"))
        })?;

        Ok(Self { profile_base })
    }

    pub fn profile_url(&self, user_id: UserId) -> String {
        let mut url = self.profile_base.clone();
        url.query_pairs_mut()
            .append_pair("id", user_id.as_i64().to_string().as_str());
        url.into()
    }
}

#[cfg(test)]
mod tests {
    use parentmanager_core::AppError;
    use parentmanager_domain::UserId;

    use super::ProfileLinks;

    #[test]
    fn profile_url_keeps_host_subdirectory() {
        let links = ProfileLinks::new("https://school.example.org/lms");
        assert!(links.is_ok());
        let links = links.unwrap_or_else(|_| unreachable!());

        assert_eq!(
            links.profile_url(UserId::from_i64(42)),
            "https://school.example.org/lms/user/profile.php?id=42"
        );
    }

    #[test]
    fn profile_url_at_host_root() {
        let links = ProfileLinks::new("http://localhost:3000/");
        assert!(links.is_ok());

        assert_eq!(
            links
                .unwrap_or_else(|_| unreachable!())
                .profile_url(UserId::from_i64(7)),
            "http://localhost:3000/user/profile.php?id=7"
        );
    }

    #[test]
    fn malformed_base_is_rejected() {
        assert!(matches!(
            ProfileLinks::new("not a url"),
            Err(AppError::Validation(_))
        ));
    }
}
