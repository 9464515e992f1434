/// Configuration constants for the Calendly API
pub mod api {
    /// Base URL for the Calendly REST API
    pub const BASE_URL: &str = "https://api.calendly.com";

    /// Current-user endpoint
    pub const CURRENT_USER_PATH: &str = "/users/me";

    /// Organization memberships endpoint
    pub const ORG_MEMBERSHIPS_PATH: &str = "/organization_memberships";

    /// Invitations path segment, appended to an organization URI
    pub const INVITATIONS_SEGMENT: &str = "/invitations";

    /// Fixed page size applied to every phase's listing call
    pub const RESOURCES_PAGE_SIZE: u32 = 50;
}

/// Configuration constants for credentials
pub mod credentials {
    /// Environment variable names for the API token (checked in order)
    pub const TOKEN_ENV_VARS: &[&str] = &["CALENDLY_TOKEN", "CALENDLY_API_TOKEN"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_format() {
        assert!(api::BASE_URL.starts_with("https://"));
        assert!(!api::BASE_URL.ends_with('/'));
    }

    #[test]
    fn test_paths_start_with_slash() {
        assert!(api::CURRENT_USER_PATH.starts_with('/'));
        assert!(api::ORG_MEMBERSHIPS_PATH.starts_with('/'));
        assert!(api::INVITATIONS_SEGMENT.starts_with('/'));
    }

    #[test]
    fn test_page_size_is_positive() {
        assert!(api::RESOURCES_PAGE_SIZE > 0);
    }

    #[test]
    fn test_credentials_env_vars() {
        assert_eq!(
            credentials::TOKEN_ENV_VARS,
            &["CALENDLY_TOKEN", "CALENDLY_API_TOKEN"]
        );
    }
}
