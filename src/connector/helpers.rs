//! Small pure helpers shared by the syncers

/// Last path segment of a vendor URI.
///
/// Calendly identifies memberships and invitations by full URIs; the delete
/// endpoints take only the trailing identifier.
pub fn uri_tail(uri: &str) -> &str {
    uri.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(uri)
}

/// Split a full name into (first, last) on the first whitespace
pub fn split_full_name(full_name: &str) -> (String, String) {
    let trimmed = full_name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((first, rest)) => (first.to_string(), rest.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_tail() {
        assert_eq!(
            uri_tail("https://api.calendly.com/organization_memberships/mem-1"),
            "mem-1"
        );
        assert_eq!(
            uri_tail("https://api.calendly.com/organizations/org-1/"),
            "org-1"
        );
        assert_eq!(uri_tail("plain-id"), "plain-id");
    }

    #[test]
    fn test_split_full_name() {
        assert_eq!(
            split_full_name("Jane Doe"),
            ("Jane".to_string(), "Doe".to_string())
        );
        assert_eq!(
            split_full_name("Ana Maria da Silva"),
            ("Ana".to_string(), "Maria da Silva".to_string())
        );
        assert_eq!(
            split_full_name("Prince"),
            ("Prince".to_string(), String::new())
        );
        assert_eq!(split_full_name(""), (String::new(), String::new()));
    }
}
