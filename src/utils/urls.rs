use url::{ParseError, Url};

pub fn to_url(host: &str) -> Result<Url, ParseError> {
    Url::parse(host)
}

/// Joins an API path onto a base address, keeping any path prefix the base carries.
pub fn endpoint_url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    let prefix = base.path().trim_end_matches('/');
    url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));
    url
}

#[cfg(test)]
mod tests {
    use super::{endpoint_url, to_url};

    #[test]
    fn joins_paths_onto_bare_and_prefixed_bases() {
        let bare = to_url("http://localhost:5000").unwrap();
        assert_eq!(
            endpoint_url(&bare, "/api/upload-excel").as_str(),
            "http://localhost:5000/api/upload-excel"
        );

        let prefixed = to_url("https://example.net/backend/").unwrap();
        assert_eq!(
            endpoint_url(&prefixed, "api/validate-password").as_str(),
            "https://example.net/backend/api/validate-password"
        );
    }

    #[test]
    fn rejects_relative_bases() {
        assert!(to_url("not a url").is_err());
    }
}
