//! download
//!
//! Direct-download URL construction.
//!
//! # Design
//!
//! Building the redirect URL is pure string work over an already-resolved
//! coordinate and config: no resolution, no I/O, fully deterministic. A
//! still-unresolved `latest` version is emitted literally — resolving it
//! first is the caller's job (see [`crate::resolve`]).

use reqwest::Url;
use thiserror::Error;

use crate::config::RepositoryConfig;
use crate::coordinate::ArtifactCoordinate;

/// Errors from URL construction.
#[derive(Debug, Error)]
pub enum DownloadUrlError {
    /// The configured base URL could not be parsed.
    #[error("invalid repository base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected base URL.
        url: String,
        /// Parse failure detail.
        reason: String,
    },
}

/// Build the direct-download redirect URL for a coordinate.
///
/// Output format:
/// `<scheme>://<host>:<port>/nexus/service/local/artifact/maven/redirect?g=<group>&a=<artifact>&v=<version>&e=<extension>&r=<repository>`
///
/// The scheme is `https` iff the configured base URL uses `https`, `http`
/// otherwise; a base URL without an explicit port gets the scheme's
/// well-known port.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use stevedore::config::RepositoryConfig;
/// use stevedore::coordinate::ArtifactCoordinate;
/// use stevedore::download::redirect_url;
///
/// let config = RepositoryConfig {
///     url: "https://nexus.example.com:8081".into(),
///     repository: "releases".into(),
///     username: None,
///     password: None,
///     extra: HashMap::new(),
/// };
/// let coord = ArtifactCoordinate::parse("com.x:y:1.0:jar").unwrap();
///
/// assert_eq!(
///     redirect_url(&coord, &config).unwrap(),
///     "https://nexus.example.com:8081/nexus/service/local/artifact/maven/redirect\
///      ?g=com.x&a=y&v=1.0&e=jar&r=releases",
/// );
/// ```
pub fn redirect_url(
    coordinate: &ArtifactCoordinate,
    config: &RepositoryConfig,
) -> Result<String, DownloadUrlError> {
    let base = Url::parse(&config.url).map_err(|e| DownloadUrlError::InvalidBaseUrl {
        url: config.url.clone(),
        reason: e.to_string(),
    })?;

    let scheme = if base.scheme() == "https" { "https" } else { "http" };
    let host = base
        .host_str()
        .ok_or_else(|| DownloadUrlError::InvalidBaseUrl {
            url: config.url.clone(),
            reason: "missing host".to_string(),
        })?;
    let port = base
        .port()
        .unwrap_or(if scheme == "https" { 443 } else { 80 });

    Ok(format!(
        "{scheme}://{host}:{port}/nexus/service/local/artifact/maven/redirect\
         ?g={g}&a={a}&v={v}&e={e}&r={r}",
        g = coordinate.group,
        a = coordinate.artifact,
        v = coordinate.version,
        e = coordinate.extension,
        r = config.repository,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(url: &str) -> RepositoryConfig {
        RepositoryConfig {
            url: url.to_string(),
            repository: "releases".to_string(),
            username: None,
            password: None,
            extra: HashMap::new(),
        }
    }

    fn coord(s: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::parse(s).unwrap()
    }

    #[test]
    fn builds_exact_redirect_url() {
        let url = redirect_url(&coord("com.x:y:1.0:jar"), &config("https://nexus.example.com:8081"))
            .expect("build url");
        assert_eq!(
            url,
            "https://nexus.example.com:8081/nexus/service/local/artifact/maven/redirect\
             ?g=com.x&a=y&v=1.0&e=jar&r=releases"
        );
    }

    #[test]
    fn http_base_url_stays_http() {
        let url = redirect_url(&coord("g:a:1.0:tgz"), &config("http://nexus.internal:8081"))
            .expect("build url");
        assert!(url.starts_with("http://nexus.internal:8081/"));
    }

    #[test]
    fn missing_port_uses_scheme_default() {
        let url = redirect_url(&coord("g:a:1.0:tgz"), &config("https://nexus.example.com"))
            .expect("build url");
        assert!(url.starts_with("https://nexus.example.com:443/"));

        let url = redirect_url(&coord("g:a:1.0:tgz"), &config("http://nexus.example.com"))
            .expect("build url");
        assert!(url.starts_with("http://nexus.example.com:80/"));
    }

    #[test]
    fn unresolved_latest_is_emitted_literally() {
        let url = redirect_url(
            &coord("g:a:latest:tgz"),
            &config("https://nexus.example.com:8081"),
        )
        .expect("build url");
        assert!(url.contains("v=latest"));
    }

    #[test]
    fn invalid_base_url_fails() {
        let err = redirect_url(&coord("g:a:1.0:tgz"), &config("not a url")).unwrap_err();
        assert!(matches!(err, DownloadUrlError::InvalidBaseUrl { .. }));
    }

    #[test]
    fn building_is_deterministic() {
        let cfg = config("https://nexus.example.com:8081");
        let c = coord("com.x:y:1.0:jar");
        assert_eq!(
            redirect_url(&c, &cfg).unwrap(),
            redirect_url(&c, &cfg).unwrap()
        );
    }
}
