//! coordinate
//!
//! Artifact coordinate parsing and formatting.
//!
//! # Design
//!
//! A coordinate is the four-field locator `group:artifact:version:extension`
//! that every repository operation works from. Parsing is strict: anything
//! other than exactly four non-empty colon-separated fields is rejected up
//! front, so malformed input fails here instead of leaking missing fields
//! into repository URLs.
//!
//! The version field may be the case-insensitive alias `latest`. That is a
//! resolution request, not a real version; see [`crate::resolve`].
//!
//! # Example
//!
//! ```
//! use stevedore::coordinate::ArtifactCoordinate;
//!
//! let coord = ArtifactCoordinate::parse("com.example:app:1.4.2:tgz").unwrap();
//! assert_eq!(coord.artifact, "app");
//! assert!(!coord.is_latest());
//!
//! let alias = ArtifactCoordinate::parse("com.example:app:LATEST:tgz").unwrap();
//! assert!(alias.is_latest());
//! ```

use thiserror::Error;

/// The case-insensitive version alias that requests resolution.
pub const LATEST_ALIAS: &str = "latest";

/// Errors from coordinate parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    /// Input did not split into exactly four non-empty fields.
    #[error("malformed artifact coordinate '{input}': expected group:artifact:version:extension")]
    Malformed {
        /// The rejected input string.
        input: String,
    },
}

/// A parsed artifact coordinate.
///
/// Constructed only through [`ArtifactCoordinate::parse`], so a value of
/// this type always has all four fields populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactCoordinate {
    /// Group identifier, e.g. `com.example`
    pub group: String,
    /// Artifact identifier
    pub artifact: String,
    /// Version, or the `latest` alias (any case)
    pub version: String,
    /// File extension, e.g. `tgz` or `jar`
    pub extension: String,
}

impl ArtifactCoordinate {
    /// Parse a coordinate string of the form
    /// `<group>:<artifact>:<version>:<extension>`.
    ///
    /// # Errors
    ///
    /// [`CoordinateError::Malformed`] when the input does not split into
    /// exactly four non-empty fields.
    pub fn parse(input: &str) -> Result<Self, CoordinateError> {
        let fields: Vec<&str> = input.split(':').collect();
        if fields.len() != 4 || fields.iter().any(|f| f.is_empty()) {
            return Err(CoordinateError::Malformed {
                input: input.to_string(),
            });
        }

        Ok(Self {
            group: fields[0].to_string(),
            artifact: fields[1].to_string(),
            version: fields[2].to_string(),
            extension: fields[3].to_string(),
        })
    }

    /// Whether the version field is the `latest` alias (case-insensitive).
    pub fn is_latest(&self) -> bool {
        self.version.eq_ignore_ascii_case(LATEST_ALIAS)
    }

    /// Copy of this coordinate with the version replaced.
    ///
    /// Used after resolution to turn a `latest` coordinate into a concrete
    /// one before fetching.
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ..self.clone()
        }
    }

    /// File name a pull writes into the destination directory:
    /// `<artifact>-<version>.<extension>`.
    pub fn file_name(&self) -> String {
        format!("{}-{}.{}", self.artifact, self.version, self.extension)
    }
}

impl std::fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group, self.artifact, self.version, self.extension
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_four_fields() {
        let coord = ArtifactCoordinate::parse("com.example:app:1.0.1:tgz").unwrap();
        assert_eq!(coord.group, "com.example");
        assert_eq!(coord.artifact, "app");
        assert_eq!(coord.version, "1.0.1");
        assert_eq!(coord.extension, "tgz");
    }

    #[test]
    fn parse_too_few_fields() {
        let result = ArtifactCoordinate::parse("com.example:app:1.0.1");
        assert!(matches!(result, Err(CoordinateError::Malformed { .. })));
    }

    #[test]
    fn parse_too_many_fields() {
        let result = ArtifactCoordinate::parse("com.example:app:1.0.1:tgz:extra");
        assert!(matches!(result, Err(CoordinateError::Malformed { .. })));
    }

    #[test]
    fn parse_empty_field() {
        let result = ArtifactCoordinate::parse("com.example:app::tgz");
        assert!(matches!(result, Err(CoordinateError::Malformed { .. })));
    }

    #[test]
    fn parse_empty_input() {
        let result = ArtifactCoordinate::parse("");
        assert!(matches!(result, Err(CoordinateError::Malformed { .. })));
    }

    #[test]
    fn malformed_error_names_the_input() {
        let err = ArtifactCoordinate::parse("not-a-coordinate").unwrap_err();
        assert!(err.to_string().contains("not-a-coordinate"));
    }

    #[test]
    fn latest_alias_is_case_insensitive() {
        for version in ["latest", "LATEST", "Latest", "lAtEsT"] {
            let coord =
                ArtifactCoordinate::parse(&format!("g:a:{}:tgz", version)).unwrap();
            assert!(coord.is_latest(), "'{}' should be the alias", version);
        }
    }

    #[test]
    fn literal_version_is_not_latest() {
        let coord = ArtifactCoordinate::parse("g:a:2.0.5:tgz").unwrap();
        assert!(!coord.is_latest());
    }

    #[test]
    fn with_version_replaces_only_version() {
        let coord = ArtifactCoordinate::parse("g:a:latest:tgz").unwrap();
        let resolved = coord.with_version("2.0.5");
        assert_eq!(resolved.version, "2.0.5");
        assert_eq!(resolved.group, "g");
        assert_eq!(resolved.artifact, "a");
        assert_eq!(resolved.extension, "tgz");
    }

    #[test]
    fn file_name_format() {
        let coord = ArtifactCoordinate::parse("com.example:app:2.0.5:tgz").unwrap();
        assert_eq!(coord.file_name(), "app-2.0.5.tgz");
    }

    #[test]
    fn display_round_trips() {
        let input = "com.example:app:1.0.1:tgz";
        let coord = ArtifactCoordinate::parse(input).unwrap();
        assert_eq!(coord.to_string(), input);
    }
}
