// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository reference parsing.
//!
//! A subscription stores the linked repository as a single `owner/repo`
//! string. This module splits and validates that identifier before any
//! remote call is issued, so malformed references fail fast with a
//! validation error instead of producing nonsense request paths.

use std::fmt;

use crate::{
    config::{CODE_REPOSITORY, PARAM_REPOSITORY},
    error::Error,
};

/// Owner/name pair identifying a single remote repository.
///
/// # Examples
///
/// ```
/// use ghlink::RepoReference;
///
/// let reference = RepoReference::parse("junit/gfi-gstack")?;
/// assert_eq!(reference.owner, "junit");
/// assert_eq!(reference.name, "gfi-gstack");
/// assert_eq!(reference.to_string(), "junit/gfi-gstack");
/// # Ok::<(), ghlink::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReference {
    /// Account owning the repository.
    pub owner: String,
    /// Repository name under the owner.
    pub name:  String,
}

impl RepoReference {
    /// Parses an `owner/repo` identifier into a reference.
    ///
    /// The identifier must contain exactly one `/` separating two non-empty
    /// segments. Surrounding whitespace is trimmed before splitting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the repository parameter key
    /// when the identifier does not resolve to exactly two non-empty
    /// segments.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let mut segments = trimmed.split('/');

        match (segments.next(), segments.next(), segments.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_owned(),
                name:  name.to_owned()
            }),
            _ => Err(Error::validation(PARAM_REPOSITORY, CODE_REPOSITORY))
        }
    }
}

impl fmt::Display for RepoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::RepoReference;
    use crate::error::Error;

    #[test]
    fn parses_owner_and_name() {
        let reference = RepoReference::parse("junit/gfi-gstack").expect("valid reference");
        assert_eq!(reference.owner, "junit");
        assert_eq!(reference.name, "gfi-gstack");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let reference = RepoReference::parse("  octocat/hello-world  ").expect("valid reference");
        assert_eq!(reference.to_string(), "octocat/hello-world");
    }

    #[test]
    fn rejects_missing_separator() {
        let error = RepoReference::parse("no-separator").unwrap_err();
        match error {
            Error::Validation {
                ref parameter,
                ref code
            } => {
                assert_eq!(parameter, "service:scm:github:repository");
                assert_eq!(code, "github-repository");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn rejects_empty_segments() {
        assert!(RepoReference::parse("/repo").is_err());
        assert!(RepoReference::parse("owner/").is_err());
        assert!(RepoReference::parse("/").is_err());
        assert!(RepoReference::parse("").is_err());
    }

    #[test]
    fn rejects_extra_segments() {
        assert!(RepoReference::parse("a/b/c").is_err());
    }

    proptest! {
        #[test]
        fn accepts_exactly_two_non_empty_segments(
            owner in "[a-zA-Z0-9-]{1,16}",
            name in "[a-zA-Z0-9._-]{1,24}"
        ) {
            let raw = format!("{owner}/{name}");
            let reference = RepoReference::parse(&raw).expect("two segments must parse");
            prop_assert_eq!(reference.owner, owner);
            prop_assert_eq!(reference.name, name);
        }

        #[test]
        fn rejects_segment_free_input(raw in "[a-zA-Z0-9 ._-]{0,32}") {
            prop_assume!(!raw.contains('/'));
            prop_assert!(RepoReference::parse(&raw).is_err());
        }
    }
}
