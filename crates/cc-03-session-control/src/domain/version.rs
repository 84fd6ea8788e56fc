//! # File Version Compatibility
//!
//! Component versions are dotted `Major.Minor.BuildDate.Revision` labels.
//! `Major.Minor` names a release line. A candidate satisfies a requirement
//! when it is on the same release line and its build date is at least the
//! required one. Revisions are ignored.

use super::errors::SessionError;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// A parsed component file version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileVersion {
    pub major: u32,
    pub minor: u32,
    pub build_date: u32,
    pub revision: u32,
}

impl FileVersion {
    /// True when `self` (the candidate) satisfies `required`.
    pub fn satisfies(&self, required: &FileVersion) -> bool {
        self.release_line() == required.release_line() && self.build_date >= required.build_date
    }

    /// `(major, minor)`
    pub fn release_line(&self) -> (u32, u32) {
        (self.major, self.minor)
    }
}

impl FromStr for FileVersion {
    type Err = SessionError;

    /// Three or four numeric parts; a missing revision is zero.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SessionError::InvalidVersion(s.to_string());
        let parts = s
            .trim()
            .split('.')
            .map(|p| p.trim().parse::<u32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;
        match parts.as_slice() {
            [major, minor, build_date] => Ok(Self {
                major: *major,
                minor: *minor,
                build_date: *build_date,
                revision: 0,
            }),
            [major, minor, build_date, revision] => Ok(Self {
                major: *major,
                minor: *minor,
                build_date: *build_date,
                revision: *revision,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for FileVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build_date, self.revision
        )
    }
}

/// Check a candidate version label against a required one.
///
/// Malformed labels are logged and fail the check.
pub fn check_required_file_version(required: &str, candidate: &str) -> bool {
    let parsed = required
        .parse::<FileVersion>()
        .and_then(|r| candidate.parse::<FileVersion>().map(|c| (r, c)));
    match parsed {
        Ok((required, candidate)) => candidate.satisfies(&required),
        Err(e) => {
            warn!(error = %e, required, candidate, "Version check failed to parse");
            false
        }
    }
}
