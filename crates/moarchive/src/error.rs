//! Construction errors shared by the archive factories.
//!
//! Two severities exist: hard failures abort construction and are modeled
//! here; soft corrections are `diag::Diagnostic` values and never abort.

use std::fmt;

/// Concrete cause behind an `ArchiveError::InvalidConfiguration`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigIssue {
    /// Objective vectors and reference point disagree on the objective count.
    /// Both are authoritative, so there is nothing to silently prefer.
    ReferenceMismatch { reference_point: usize, f_vals: usize },
    /// An objective vector differs in length from the resolved count.
    RaggedRow {
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A NaN or infinite coordinate; the exact computation path cannot
    /// represent non-finite values.
    NonFinite { context: &'static str },
    /// Constraint vectors were supplied without objective vectors.
    ConstraintsWithoutObjectives,
    /// Objective vectors were supplied without constraint vectors.
    ObjectivesWithoutConstraints,
    /// Objective and constraint lists differ in outer length.
    ConstraintLengthMismatch { f_vals: usize, g_vals: usize },
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferenceMismatch {
                reference_point,
                f_vals,
            } => write!(
                f,
                "reference_point has {reference_point} entries but the objective vectors have {f_vals}"
            ),
            Self::RaggedRow {
                index,
                expected,
                found,
            } => write!(
                f,
                "objective vector {index} has {found} entries, expected {expected}"
            ),
            Self::NonFinite { context } => {
                write!(f, "{context} contains a NaN or infinite value")
            }
            Self::ConstraintsWithoutObjectives => {
                f.write_str("f_vals must be provided if g_vals is provided")
            }
            Self::ObjectivesWithoutConstraints => {
                f.write_str("g_vals must be provided if f_vals is provided")
            }
            Self::ConstraintLengthMismatch { f_vals, g_vals } => write!(
                f,
                "f_vals and g_vals must have the same length ({f_vals} vs {g_vals})"
            ),
        }
    }
}

impl std::error::Error for ConfigIssue {}

/// Error surfaced by `build_archive` and `build_cmo_archive`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiveError {
    /// Contradictory or malformed construction inputs.
    InvalidConfiguration(ConfigIssue),
    /// The resolved objective count has no concrete archive implementation.
    UnsupportedDimensionality(usize),
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration(issue) => write!(f, "invalid configuration: {issue}"),
            Self::UnsupportedDimensionality(n) => {
                write!(f, "unsupported number of objectives: {n}")
            }
        }
    }
}

impl std::error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidConfiguration(issue) => Some(issue),
            Self::UnsupportedDimensionality(_) => None,
        }
    }
}

impl From<ConfigIssue> for ArchiveError {
    fn from(issue: ConfigIssue) -> Self {
        Self::InvalidConfiguration(issue)
    }
}
