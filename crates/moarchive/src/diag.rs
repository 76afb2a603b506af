//! Non-fatal construction diagnostics.
//!
//! The `*_with` factory entry points return these alongside the archive so
//! callers can route them; the plain entry points log them at `warn` level
//! and discard them.

use std::fmt;

/// A correction or advisory recorded while building an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// A declared objective count disagreed with the first objective vector
    /// and was overridden by the observed length.
    NObjFromVectors { declared: usize, observed: usize },
    /// A declared objective count disagreed with the reference point and was
    /// overridden by its length.
    NObjFromReference { declared: usize, observed: usize },
    /// Arbitrary-precision arithmetic is compiled out; hypervolume values
    /// fall back to `f64`. Emitted at most once per precision cache.
    ExactUnavailable,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NObjFromVectors { declared, observed } => write!(
                f,
                "n_obj ({declared}) does not match the length of the objective vectors \
                 ({observed}); using {observed}"
            ),
            Self::NObjFromReference { declared, observed } => write!(
                f,
                "n_obj ({declared}) does not match the length of the reference point \
                 ({observed}); using {observed}"
            ),
            Self::ExactUnavailable => f.write_str(
                "exact rational arithmetic is unavailable, hypervolume values use f64",
            ),
        }
    }
}
