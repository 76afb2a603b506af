//! Numeric precision selection for hypervolume arithmetic.
//!
//! Archives carry two precision kinds: the kind reported to callers and the
//! kind used internally while computing. Selection happens once per cache and
//! is immutable afterwards, so every archive built through the same entry
//! point agrees on representation and values stay comparable.
//!
//! The unconstrained and constrained entry points each own a process-wide
//! cache (`mo_precision`, `cmo_precision`). Tests and embedders that need
//! isolation construct their own [`PrecisionCache`] and use the `*_with`
//! factory functions.

use std::sync::OnceLock;

use crate::diag::Diagnostic;

/// Numeric representation for hypervolume values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrecisionKind {
    /// Arbitrary-precision rationals (`num_rational::BigRational`).
    Exact,
    /// Plain `f64`.
    Float,
}

impl PrecisionKind {
    /// Best kind this build can offer.
    #[inline]
    fn detect() -> Self {
        #[cfg(feature = "exact")]
        {
            Self::Exact
        }
        #[cfg(not(feature = "exact"))]
        {
            Self::Float
        }
    }
}

/// The pair of kinds handed to every archive constructor: `final_kind` for
/// reported values, `compute_kind` for internal arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrecisionPair {
    pub final_kind: PrecisionKind,
    pub compute_kind: PrecisionKind,
}

impl PrecisionPair {
    /// Exact arithmetic for both roles.
    pub const fn exact() -> Self {
        Self {
            final_kind: PrecisionKind::Exact,
            compute_kind: PrecisionKind::Exact,
        }
    }

    /// `f64` arithmetic for both roles.
    pub const fn float() -> Self {
        Self {
            final_kind: PrecisionKind::Float,
            compute_kind: PrecisionKind::Float,
        }
    }

    #[inline]
    pub fn any_float(&self) -> bool {
        self.final_kind == PrecisionKind::Float || self.compute_kind == PrecisionKind::Float
    }
}

/// Write-once holder for a [`PrecisionPair`].
///
/// `resolve` fills the slot on first use; the degraded-precision advisory is
/// emitted only by that first call, matching the one-time warning semantics.
#[derive(Debug)]
pub struct PrecisionCache {
    slot: OnceLock<PrecisionPair>,
}

impl PrecisionCache {
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
        }
    }

    /// Return the cached pair, detecting and storing it on first call.
    ///
    /// When detection runs and lands on a `Float` role, an
    /// [`Diagnostic::ExactUnavailable`] advisory is pushed. Later calls and
    /// pairs installed via [`set`](Self::set) stay silent.
    pub fn resolve(&self, diags: &mut Vec<Diagnostic>) -> PrecisionPair {
        let mut detected = false;
        let pair = *self.slot.get_or_init(|| {
            detected = true;
            let kind = PrecisionKind::detect();
            PrecisionPair {
                final_kind: kind,
                compute_kind: kind,
            }
        });
        if detected && pair.any_float() {
            diags.push(Diagnostic::ExactUnavailable);
        }
        pair
    }

    /// Install a pair before the first `resolve`.
    ///
    /// Fails with the already-cached pair once the slot is filled; selection
    /// is immutable after initialization.
    pub fn set(&self, pair: PrecisionPair) -> Result<(), PrecisionPair> {
        self.slot.set(pair).map_err(|_| {
            // `set` only errors when the slot is occupied.
            self.slot.get().copied().unwrap_or(pair)
        })
    }

    /// Currently cached pair, if any.
    pub fn get(&self) -> Option<PrecisionPair> {
        self.slot.get().copied()
    }
}

impl Default for PrecisionCache {
    fn default() -> Self {
        Self::new()
    }
}

static MO_PRECISION: PrecisionCache = PrecisionCache::new();
static CMO_PRECISION: PrecisionCache = PrecisionCache::new();

/// Process-wide cache used by [`build_archive`](crate::build_archive).
pub fn mo_precision() -> &'static PrecisionCache {
    &MO_PRECISION
}

/// Process-wide cache used by [`build_cmo_archive`](crate::build_cmo_archive).
/// Deliberately separate from [`mo_precision`]: the two entry points select
/// independently.
pub fn cmo_precision() -> &'static PrecisionCache {
    &CMO_PRECISION
}
