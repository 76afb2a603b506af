//! Multi-objective solution archives with hypervolume bookkeeping.
//!
//! An archive keeps the mutually non-dominated subset of the candidates
//! offered to it and tracks the hypervolume dominated with respect to a
//! reference point, for two, three, or four minimized objectives.
//! Construction goes through [`build_archive`] and [`build_cmo_archive`]:
//! they select the numeric precision once per process, resolve the objective
//! count from whichever inputs are present, validate, and dispatch to the
//! matching archive type.
//!
//! With the `exact` feature (on by default) hypervolume arithmetic runs on
//! arbitrary-precision rationals, so reported values are exact for any finite
//! `f64` input. Without it everything degrades to `f64` and a one-time
//! advisory diagnostic is recorded.
//!
//! ```
//! use moarchive::{build_archive, ArchiveCfg};
//!
//! let mut archive = build_archive(ArchiveCfg {
//!     f_vals: Some(vec![vec![1.0, 2.0], vec![2.0, 1.0]]),
//!     reference_point: Some(vec![4.0, 4.0]),
//!     ..ArchiveCfg::default()
//! })?;
//! assert_eq!(archive.n_obj(), 2);
//! assert_eq!(archive.hypervolume().unwrap().to_f64(), 8.0);
//!
//! archive.add(&[0.5, 3.5], None);
//! assert!(archive.hypervolume().unwrap().to_f64() > 8.0);
//! # Ok::<(), moarchive::ArchiveError>(())
//! ```

pub mod archive2;
pub mod archive3;
pub mod archive4;
pub mod cfg;
pub mod constrained;
pub mod diag;
pub mod dominance;
pub mod error;
pub mod factory;
pub mod hv;
pub mod precision;
mod resolve;
pub mod sample;

pub use cfg::{ArchiveCfg, CmoArchiveCfg};
pub use constrained::CmoArchive;
pub use diag::Diagnostic;
pub use error::{ArchiveError, ConfigIssue};
pub use factory::{
    build_archive, build_archive_with, build_cmo_archive, build_cmo_archive_with, MoArchive,
};
pub use hv::HvValue;
pub use precision::{cmo_precision, mo_precision, PrecisionCache, PrecisionKind, PrecisionPair};

/// Crate version, for embedding in reports.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    //! Everything needed to build and query archives.
    pub use crate::cfg::{ArchiveCfg, CmoArchiveCfg};
    pub use crate::constrained::CmoArchive;
    pub use crate::error::ArchiveError;
    pub use crate::factory::{build_archive, build_cmo_archive, MoArchive};
    pub use crate::hv::HvValue;
    pub use crate::precision::{PrecisionCache, PrecisionPair};
}
