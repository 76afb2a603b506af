//! Walk a constrained archive through its indicator stages: no offers,
//! infeasible offers only, then a growing feasible front.
//!
//! Run with `cargo run --example constrained_front`.

use moarchive::sample::{draw_uniform_box, ReplayToken};
use moarchive::{build_cmo_archive, CmoArchiveCfg};

fn main() -> Result<(), moarchive::ArchiveError> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut archive = build_cmo_archive(CmoArchiveCfg {
        reference_point: Some(vec![1.0, 1.0]),
        tau: 0.5,
        ..CmoArchiveCfg::default()
    })?;
    let report = |archive: &moarchive::CmoArchive, label: &str| {
        let indicator = archive
            .indicator()
            .map(|v| v.to_f64())
            .unwrap_or(f64::NAN);
        println!(
            "{label}: {} feasible points, indicator {indicator:.6}",
            archive.len()
        );
    };
    report(&archive, "fresh");

    // Constraint: candidates must satisfy x + y <= 0.9.
    let feasibility = |f: &[f64]| vec![f[0] + f[1] - 0.9];

    for f in draw_uniform_box(2, 40, 1.0, ReplayToken::new(23, 0)) {
        let g: Vec<f64> = feasibility(&f).iter().map(|v| v.max(0.6)).collect();
        archive.add(&f, &g, None);
    }
    report(&archive, "after infeasible offers");

    for (i, f) in draw_uniform_box(2, 40, 0.45, ReplayToken::new(23, 1))
        .into_iter()
        .enumerate()
    {
        archive.add(&f, &feasibility(&f), Some(format!("cand-{i}")));
    }
    report(&archive, "after feasible offers");

    for (point, info) in archive.points().iter().zip(archive.infos()) {
        println!(
            "  [{:.3}, {:.3}] {}",
            point[0],
            point[1],
            info.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}
