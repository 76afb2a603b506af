//! Build archives from sampled fronts and report hypervolume figures.
//!
//! Run with `cargo run --example front_report`.

use moarchive::sample::{draw_simplex_front, FrontCfg, ReplayToken};
use moarchive::{build_archive, ArchiveCfg, VERSION};

fn main() -> Result<(), moarchive::ArchiveError> {
    tracing_subscriber::fmt().with_target(false).init();

    println!("moarchive {VERSION} front report");
    let n_points = 200;
    for n_obj in [2usize, 3, 4] {
        let cfg = FrontCfg {
            n_points,
            radius: 1.0,
            jitter: 0.3,
        };
        let rows = draw_simplex_front(n_obj, &cfg, ReplayToken::new(17, n_obj as u64));
        let mut archive = build_archive(ArchiveCfg {
            f_vals: Some(rows),
            reference_point: Some(vec![1.2; n_obj]),
            ..ArchiveCfg::default()
        })?;
        let hv = archive.hypervolume().map(|v| v.to_f64()).unwrap_or(f64::NAN);
        println!(
            "n_obj={} kept {}/{} candidates, hypervolume {:.6}",
            n_obj,
            archive.len(),
            n_points,
            hv,
        );

        let probe = vec![0.01; n_obj];
        if let Some(gain) = archive.hypervolume_improvement(&probe) {
            println!("  gain of a near-ideal probe: {:.6}", gain.to_f64());
        }
        archive.add(&probe, Some("probe".into()));
        let hv = archive.hypervolume().map(|v| v.to_f64()).unwrap_or(f64::NAN);
        println!("  after adding it: {:.6}", hv);
    }
    Ok(())
}
