//! Reconstruct one training sample from its reduced coefficients
//!
//! Fits a tailored space-time basis on a training database, then rebuilds
//! a single snapshot through the 1-D query entry point and reports the
//! pointwise deviation.
//!
//! Run with: cargo run --example single_query

use anyhow::Result;
use podrom_core::SpaceTimeDatabase;
use podrom_decomp::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
use scirs2_core::ndarray_ext::{Array1, Array2, Array3};

fn main() -> Result<()> {
    let (nt, ns, npar) = (50, 30, 8);

    let parameters = Array2::from_shape_fn((npar, 1), |(p, _)| 0.5 + 0.25 * p as f64);
    let time_instants = Array1::from_shape_fn(nt, |t| t as f64 / nt as f64);
    let snapshots = Array3::from_shape_fn((nt, ns, npar), |(t, s, p)| {
        let mu = 0.5 + 0.25 * p as f64;
        let time = t as f64 / nt as f64;
        let space = s as f64 / ns as f64;
        (-mu * time).exp() * (2.0 * std::f64::consts::PI * space).sin()
            + mu * (std::f64::consts::PI * space).cos()
    });

    let database = SpaceTimeDatabase::new(parameters, time_instants, snapshots)?;

    let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Tailored)
        .with_pod_configs(PodConfig::with_energy(0.9999), PodConfig::with_energy(0.9999));
    let coefficients = rom.reduce(&database.snapshots().view())?;

    println!(
        "fitted {} space-time modes for {} training samples",
        coefficients.nrows(),
        database.ntrain()
    );

    let sample = 5;
    let field = rom.expand_single(&coefficients.column(sample))?;

    let mut max_deviation = 0.0f64;
    for t in 0..nt {
        for s in 0..ns {
            let deviation = (field[[t, s]] - database.snapshots()[[t, s, sample]]).abs();
            max_deviation = max_deviation.max(deviation);
        }
    }

    println!(
        "sample {} rebuilt as a {} x {} field, max pointwise deviation {:.3e}",
        sample,
        field.nrows(),
        field.ncols(),
        max_deviation
    );

    Ok(())
}
