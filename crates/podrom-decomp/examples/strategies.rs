//! Compare the three space-time basis strategies on one dataset
//!
//! Builds a parametric traveling-wave tensor, reduces it with each
//! strategy at matched sub-POD ranks, and prints basis widths and
//! round-trip errors.
//!
//! Run with: cargo run --example strategies

use anyhow::Result;
use podrom_decomp::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
use scirs2_core::ndarray_ext::Array3;

fn main() -> Result<()> {
    let (nt, ns, npar) = (60, 24, 6);
    let snapshots = Array3::from_shape_fn((nt, ns, npar), |(t, s, p)| {
        let mu = 1.0 + 0.3 * p as f64;
        let time = t as f64 / nt as f64;
        let space = s as f64 / ns as f64;
        mu * (2.0 * std::f64::consts::PI * (space - mu * time)).sin()
    });

    println!(
        "snapshot tensor: {} time instants x {} space points x {} samples\n",
        nt, ns, npar
    );

    for strategy in SpaceTimeStrategy::ALL {
        let mut rom = SpaceTimePod::new(strategy)
            .with_pod_configs(PodConfig::with_rank(4), PodConfig::with_rank(5));

        let coefficients = rom.reduce(&snapshots.view())?;
        let approximation = rom.expand(&coefficients.view())?;

        let mut num = 0.0;
        let mut den = 0.0;
        for (a, b) in snapshots.iter().zip(approximation.iter()) {
            num += (a - b) * (a - b);
            den += a * a;
        }
        let relative_error = (num / den).sqrt();

        println!(
            "{:<10} reduced size {:>3} x {}  relative error {:.3e}",
            strategy.name(),
            coefficients.nrows(),
            coefficients.ncols(),
            relative_error
        );
    }

    Ok(())
}
