//! Property-based tests for the reduction engines
//!
//! Verifies invariants that must hold for every snapshot tensor:
//! round-trip accuracy at full rank, shape laws of the reduce/expand
//! contract, and monotonicity of the truncation error.

#[cfg(test)]
mod tests {
    use crate::{PodConfig, SpaceTimePod, SpaceTimeStrategy};
    use proptest::prelude::*;
    use scirs2_core::ndarray_ext::Array3;

    // Tensor operations with SVDs inside are expensive; keep case counts low.
    fn proptest_config() -> ProptestConfig {
        ProptestConfig {
            cases: 8,
            ..ProptestConfig::default()
        }
    }

    // Deterministic smooth field; `seed` shifts phases so different cases
    // see different data.
    fn field_tensor(nt: usize, ns: usize, npar: usize, seed: u32) -> Array3<f64> {
        let phase = seed as f64 * 0.61;
        Array3::from_shape_fn((nt, ns, npar), |(t, s, p)| {
            let mu = 0.8 + 0.4 * p as f64;
            let time = t as f64 / nt as f64;
            let space = s as f64 / ns as f64;
            (2.0 * std::f64::consts::PI * mu * time + phase).sin()
                * (1.5 + (4.0 * space + phase).cos())
                + 0.2 * (mu * (space + time)).cos()
        })
    }

    fn relative_error(x: &Array3<f64>, y: &Array3<f64>) -> f64 {
        let mut num = 0.0;
        let mut den = 0.0;
        for (a, b) in x.iter().zip(y.iter()) {
            num += (a - b) * (a - b);
            den += a * a;
        }
        (num / den).sqrt()
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn full_rank_round_trip_is_exact_for_every_strategy(
            nt in 4usize..10,
            ns in 3usize..8,
            npar in 2usize..6,
            seed in 0u32..1000,
        ) {
            let x = field_tensor(nt, ns, npar, seed);

            for strategy in SpaceTimeStrategy::ALL {
                let mut rom = SpaceTimePod::new(strategy);
                let coeffs = rom.reduce(&x.view()).expect("reduce should succeed");
                let back = rom.expand(&coeffs.view()).expect("expand should succeed");

                prop_assert_eq!(back.dim(), (nt, ns, npar));
                let error = relative_error(&x, &back);
                prop_assert!(
                    error < 1e-10,
                    "strategy {} round-trip error {:.3e}",
                    strategy,
                    error
                );
            }
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn reduce_output_has_n_modes_rows_and_ntrain_columns(
            nt in 5usize..12,
            ns in 3usize..8,
            npar in 2usize..6,
            spatial_rank in 1usize..3,
            temporal_rank in 1usize..4,
            seed in 0u32..1000,
        ) {
            let x = field_tensor(nt, ns, npar, seed);
            let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Kronecker)
                .with_pod_configs(
                    PodConfig::with_rank(spatial_rank),
                    PodConfig::with_rank(temporal_rank),
                );

            let coeffs = rom.reduce(&x.view()).expect("reduce should succeed");
            let n_modes = rom.n_modes().expect("fitted after reduce");

            prop_assert_eq!(coeffs.dim(), (n_modes, npar));

            let back = rom.expand(&coeffs.view()).expect("expand should succeed");
            prop_assert_eq!(back.dim(), (nt, ns, npar));
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn truncation_error_never_increases_with_rank(
            nt in 6usize..12,
            ns in 4usize..8,
            seed in 0u32..1000,
        ) {
            let npar = 4;
            let x = field_tensor(nt, ns, npar, seed);

            let mut previous_error = f64::INFINITY;
            for rank in 1..=3usize {
                let mut rom = SpaceTimePod::new(SpaceTimeStrategy::Kronecker)
                    .with_pod_configs(PodConfig::with_rank(rank), PodConfig::with_rank(rank));
                let coeffs = rom.reduce(&x.view()).expect("reduce should succeed");
                let back = rom.expand(&coeffs.view()).expect("expand should succeed");

                let error = relative_error(&x, &back);
                prop_assert!(
                    error <= previous_error + 1e-9,
                    "error {:.3e} at rank {} above {:.3e} at rank {}",
                    error,
                    rank,
                    previous_error,
                    rank - 1
                );
                previous_error = error;
            }
        }
    }

    proptest! {
        #![proptest_config(proptest_config())]
        #[test]
        fn fresh_instances_are_deterministic(
            nt in 4usize..9,
            ns in 3usize..7,
            npar in 2usize..5,
            seed in 0u32..1000,
        ) {
            let x = field_tensor(nt, ns, npar, seed);

            let mut first = SpaceTimePod::new(SpaceTimeStrategy::Tailored);
            let c1 = first.reduce(&x.view()).expect("reduce should succeed");

            let mut second = SpaceTimePod::new(SpaceTimeStrategy::Tailored);
            let c2 = second.reduce(&x.view()).expect("reduce should succeed");

            prop_assert_eq!(c1.dim(), c2.dim());
            for (a, b) in c1.iter().zip(c2.iter()) {
                prop_assert!((a - b).abs() < 1e-12, "{} vs {}", a, b);
            }
        }
    }
}
