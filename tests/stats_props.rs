use gray_bench::stats::{scaling_efficiency, ConfigurationResult, IterationSamples};
use gray_bench::TestConfiguration;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn min_average_max_are_ordered(
        samples in prop::collection::vec(1e-9f64..10.0, 1..200),
        w in 1usize..2000,
        h in 1usize..2000,
    ) {
        let cfg = TestConfiguration::new(w, h, samples.len()).unwrap();
        let n = samples.len() as f64;
        let res = ConfigurationResult::from_samples(cfg, &IterationSamples::from(samples)).unwrap();

        prop_assert!(res.min_s <= res.average_s);
        prop_assert!(res.average_s <= res.max_s);
        prop_assert!((res.total_s - res.average_s * n).abs() <= 1e-9 * res.total_s.max(1.0));
        prop_assert!(res.pixels_per_second > 0.0);
        prop_assert!((res.megapixels_per_second * 1e6 - res.pixels_per_second).abs()
            <= 1e-9 * res.pixels_per_second);
    }

    #[test]
    fn efficiency_matches_closed_form(
        avg1 in 1e-7f64..1.0,
        avg2 in 1e-7f64..1.0,
        pixel_ratio in 1.0f64..1e4,
    ) {
        let actual = avg2 / avg1;
        let eff = scaling_efficiency(pixel_ratio, actual).unwrap();
        prop_assert!((eff - 100.0 * pixel_ratio / actual).abs() <= 1e-9 * eff);
    }
}
