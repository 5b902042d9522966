//! Integration tests for duration distributions
//!
//! Every estimator must stay inside its support, honour degenerate ranges and
//! survive a trip through its serialized record unchanged.

use monaco::distributions::{DistributionRecord, EstimateParams, LogNormal, Normal, Pert};
use monaco::simulation::rng_from_seed;
use monaco::{Distribution, Estimator, MonacoError};
use rand::rngs::StdRng;

fn all_estimators() -> Vec<Distribution> {
    vec![
        Distribution::triangular(2.0, 5.0, 10.0).unwrap(),
        Distribution::uniform(1.0, 4.0).unwrap(),
        Distribution::normal(8.0, 2.0).unwrap(),
        Distribution::pert(3.0, 6.0, 15.0).unwrap(),
        Distribution::lognormal(3.0, 1.0).unwrap(),
        Distribution::beta(2.0, 5.0, 1.0, 5.0).unwrap(),
        // Explicit bounds and a non-default lambda take the optional record fields
        Distribution::Normal(Normal::bounded(5.0, 3.0, 2.0, Some(7.0)).unwrap()),
        Distribution::LogNormal(LogNormal::bounded(3.0, 2.0, 1.0, Some(4.0)).unwrap()),
        Distribution::Pert(Pert::with_lambda(1.0, 2.0, 6.0, 6.0).unwrap()),
    ]
}

#[test]
fn test_samples_stay_within_support() {
    let mut rng = rng_from_seed(Some(42));
    for dist in all_estimators() {
        let lower = dist.lower_bound();
        let upper = dist.upper_bound().unwrap_or(f64::INFINITY);
        for _ in 0..10_000 {
            let x = dist.sample(&mut rng);
            assert!(x.is_finite(), "{} produced {}", dist, x);
            assert!(x >= lower && x <= upper, "{} sample {} outside [{}, {}]", dist, x, lower, upper);
        }
    }
}

#[test]
fn test_bounded_samples_use_the_whole_window() {
    // Rejection sampling, not clamping, keeps draws inside [2, 7]
    let dist = Distribution::Normal(Normal::bounded(5.0, 3.0, 2.0, Some(7.0)).unwrap());
    let mut rng = rng_from_seed(Some(11));
    let samples: Vec<f64> = (0..10_000).map(|_| dist.sample(&mut rng)).collect();

    assert!(samples.iter().all(|&x| (2.0..=7.0).contains(&x)));
    let at_edges = samples.iter().filter(|&&x| x == 2.0 || x == 7.0).count();
    assert_eq!(at_edges, 0);
}

#[test]
fn test_bounded_records_keep_optional_fields() {
    let normal = Distribution::Normal(Normal::bounded(5.0, 3.0, 2.0, Some(7.0)).unwrap());
    let json = serde_json::to_value(normal.to_record()).unwrap();
    assert_eq!(json["min_value"], 2.0);
    assert_eq!(json["max_value"], 7.0);

    let pert = Distribution::Pert(Pert::with_lambda(1.0, 2.0, 6.0, 6.0).unwrap());
    let json = serde_json::to_value(pert.to_record()).unwrap();
    assert_eq!(json["lamb"], 6.0);
}

#[test]
fn test_normal_never_negative() {
    // Mean close to zero forces the truncation at 0 to do real work
    let dist = Distribution::normal(0.5, 2.0).unwrap();
    let mut rng = rng_from_seed(Some(9));
    assert!((0..5_000).all(|_| dist.sample(&mut rng) >= 0.0));
}

#[test]
fn test_degenerate_ranges_return_exact_value() {
    let mut rng = rng_from_seed(Some(1));
    let cases = [
        (Distribution::triangular(4.0, 4.0, 4.0).unwrap(), 4.0),
        (Distribution::uniform(2.5, 2.5).unwrap(), 2.5),
        (Distribution::pert(7.0, 7.0, 7.0).unwrap(), 7.0),
    ];
    for (dist, expected) in cases {
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng), expected, "{}", dist);
        }
    }
}

#[test]
fn test_sample_means_match_parameters() {
    let mut rng = rng_from_seed(Some(2024));
    let n = 20_000;
    let mean_of = |dist: &Distribution, rng: &mut StdRng| {
        (0..n).map(|_| dist.sample(rng)).sum::<f64>() / n as f64
    };

    let tri = Distribution::triangular(2.0, 5.0, 11.0).unwrap();
    assert!((mean_of(&tri, &mut rng) - 6.0).abs() < 0.1);

    let uniform = Distribution::uniform(1.0, 5.0).unwrap();
    assert!((mean_of(&uniform, &mut rng) - 3.0).abs() < 0.05);

    // (min + 4·mode + max) / 6
    let pert = Distribution::pert(2.0, 5.0, 14.0).unwrap();
    assert!((mean_of(&pert, &mut rng) - 6.0).abs() < 0.1);

    let lognormal = Distribution::lognormal(3.0, 1.0).unwrap();
    assert!((mean_of(&lognormal, &mut rng) - 3.0).abs() < 0.1);
}

#[test]
fn test_invalid_parameters_rejected() {
    assert!(matches!(
        Distribution::triangular(5.0, 2.0, 10.0),
        Err(MonacoError::InvalidParameter { .. })
    ));
    assert!(Distribution::uniform(3.0, 1.0).is_err());
    assert!(Distribution::normal(5.0, -1.0).is_err());
    assert!(Distribution::lognormal(0.0, 1.0).is_err());
    assert!(Distribution::beta(0.0, 2.0, 0.0, 1.0).is_err());
    assert!(Distribution::beta(2.0, 2.0, 3.0, 3.0).is_err());
    assert!(Distribution::pert(1.0, 0.5, 2.0).is_err());
}

#[test]
fn test_record_round_trip_reproduces_samples() {
    for dist in all_estimators() {
        let record = dist.to_record();
        let json = serde_json::to_string(&record).unwrap();
        let parsed: DistributionRecord = serde_json::from_str(&json).unwrap();
        let rebuilt = Distribution::from_record(&parsed).unwrap();
        assert_eq!(rebuilt, dist);

        let mut rng_a = rng_from_seed(Some(77));
        let mut rng_b = rng_from_seed(Some(77));
        for _ in 0..100 {
            assert_eq!(dist.sample(&mut rng_a), rebuilt.sample(&mut rng_b));
        }
    }
}

#[test]
fn test_record_tags_and_defaults() {
    let json = serde_json::to_value(Distribution::pert(1.0, 2.0, 3.0).unwrap().to_record()).unwrap();
    assert_eq!(json["type"], "pert");
    assert!(json.get("lamb").is_none());

    let json = serde_json::to_value(Distribution::lognormal(3.0, 1.0).unwrap().to_record()).unwrap();
    assert_eq!(json["type"], "lognormal");
    assert!(json.get("min_value").is_none());
    assert!(json.get("max_value").is_none());

    let record: DistributionRecord =
        serde_json::from_str(r#"{"type":"normal","mean":8.0,"std_dev":2.0}"#).unwrap();
    let dist = Distribution::from_record(&record).unwrap();
    assert_eq!(dist.lower_bound(), 0.0);
    assert_eq!(dist.upper_bound(), None);
}

#[test]
fn test_invalid_record_rejected() {
    let record: DistributionRecord = serde_json::from_str(
        r#"{"type":"triangular","min_duration":9.0,"mode_duration":2.0,"max_duration":5.0}"#,
    )
    .unwrap();
    assert!(Distribution::from_record(&record).is_err());
}

#[test]
fn test_factory_builds_every_estimator() {
    let three_point = EstimateParams::three_point(2.0, 4.0, 8.0);
    for name in ["triangular", "pert", "uniform"] {
        let dist = Distribution::from_estimator(name, &three_point).unwrap();
        assert_eq!(dist.name(), name);
    }

    let moments = EstimateParams {
        mean: Some(5.0),
        std_dev: Some(1.0),
        ..EstimateParams::default()
    };
    assert_eq!(
        Distribution::from_estimator("normal", &moments).unwrap().estimator(),
        Estimator::Normal
    );
    assert_eq!(
        Distribution::from_estimator("lognormal", &moments).unwrap().estimator(),
        Estimator::LogNormal
    );

    let beta = EstimateParams {
        alpha: Some(2.0),
        beta: Some(3.0),
        max_value: Some(10.0),
        ..EstimateParams::default()
    };
    assert_eq!(
        Distribution::from_estimator("beta", &beta).unwrap().estimator(),
        Estimator::Beta
    );
}

#[test]
fn test_factory_errors() {
    let params = EstimateParams::three_point(1.0, 2.0, 3.0);
    assert!(matches!(
        Distribution::from_estimator("gamma", &params),
        Err(MonacoError::UnknownEstimator { .. })
    ));
    assert!(matches!(
        Distribution::from_estimator("normal", &params),
        Err(MonacoError::MissingParameter { .. })
    ));
}
