//! Probability distributions for task duration estimation
//!
//! Each task's duration is modelled as a draw from one of six distribution
//! families. All parameters are validated when the distribution is built, so
//! a [`Distribution`] value is always sampleable; derived parameters (PERT's
//! Beta shape, LogNormal's underlying μ/σ) are computed once at construction.
//!
//! Sampling never touches global state: every draw takes an explicit random
//! source, which is what makes seeded runs reproducible.
//!
//! | Family     | Parameters                              | Support                 |
//! |------------|-----------------------------------------|-------------------------|
//! | Triangular | min, mode, max                          | `[min, max]`            |
//! | Uniform    | min, max                                | `[min, max]`            |
//! | Normal     | mean, std_dev, min_value, max_value?    | truncated by rejection  |
//! | PERT       | min, mode, max, λ (default 4)           | `[min, max]`            |
//! | LogNormal  | mean, std_dev, min_value, max_value?    | truncated by rejection  |
//! | Beta       | α, β, min_value, max_value              | `[min_value, max_value]`|
//!
//! # Example
//!
//! ```
//! use monaco::distributions::Distribution;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! # fn main() -> monaco::error::Result<()> {
//! let dist = Distribution::pert(5.0, 8.0, 15.0)?;
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let sample = dist.sample(&mut rng);
//! assert!((5.0..=15.0).contains(&sample));
//! # Ok(())
//! # }
//! ```

use crate::error::{MonacoError, Result};
use rand::Rng;
use rand_distr::Distribution as _;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Redraw budget for truncated Normal/LogNormal sampling before clamping
pub const MAX_RESAMPLE_ATTEMPTS: usize = 1000;

/// Default PERT shape parameter
pub const DEFAULT_PERT_LAMBDA: f64 = 4.0;

/// Distribution family tag, as written in project files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Estimator {
    Triangular,
    Uniform,
    Normal,
    Pert,
    LogNormal,
    Beta,
}

impl Estimator {
    pub const ALL: [Estimator; 6] = [
        Estimator::Triangular,
        Estimator::Uniform,
        Estimator::Normal,
        Estimator::Pert,
        Estimator::LogNormal,
        Estimator::Beta,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Estimator::Triangular => "triangular",
            Estimator::Uniform => "uniform",
            Estimator::Normal => "normal",
            Estimator::Pert => "pert",
            Estimator::LogNormal => "lognormal",
            Estimator::Beta => "beta",
        }
    }
}

impl FromStr for Estimator {
    type Err = MonacoError;

    fn from_str(s: &str) -> Result<Self> {
        Estimator::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| MonacoError::UnknownEstimator {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn require_non_negative(dist: &'static str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(MonacoError::invalid(
            dist,
            format!("{} must be non-negative, got {}", field, value),
        ))
    }
}

fn require_positive(dist: &'static str, field: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MonacoError::invalid(
            dist,
            format!("{} must be positive, got {}", field, value),
        ))
    }
}

fn require_ordered(dist: &'static str, min: f64, mode: f64, max: f64) -> Result<()> {
    require_non_negative(dist, "min", min)?;
    require_non_negative(dist, "mode", mode)?;
    require_non_negative(dist, "max", max)?;
    if min <= mode && mode <= max {
        Ok(())
    } else {
        Err(MonacoError::invalid(
            dist,
            format!(
                "must have min <= mode <= max, got min={}, mode={}, max={}",
                min, mode, max
            ),
        ))
    }
}

fn require_bounds(dist: &'static str, min_value: f64, max_value: Option<f64>) -> Result<()> {
    require_non_negative(dist, "min_value", min_value)?;
    if let Some(max) = max_value {
        if !max.is_finite() || max < min_value {
            return Err(MonacoError::invalid(
                dist,
                format!(
                    "max_value must be >= min_value, got min={}, max={}",
                    min_value, max
                ),
            ));
        }
    }
    Ok(())
}

/// Map a unit-interval draw onto `[min, max]`, exact for zero-width ranges
fn scale(unit: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range == 0.0 {
        return min;
    }
    (min + unit * range).clamp(min, max)
}

/// Draw from `sampler` until the value lands in `[min, max]`, clamping the
/// final draw if the budget runs out
fn sample_truncated<R, D>(
    name: &'static str,
    sampler: &D,
    min_value: f64,
    max_value: Option<f64>,
    rng: &mut R,
) -> f64
where
    R: Rng + ?Sized,
    D: rand_distr::Distribution<f64>,
{
    let mut value = min_value;
    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        value = sampler.sample(rng);
        if value >= min_value && max_value.map_or(true, |max| value <= max) {
            return value;
        }
    }

    tracing::debug!(
        distribution = name,
        attempts = MAX_RESAMPLE_ATTEMPTS,
        "rejection sampling exhausted, clamping last draw into bounds"
    );
    let clamped = value.max(min_value);
    match max_value {
        Some(max) => clamped.min(max),
        None => clamped,
    }
}

/// Triangular distribution over `[min, max]` peaking at `mode`
#[derive(Debug, Clone)]
pub struct Triangular {
    min: f64,
    mode: f64,
    max: f64,
    sampler: Option<rand_distr::Triangular<f64>>,
}

impl Triangular {
    pub fn new(min: f64, mode: f64, max: f64) -> Result<Self> {
        require_ordered("triangular", min, mode, max)?;
        let sampler = if min == max {
            None
        } else {
            Some(
                rand_distr::Triangular::new(min, max, mode)
                    .map_err(|e| MonacoError::invalid("triangular", e.to_string()))?,
            )
        };
        Ok(Self {
            min,
            mode,
            max,
            sampler,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn mode(&self) -> f64 {
        self.mode
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.sampler {
            Some(sampler) => sampler.sample(rng).clamp(self.min, self.max),
            None => self.min,
        }
    }
}

impl PartialEq for Triangular {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min && self.mode == other.mode && self.max == other.max
    }
}

/// Uniform distribution over `[min, max]`
///
/// Draws are a scaled unit sample, so any finite non-negative range works,
/// including widths close to `f64::MAX`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    min: f64,
    max: f64,
}

impl Uniform {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        require_non_negative("uniform", "min_value", min)?;
        require_non_negative("uniform", "max_value", max)?;
        if min > max {
            return Err(MonacoError::invalid(
                "uniform",
                format!("must have min <= max, got min={}, max={}", min, max),
            ));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        scale(rng.gen::<f64>(), self.min, self.max)
    }
}

/// Normal distribution truncated to `[min_value, max_value]`
#[derive(Debug, Clone)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
    min_value: f64,
    max_value: Option<f64>,
    sampler: rand_distr::Normal<f64>,
}

impl Normal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        Self::bounded(mean, std_dev, 0.0, None)
    }

    pub fn bounded(
        mean: f64,
        std_dev: f64,
        min_value: f64,
        max_value: Option<f64>,
    ) -> Result<Self> {
        require_positive("normal", "mean", mean)?;
        require_positive("normal", "std_dev", std_dev)?;
        require_bounds("normal", min_value, max_value)?;
        let sampler = rand_distr::Normal::new(mean, std_dev)
            .map_err(|e| MonacoError::invalid("normal", e.to_string()))?;
        Ok(Self {
            mean,
            std_dev,
            min_value,
            max_value,
            sampler,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_truncated("normal", &self.sampler, self.min_value, self.max_value, rng)
    }
}

impl PartialEq for Normal {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean
            && self.std_dev == other.std_dev
            && self.min_value == other.min_value
            && self.max_value == other.max_value
    }
}

/// PERT distribution: a Beta distribution rescaled onto `[min, max]`
///
/// The shape parameters follow the classic PERT construction, so the mean is
/// `(min + λ·mode + max) / (λ + 2)`.
#[derive(Debug, Clone)]
pub struct Pert {
    min: f64,
    mode: f64,
    max: f64,
    lambda: f64,
    alpha: f64,
    beta: f64,
    sampler: Option<rand_distr::Beta<f64>>,
}

impl Pert {
    pub fn new(min: f64, mode: f64, max: f64) -> Result<Self> {
        Self::with_lambda(min, mode, max, DEFAULT_PERT_LAMBDA)
    }

    pub fn with_lambda(min: f64, mode: f64, max: f64, lambda: f64) -> Result<Self> {
        require_ordered("pert", min, mode, max)?;
        require_positive("pert", "lamb", lambda)?;

        let range = max - min;
        let (alpha, beta) = if range == 0.0 {
            (1.0, 1.0)
        } else {
            (
                1.0 + lambda * (mode - min) / range,
                1.0 + lambda * (max - mode) / range,
            )
        };
        let sampler = if range == 0.0 {
            None
        } else {
            Some(
                rand_distr::Beta::new(alpha, beta)
                    .map_err(|e| MonacoError::invalid("pert", e.to_string()))?,
            )
        };

        Ok(Self {
            min,
            mode,
            max,
            lambda,
            alpha,
            beta,
            sampler,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn mode(&self) -> f64 {
        self.mode
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Shape parameters of the underlying Beta distribution
    pub fn beta_shape(&self) -> (f64, f64) {
        (self.alpha, self.beta)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match &self.sampler {
            Some(sampler) => scale(sampler.sample(rng), self.min, self.max),
            None => self.min,
        }
    }
}

impl PartialEq for Pert {
    fn eq(&self, other: &Self) -> bool {
        self.min == other.min
            && self.mode == other.mode
            && self.max == other.max
            && self.lambda == other.lambda
    }
}

/// Log-normal distribution parameterised by its own mean and standard
/// deviation (not the underlying normal's), truncated by rejection
#[derive(Debug, Clone)]
pub struct LogNormal {
    mean: f64,
    std_dev: f64,
    min_value: f64,
    max_value: Option<f64>,
    mu: f64,
    sigma: f64,
    sampler: rand_distr::LogNormal<f64>,
}

impl LogNormal {
    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        Self::bounded(mean, std_dev, 0.0, None)
    }

    pub fn bounded(
        mean: f64,
        std_dev: f64,
        min_value: f64,
        max_value: Option<f64>,
    ) -> Result<Self> {
        require_positive("lognormal", "mean", mean)?;
        require_positive("lognormal", "std_dev", std_dev)?;
        require_bounds("lognormal", min_value, max_value)?;

        // mu = ln(m^2 / sqrt(s^2 + m^2)), sigma = sqrt(ln(1 + s^2 / m^2))
        let variance = std_dev * std_dev;
        let mean_sq = mean * mean;
        let mu = (mean_sq / (variance + mean_sq).sqrt()).ln();
        let sigma = (1.0 + variance / mean_sq).ln().sqrt();
        let sampler = rand_distr::LogNormal::new(mu, sigma)
            .map_err(|e| MonacoError::invalid("lognormal", e.to_string()))?;

        Ok(Self {
            mean,
            std_dev,
            min_value,
            max_value,
            mu,
            sigma,
            sampler,
        })
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> Option<f64> {
        self.max_value
    }

    /// Location and scale of the underlying normal distribution
    pub fn log_params(&self) -> (f64, f64) {
        (self.mu, self.sigma)
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        sample_truncated(
            "lognormal",
            &self.sampler,
            self.min_value,
            self.max_value,
            rng,
        )
    }
}

impl PartialEq for LogNormal {
    fn eq(&self, other: &Self) -> bool {
        self.mean == other.mean
            && self.std_dev == other.std_dev
            && self.min_value == other.min_value
            && self.max_value == other.max_value
    }
}

/// Beta distribution scaled onto `[min_value, max_value]`
#[derive(Debug, Clone)]
pub struct Beta {
    alpha: f64,
    beta: f64,
    min_value: f64,
    max_value: f64,
    sampler: rand_distr::Beta<f64>,
}

impl Beta {
    pub fn new(alpha: f64, beta: f64, min_value: f64, max_value: f64) -> Result<Self> {
        require_positive("beta", "alpha", alpha)?;
        require_positive("beta", "beta", beta)?;
        require_non_negative("beta", "min_value", min_value)?;
        if !max_value.is_finite() || max_value <= min_value {
            return Err(MonacoError::invalid(
                "beta",
                format!(
                    "max_value must be > min_value, got min={}, max={}",
                    min_value, max_value
                ),
            ));
        }
        let sampler = rand_distr::Beta::new(alpha, beta)
            .map_err(|e| MonacoError::invalid("beta", e.to_string()))?;
        Ok(Self {
            alpha,
            beta,
            min_value,
            max_value,
            sampler,
        })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        scale(self.sampler.sample(rng), self.min_value, self.max_value)
    }
}

impl PartialEq for Beta {
    fn eq(&self, other: &Self) -> bool {
        self.alpha == other.alpha
            && self.beta == other.beta
            && self.min_value == other.min_value
            && self.max_value == other.max_value
    }
}

/// A validated task-duration distribution
#[derive(Debug, Clone, PartialEq)]
pub enum Distribution {
    Triangular(Triangular),
    Uniform(Uniform),
    Normal(Normal),
    Pert(Pert),
    LogNormal(LogNormal),
    Beta(Beta),
}

impl Distribution {
    pub fn triangular(min: f64, mode: f64, max: f64) -> Result<Self> {
        Triangular::new(min, mode, max).map(Distribution::Triangular)
    }

    pub fn uniform(min: f64, max: f64) -> Result<Self> {
        Uniform::new(min, max).map(Distribution::Uniform)
    }

    pub fn normal(mean: f64, std_dev: f64) -> Result<Self> {
        Normal::new(mean, std_dev).map(Distribution::Normal)
    }

    pub fn pert(min: f64, mode: f64, max: f64) -> Result<Self> {
        Pert::new(min, mode, max).map(Distribution::Pert)
    }

    pub fn lognormal(mean: f64, std_dev: f64) -> Result<Self> {
        LogNormal::new(mean, std_dev).map(Distribution::LogNormal)
    }

    pub fn beta(alpha: f64, beta: f64, min_value: f64, max_value: f64) -> Result<Self> {
        Beta::new(alpha, beta, min_value, max_value).map(Distribution::Beta)
    }

    /// A distribution that always yields `value`
    pub fn constant(value: f64) -> Result<Self> {
        Self::triangular(value, value, value)
    }

    pub fn estimator(&self) -> Estimator {
        match self {
            Distribution::Triangular(_) => Estimator::Triangular,
            Distribution::Uniform(_) => Estimator::Uniform,
            Distribution::Normal(_) => Estimator::Normal,
            Distribution::Pert(_) => Estimator::Pert,
            Distribution::LogNormal(_) => Estimator::LogNormal,
            Distribution::Beta(_) => Estimator::Beta,
        }
    }

    /// Estimator tag (`"triangular"`, `"pert"`, ...)
    pub fn name(&self) -> &'static str {
        self.estimator().as_str()
    }

    /// Draw a single duration
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Distribution::Triangular(d) => d.sample(rng),
            Distribution::Uniform(d) => d.sample(rng),
            Distribution::Normal(d) => d.sample(rng),
            Distribution::Pert(d) => d.sample(rng),
            Distribution::LogNormal(d) => d.sample(rng),
            Distribution::Beta(d) => d.sample(rng),
        }
    }

    /// Re-check the parameter constraints
    ///
    /// Construction already validates, so this only fails for values built
    /// around the constructors.
    pub fn validate(&self) -> Result<()> {
        Distribution::from_record(&self.to_record()).map(|_| ())
    }

    /// Upper bound of the support, if finite
    pub fn upper_bound(&self) -> Option<f64> {
        match self {
            Distribution::Triangular(d) => Some(d.max),
            Distribution::Uniform(d) => Some(d.max),
            Distribution::Normal(d) => d.max_value,
            Distribution::Pert(d) => Some(d.max),
            Distribution::LogNormal(d) => d.max_value,
            Distribution::Beta(d) => Some(d.max_value),
        }
    }

    /// Lower bound of the support
    pub fn lower_bound(&self) -> f64 {
        match self {
            Distribution::Triangular(d) => d.min,
            Distribution::Uniform(d) => d.min,
            Distribution::Normal(d) => d.min_value,
            Distribution::Pert(d) => d.min,
            Distribution::LogNormal(d) => d.min_value,
            Distribution::Beta(d) => d.min_value,
        }
    }

    /// Human-readable parameter summary, e.g. `(2-5-10)` for triangular
    pub fn display_params(&self) -> String {
        match self {
            Distribution::Triangular(d) => format!("({}-{}-{})", d.min, d.mode, d.max),
            Distribution::Uniform(d) => format!("({}-{})", d.min, d.max),
            Distribution::Pert(d) => format!("({}-{}-{})", d.min, d.mode, d.max),
            Distribution::Normal(Normal {
                mean,
                std_dev,
                min_value,
                max_value,
                ..
            })
            | Distribution::LogNormal(LogNormal {
                mean,
                std_dev,
                min_value,
                max_value,
                ..
            }) => match max_value {
                Some(max) => format!(
                    "(mean={}, std={}, [{}-{}])",
                    mean, std_dev, min_value, max
                ),
                None => format!("(mean={}, std={})", mean, std_dev),
            },
            Distribution::Beta(d) => format!(
                "(α={}, β={}, [{}-{}])",
                d.alpha, d.beta, d.min_value, d.max_value
            ),
        }
    }

    /// Serialize to a tagged record
    pub fn to_record(&self) -> DistributionRecord {
        match self {
            Distribution::Triangular(d) => DistributionRecord::Triangular {
                min_duration: d.min,
                mode_duration: d.mode,
                max_duration: d.max,
            },
            Distribution::Uniform(d) => DistributionRecord::Uniform {
                min_duration: d.min,
                max_duration: d.max,
            },
            Distribution::Normal(d) => DistributionRecord::Normal {
                mean: d.mean,
                std_dev: d.std_dev,
                min_value: d.min_value,
                max_value: d.max_value,
            },
            Distribution::Pert(d) => DistributionRecord::Pert {
                min_duration: d.min,
                mode_duration: d.mode,
                max_duration: d.max,
                lamb: d.lambda,
            },
            Distribution::LogNormal(d) => DistributionRecord::LogNormal {
                mean: d.mean,
                std_dev: d.std_dev,
                min_value: d.min_value,
                max_value: d.max_value,
            },
            Distribution::Beta(d) => DistributionRecord::Beta {
                alpha: d.alpha,
                beta: d.beta,
                min_value: d.min_value,
                max_value: d.max_value,
            },
        }
    }

    /// Rebuild (and re-validate) a distribution from its record
    pub fn from_record(record: &DistributionRecord) -> Result<Self> {
        match *record {
            DistributionRecord::Triangular {
                min_duration,
                mode_duration,
                max_duration,
            } => Self::triangular(min_duration, mode_duration, max_duration),
            DistributionRecord::Uniform {
                min_duration,
                max_duration,
            } => Self::uniform(min_duration, max_duration),
            DistributionRecord::Normal {
                mean,
                std_dev,
                min_value,
                max_value,
            } => Normal::bounded(mean, std_dev, min_value, max_value).map(Distribution::Normal),
            DistributionRecord::Pert {
                min_duration,
                mode_duration,
                max_duration,
                lamb,
            } => Pert::with_lambda(min_duration, mode_duration, max_duration, lamb)
                .map(Distribution::Pert),
            DistributionRecord::LogNormal {
                mean,
                std_dev,
                min_value,
                max_value,
            } => LogNormal::bounded(mean, std_dev, min_value, max_value)
                .map(Distribution::LogNormal),
            DistributionRecord::Beta {
                alpha,
                beta,
                min_value,
                max_value,
            } => Self::beta(alpha, beta, min_value, max_value),
        }
    }

    /// Build a distribution from an estimator tag and loose parameters
    ///
    /// This is the convenience path used by project files and by
    /// [`Task::with_estimate`](crate::task::Task::with_estimate): each family
    /// picks the fields it needs and rejects the call if one is missing.
    pub fn from_estimator(estimator: &str, params: &EstimateParams) -> Result<Self> {
        let estimator: Estimator = estimator.parse()?;
        let name = estimator.as_str();
        let need = |value: Option<f64>, field: &'static str| {
            value.ok_or(MonacoError::MissingParameter {
                distribution: name,
                field,
            })
        };

        match estimator {
            Estimator::Triangular => Self::triangular(
                need(params.min_duration, "min_duration")?,
                need(params.mode_duration, "mode_duration")?,
                need(params.max_duration, "max_duration")?,
            ),
            Estimator::Uniform => Self::uniform(
                need(params.min_duration, "min_duration")?,
                need(params.max_duration, "max_duration")?,
            ),
            Estimator::Normal => Normal::bounded(
                need(params.mean, "mean")?,
                need(params.std_dev, "std_dev")?,
                params.min_value.unwrap_or(0.0),
                params.max_value,
            )
            .map(Distribution::Normal),
            Estimator::Pert => Pert::with_lambda(
                need(params.min_duration, "min_duration")?,
                need(params.mode_duration, "mode_duration")?,
                need(params.max_duration, "max_duration")?,
                params.lamb.unwrap_or(DEFAULT_PERT_LAMBDA),
            )
            .map(Distribution::Pert),
            Estimator::LogNormal => LogNormal::bounded(
                need(params.mean, "mean")?,
                need(params.std_dev, "std_dev")?,
                params.min_value.unwrap_or(0.0),
                params.max_value,
            )
            .map(Distribution::LogNormal),
            Estimator::Beta => Self::beta(
                need(params.alpha, "alpha")?,
                need(params.beta, "beta")?,
                params.min_value.unwrap_or(0.0),
                need(params.max_value, "max_value")?,
            ),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.display_params())
    }
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

fn default_lamb() -> f64 {
    DEFAULT_PERT_LAMBDA
}

fn is_default_lamb(value: &f64) -> bool {
    *value == DEFAULT_PERT_LAMBDA
}

/// Serialized form of a [`Distribution`]: a `type` tag plus its numeric fields
///
/// Optional fields at their defaults are omitted when written and restored
/// when read, so `from_record(to_record(d))` reproduces `d` exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DistributionRecord {
    Triangular {
        min_duration: f64,
        mode_duration: f64,
        max_duration: f64,
    },
    Uniform {
        min_duration: f64,
        max_duration: f64,
    },
    Normal {
        mean: f64,
        std_dev: f64,
        #[serde(default, skip_serializing_if = "is_zero")]
        min_value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
    },
    Pert {
        min_duration: f64,
        mode_duration: f64,
        max_duration: f64,
        #[serde(default = "default_lamb", skip_serializing_if = "is_default_lamb")]
        lamb: f64,
    },
    LogNormal {
        mean: f64,
        std_dev: f64,
        #[serde(default, skip_serializing_if = "is_zero")]
        min_value: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_value: Option<f64>,
    },
    Beta {
        alpha: f64,
        beta: f64,
        #[serde(default)]
        min_value: f64,
        max_value: f64,
    },
}

/// Loose, all-optional distribution parameters as they appear in project files
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimateParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub std_dev: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lamb: Option<f64>,
}

impl EstimateParams {
    /// Three-point estimate (`min`, `mode`, `max`)
    pub fn three_point(min: f64, mode: f64, max: f64) -> Self {
        Self {
            min_duration: Some(min),
            mode_duration: Some(mode),
            max_duration: Some(max),
            ..Self::default()
        }
    }
}
