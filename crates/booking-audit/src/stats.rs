//! Small numeric helpers shared by the checks.

use serde::{Deserialize, Serialize};

/// Running mean and variance using Welford's online algorithm.
#[derive(Debug, Clone, Default)]
pub struct RunningMoments {
    count: usize,
    mean: f64,
    m2: f64, // Sum of squared differences from mean
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value.
    pub fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        let delta2 = value - self.mean;
        self.m2 += delta * delta2;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample standard deviation (n - 1 denominator); needs two values.
    pub fn sample_std(&self) -> Option<f64> {
        (self.count > 1).then(|| (self.m2 / (self.count - 1) as f64).sqrt())
    }
}

impl FromIterator<f64> for RunningMoments {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut moments = Self::new();
        for value in iter {
            moments.add(value);
        }
        moments
    }
}

/// Sort values ascending; NaN must already be filtered out.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Quantile of sorted values, interpolating linearly between closest ranks.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// `part / whole * 100`, or 0 for an empty whole.
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Round to two decimals for display.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Descriptive statistics of a numeric series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Absent for fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl Describe {
    /// Describe a series; `None` when it is empty.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted(values);
        let moments: RunningMoments = sorted.iter().copied().collect();
        Some(Self {
            count: moments.count(),
            mean: moments.mean()?,
            std: moments.sample_std(),
            min: *sorted.first()?,
            q1: quantile(&sorted, 0.25)?,
            median: quantile(&sorted, 0.5)?,
            q3: quantile(&sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&values, 0.25), Some(1.75));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 0.75), Some(3.25));
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_moments() {
        let m: RunningMoments = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert!((m.mean().unwrap() - 5.0).abs() < 1e-12);
        let std = m.sample_std().unwrap();
        assert!((std - 2.138).abs() < 0.001);
        assert_eq!(RunningMoments::new().mean(), None);
        let single: RunningMoments = [3.0].into_iter().collect();
        assert_eq!(single.sample_std(), None);
    }

    #[test]
    fn test_percent_of_zero_is_zero() {
        assert_eq!(percent(0, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_describe() {
        let d = Describe::from_values(&[10.0, 0.0, 5.0]).unwrap();
        assert_eq!(d.count, 3);
        assert_eq!(d.min, 0.0);
        assert_eq!(d.median, 5.0);
        assert_eq!(d.max, 10.0);
        assert!(Describe::from_values(&[]).is_none());
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(2.5), 2.5);
    }
}
