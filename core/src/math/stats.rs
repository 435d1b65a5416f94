/// Aggregations over lap-time style samples.
///
/// Callers pass only valid (finite) values; every helper returns `None` on an
/// empty slice instead of a sentinel number.
pub struct StatsHelper;

impl StatsHelper {
    pub fn median(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            Some((sorted[mid - 1] + sorted[mid]) / 2.0)
        } else {
            Some(sorted[mid])
        }
    }

    pub fn mean(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }

    pub fn min(samples: &[f64]) -> Option<f64> {
        samples.iter().copied().min_by(f64::total_cmp)
    }

    pub fn max(samples: &[f64]) -> Option<f64> {
        samples.iter().copied().max_by(f64::total_cmp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_yields_none() {
        assert_eq!(StatsHelper::median(&[]), None);
        assert_eq!(StatsHelper::mean(&[]), None);
        assert_eq!(StatsHelper::min(&[]), None);
        assert_eq!(StatsHelper::max(&[]), None);
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(StatsHelper::median(&[92.0, 90.0, 91.0]), Some(91.0));
        assert_eq!(StatsHelper::median(&[90.0, 94.0, 91.0, 92.0]), Some(91.5));
    }

    #[test]
    fn extremes_and_mean() {
        let laps = [91.5, 90.25, 93.0];
        assert_eq!(StatsHelper::min(&laps), Some(90.25));
        assert_eq!(StatsHelper::max(&laps), Some(93.0));
        assert!((StatsHelper::mean(&laps).unwrap() - 91.583_333).abs() < 1e-5);
    }
}
