//! Interval bucketing.
//!
//! Intervals are left-exclusive and right-inclusive: `(b[i], b[i+1]]`.

use serde::Serialize;

use super::derived::Measure;
use crate::models::{Field, PlayerRecord};

/// Ordered boundaries with one label per interval.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketSpec {
    boundaries: Vec<f64>,
    labels: Vec<String>,
}

impl BucketSpec {
    /// Boundaries must be strictly increasing, with one more boundary than
    /// labels.
    pub fn new(boundaries: Vec<f64>, labels: Vec<String>) -> Result<Self, String> {
        if boundaries.len() < 2 {
            return Err("at least two boundaries are required".to_string());
        }
        if labels.len() + 1 != boundaries.len() {
            return Err(format!(
                "{} boundaries need {} labels, got {}",
                boundaries.len(),
                boundaries.len() - 1,
                labels.len()
            ));
        }
        if boundaries.windows(2).any(|w| w[0] >= w[1]) {
            return Err("boundaries must be strictly increasing".to_string());
        }
        Ok(Self { boundaries, labels })
    }

    /// Standard age groups.
    pub fn age() -> Self {
        Self {
            boundaries: vec![0.0, 23.0, 28.0, 35.0, 50.0],
            labels: vec![
                "Young (≤23)".to_string(),
                "Prime (24-28)".to_string(),
                "Experienced (29-35)".to_string(),
                "Veteran (36+)".to_string(),
            ],
        }
    }

    /// Index of the interval holding `value`, if any.
    pub fn assign(&self, value: f64) -> Option<usize> {
        self.boundaries
            .windows(2)
            .position(|w| w[0] < value && value <= w[1])
    }

    /// Label of the interval holding `value`, if any.
    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.assign(value).map(|i| self.labels[i].as_str())
    }
}

/// Mean of the target measure inside one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BucketAverage {
    pub label: String,
    pub average: f64,
    pub count: usize,
}

/// Average `target` per bucket of `field`, in bucket order.
///
/// Rows with a missing field or target, or outside every interval, are
/// excluded. Buckets with no rows are omitted.
pub fn bucketize(rows: &[&PlayerRecord], field: Field, target: Measure, spec: &BucketSpec) -> Vec<BucketAverage> {
    let mut sums = vec![(0.0_f64, 0_usize); spec.labels.len()];

    for row in rows {
        let (Some(key), Some(value)) = (field.value(row), target.value(row)) else {
            continue;
        };
        if let Some(i) = spec.assign(key) {
            sums[i].0 += value;
            sums[i].1 += 1;
        }
    }

    sums.into_iter()
        .zip(&spec.labels)
        .filter(|((_, count), _)| *count > 0)
        .map(|((sum, count), label)| BucketAverage {
            label: label.clone(),
            average: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::DerivedMetric;

    fn aged(age: Option<u32>, goals: u32) -> PlayerRecord {
        let mut r = PlayerRecord::new("P", "T", "FW");
        r.age = age;
        r.goals = Some(goals);
        r
    }

    #[test]
    fn test_right_inclusive_boundaries() {
        let spec = BucketSpec::age();
        assert_eq!(spec.label_for(28.0), Some("Prime (24-28)"));
        assert_eq!(spec.label_for(23.0), Some("Young (≤23)"));
        assert_eq!(spec.label_for(24.0), Some("Prime (24-28)"));
        assert_eq!(spec.label_for(36.0), Some("Veteran (36+)"));
        assert_eq!(spec.label_for(0.0), None);
        assert_eq!(spec.label_for(51.0), None);
    }

    #[test]
    fn test_bucket_averages_skip_empty_and_missing() {
        let data = vec![
            aged(Some(20), 4),
            aged(Some(22), 2),
            aged(Some(31), 9),
            aged(None, 100),
            aged(Some(60), 50),
        ];
        let rows: Vec<&PlayerRecord> = data.iter().collect();
        let buckets = bucketize(&rows, Field::Age, Field::Goals.into(), &BucketSpec::age());

        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "Young (≤23)");
        assert_eq!(buckets[0].average, 3.0);
        assert_eq!(buckets[0].count, 2);
        assert_eq!(buckets[1].label, "Experienced (29-35)");
    }

    #[test]
    fn test_derived_target() {
        let mut r = aged(Some(27), 10);
        r.minutes = Some(900);
        let rows = vec![&r];
        let buckets = bucketize(&rows, Field::Age, DerivedMetric::GoalsPer90.into(), &BucketSpec::age());
        assert_eq!(buckets[0].label, "Prime (24-28)");
        assert!((buckets[0].average - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_validation() {
        assert!(BucketSpec::new(vec![0.0], vec![]).is_err());
        assert!(BucketSpec::new(vec![0.0, 10.0], vec![]).is_err());
        assert!(BucketSpec::new(vec![10.0, 0.0], vec!["x".into()]).is_err());
        assert!(BucketSpec::new(vec![0.0, 10.0, 20.0], vec!["a".into(), "b".into()]).is_ok());
    }
}
