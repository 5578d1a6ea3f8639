//! Per-column summary statistics.

use serde::{Deserialize, Serialize};

use crate::number::{Column, Number, Sample};

/// Summary of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub min: Number,
    pub max: Number,
    pub mean: f64,
    /// Population standard deviation
    pub stddev: f64,
    /// Number of values in the column
    pub count: usize,
    /// Whether min and max were left out of mean and stddev
    pub trimmed: bool,
}

impl ColumnStats {
    /// Summarize a column. Returns `None` for an empty column.
    ///
    /// With `trim_outliers`, the minimum and maximum are excluded from the
    /// mean and standard deviation. Trimming needs at least three values and
    /// is silently skipped otherwise.
    ///
    /// # Example
    ///
    /// ```rust
    /// use linestatslib::number::Column;
    /// use linestatslib::stats::ColumnStats;
    ///
    /// let column = Column::Integer(vec![2, 4, 4, 4, 5, 5, 7, 9]);
    /// let stats = ColumnStats::compute(&column, false).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.stddev, 2.0);
    /// ```
    pub fn compute(column: &Column, trim_outliers: bool) -> Option<Self> {
        match column {
            Column::Integer(values) => summarize(values, trim_outliers),
            Column::Float(values) => summarize(values, trim_outliers),
        }
    }

    /// True when every value was the same.
    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

fn summarize<T: Sample>(values: &[T], trim_outliers: bool) -> Option<ColumnStats> {
    let (&first, rest) = values.split_first()?;

    let mut min = first;
    let mut max = first;
    let mut sum = first.to_f64();
    for &value in rest {
        if value > max {
            max = value;
        }
        if value < min {
            min = value;
        }
        sum += value.to_f64();
    }

    let count = values.len();
    let trimmed = trim_outliers && count >= 3;
    let (min_f, max_f) = (min.to_f64(), max.to_f64());

    let (mean, divisor) = if trimmed {
        let n = (count - 2) as f64;
        ((sum - max_f - min_f) / n, n)
    } else {
        let n = count as f64;
        (sum / n, n)
    };

    let mut variance: f64 = values.iter().map(|v| (v.to_f64() - mean).powi(2)).sum();
    if trimmed {
        variance -= (min_f - mean).powi(2) + (max_f - mean).powi(2);
    }
    // Subtracting the extremes can leave a tiny negative residue.
    let stddev = (variance.max(0.0) / divisor).sqrt();

    Some(ColumnStats {
        min: min.to_number(),
        max: max.to_number(),
        mean,
        stddev,
        count,
        trimmed,
    })
}
