//! Null-safe aggregation helpers for the grouped dimensions.
//!
//! Nulls are skipped. A group whose inputs were all null has no value, which
//! the builders treat as "drop the group". Non-finite floating point inputs
//! count as zero.

/// Round half away from zero to `places` decimals
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Running mean over nullable doubles
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanAccumulator {
    sum: f64,
    count: u64,
}

impl MeanAccumulator {
    pub fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += if v.is_finite() { v } else { 0.0 };
            self.count += 1;
        }
    }

    /// Mean of the non-null inputs rounded to two decimals
    #[must_use]
    pub fn mean_rounded(&self) -> Option<f64> {
        #[allow(clippy::cast_precision_loss)]
        (self.count > 0).then(|| round_to(self.sum / self.count as f64, 2))
    }
}

/// Running sum over nullable integers
#[derive(Debug, Clone, Copy, Default)]
pub struct SumAccumulator {
    sum: i64,
    seen: bool,
}

impl SumAccumulator {
    pub fn push(&mut self, value: Option<i64>) {
        if let Some(v) = value {
            self.sum = self.sum.saturating_add(v);
            self.seen = true;
        }
    }

    #[must_use]
    pub fn total(&self) -> Option<i64> {
        self.seen.then_some(self.sum)
    }
}
