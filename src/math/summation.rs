//! Compensated floating-point summation.
//!
//! The objective adds one squared error per observation, so for large
//! instances the plain running sum loses low-order bits whenever a small term
//! meets a large partial total. Neumaier's variant of Kahan summation tracks
//! the lost bits in a separate compensation term:
//!
//! ```text
//! t = s + x
//! c += if |s| >= |x| { (s - t) + x } else { (x - t) + s }
//! s = t
//! ```
//!
//! Numerical notes:
//! - The result is deterministic for a given input order.
//! - Once the running total stops being finite the compensation is meaningless
//!   (`∞ − ∞ = NaN`), so the raw total is returned and `+∞` stays `+∞`.

/// Running Neumaier sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    pub fn total(&self) -> f64 {
        if self.sum.is_finite() {
            self.sum + self.compensation
        } else {
            self.sum
        }
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

/// Sum an iterator of `f64` with Neumaier compensation.
pub fn compensated_sum<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let mut acc = CompensatedSum::new();
    acc.extend(values);
    acc.total()
}
