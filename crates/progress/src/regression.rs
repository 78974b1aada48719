//! Ordinary least-squares line fit over an evenly indexed series.

/// A fitted line `y = intercept + slope * index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    /// Change in `y` per index step
    pub slope: f64,
    /// Value at index 0
    pub intercept: f64,
}

impl LinearFit {
    /// Fit `values[i]` against `i`. Returns `None` for fewer than two points.
    pub fn fit(values: &[f64]) -> Option<Self> {
        if values.len() < 2 {
            return None;
        }

        let n = values.len() as f64;
        let sum_x: f64 = (0..values.len()).map(|i| i as f64).sum();
        let sum_y: f64 = values.iter().sum();
        let sum_xy: f64 = values.iter().enumerate().map(|(i, &y)| i as f64 * y).sum();
        let sum_xx: f64 = (0..values.len()).map(|i| (i * i) as f64).sum();

        // Non-zero for any n >= 2 since the indices are distinct
        let denominator = n * sum_xx - sum_x * sum_x;
        let slope = (n * sum_xy - sum_x * sum_y) / denominator;
        let intercept = (sum_y - slope * sum_x) / n;

        Some(Self { slope, intercept })
    }

    /// Fitted value at `index`.
    pub fn predict_at(&self, index: usize) -> f64 {
        self.intercept + self.slope * index as f64
    }

    /// Mean of squared residuals over `values`.
    pub fn mean_squared_error(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let total: f64 = values
            .iter()
            .enumerate()
            .map(|(i, &y)| (self.predict_at(i) - y).powi(2))
            .sum();
        total / values.len() as f64
    }

    /// Coefficient of determination as a percentage, clamped to 0-100.
    ///
    /// A flat series has no variance to explain: it scores 100 when the line
    /// reproduces it exactly and 0 otherwise.
    pub fn confidence_percent(&self, values: &[f64]) -> f64 {
        let mse = self.mean_squared_error(values);
        let variance = population_variance(values);

        // Rounding noise on squared deviations scales with the magnitude of the data
        let scale = values.iter().fold(0.0_f64, |acc, y| acc.max(y.abs()));
        let tolerance = (scale * 4.0 * f64::EPSILON).powi(2);

        if variance <= tolerance {
            return if mse <= tolerance { 100.0 } else { 0.0 };
        }

        ((1.0 - mse / variance) * 100.0).clamp(0.0, 100.0)
    }
}

/// Population variance (divides by `n`).
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|&y| (y - mean).powi(2)).sum::<f64>() / n
}
