//! Closed-form descriptive statistics for reporting.
//!
//! The reporting endpoints describe data with simple arithmetic: averages
//! over SQL aggregates and a least-squares line over a handful of daily
//! points. Nothing here is trained or persisted.

/// Slope and intercept of a least-squares line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Predicted y value at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Fit a line through `points` with closed-form least squares.
///
/// Returns `None` when there are fewer than two points or the x values have
/// no variance (vertical line).
#[must_use]
pub fn linear_fit(points: &[(f64, f64)]) -> Option<LinearFit> {
    if points.len() < 2 {
        return None;
    }

    #[allow(clippy::cast_precision_loss)] // point counts stay far below f64 precision
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|(x, _)| x).sum();
    let sum_y: f64 = points.iter().map(|(_, y)| y).sum();
    let sum_xx: f64 = points.iter().map(|(x, _)| x * x).sum();
    let sum_xy: f64 = points.iter().map(|(x, y)| x * y).sum();

    let denominator = n.mul_add(sum_xx, -(sum_x * sum_x));
    if denominator.abs() < f64::EPSILON {
        return None;
    }

    let slope = n.mul_add(sum_xy, -(sum_x * sum_y)) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    Some(LinearFit { slope, intercept })
}

/// Arithmetic mean of `values`, or 0.0 when empty.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)] // value counts stay far below f64 precision
    let n = values.len() as f64;
    values.iter().sum::<f64>() / n
}
