pub mod arc_2d;
pub mod polygon_2d;
pub mod quadrature;

/// 2D point type in the `(r, z)` cross-section plane.
pub type Point2 = nalgebra::Point2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `n` evenly spaced samples over `[start, end]`, both ends included.
///
/// `n = 1` yields `[start]`; `n = 0` yields nothing.
#[must_use]
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let step = (end - start) / (n - 1) as f64;
            #[allow(clippy::cast_precision_loss)]
            let mut samples: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // Pin the last sample so the closing angle matches exactly.
            samples[n - 1] = end;
            samples
        }
    }
}
