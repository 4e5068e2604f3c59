/// Integrates `f` over `[a, b]` with composite Simpson's rule on `intervals` panels.
///
/// Each panel is evaluated at its ends and midpoint, so the cost is
/// `2 * intervals + 1` calls. Zero panels integrate to zero.
#[must_use]
pub fn simpson<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, intervals: usize) -> f64 {
    if intervals == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let h = (b - a) / intervals as f64;
    let mut sum = 0.0;
    let mut left = f(a);
    for i in 0..intervals {
        #[allow(clippy::cast_precision_loss)]
        let x = a + h * i as f64;
        let right = if i + 1 == intervals { f(b) } else { f(x + h) };
        sum += left + 4.0 * f(x + h / 2.0) + right;
        left = right;
    }
    sum * h / 6.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn exact_for_cubics() {
        let integral = simpson(|x| x * x * x - 2.0 * x, 0.0, 2.0, 1);
        assert_relative_eq!(integral, 0.0, epsilon = 1e-12);
        let integral = simpson(|x| x * x, -1.0, 2.0, 3);
        assert_relative_eq!(integral, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn sine_over_half_turn() {
        assert_relative_eq!(simpson(f64::sin, 0.0, PI, 16), 2.0, epsilon = 1e-6);
    }

    #[test]
    fn reversed_bounds_flip_sign() {
        let forward = simpson(f64::exp, 0.0, 1.0, 8);
        let backward = simpson(f64::exp, 1.0, 0.0, 8);
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
        assert_eq!(simpson(f64::exp, 0.0, 1.0, 0), 0.0);
    }
}
