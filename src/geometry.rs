//! Parallel-beam acquisition geometry shared by the forward and back projector.

use std::f64::consts::PI;

/// Angles `k·(π/A) − π/2` for `k ∈ [0, A)`, covering the half turn `[−π/2, π/2)`.
///
/// A half turn is enough: the projection at `θ + π` is the mirrored projection at `θ`.
#[derive(Debug, Clone)]
pub struct AngleGrid {
    step: f64,
    trig: Vec<(f64, f64)>,
}

impl AngleGrid {
    pub fn new(n_angles: usize) -> AngleGrid {
        let step = PI / n_angles as f64;
        let trig = (0..n_angles)
            .map(|k| {
                let angle = k as f64 * step - PI / 2.0;
                (angle.cos(), angle.sin())
            })
            .collect();
        AngleGrid { step, trig }
    }

    pub fn len(&self) -> usize {
        self.trig.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trig.is_empty()
    }

    /// Angular spacing `π/A`, also the quadrature weight of one backprojected view.
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn angle(&self, k: usize) -> f64 {
        k as f64 * self.step - PI / 2.0
    }

    /// `(cos, sin)` of angle `k`.
    pub fn cos_sin(&self, k: usize) -> (f64, f64) {
        self.trig[k]
    }
}

/// Circle inscribed in an `N×N` grid: center `(N−1)/2`, radius equal to the center.
#[derive(Debug, Clone, Copy)]
pub struct FieldOfView {
    center: f64,
    radius2: f64,
}

impl FieldOfView {
    pub fn new(size: usize) -> FieldOfView {
        let center = (size as f64 - 1.0) / 2.0;
        FieldOfView {
            center,
            radius2: center * center,
        }
    }

    pub fn center(&self) -> f64 {
        self.center
    }

    /// Whether a sample offset `(mc, nc)` from the center lies strictly inside the circle.
    #[inline]
    pub fn contains(&self, mc: f64, nc: f64) -> bool {
        mc * mc + nc * nc < self.radius2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_grid_spans_half_turn() {
        let grid = AngleGrid::new(4);
        assert_eq!(grid.len(), 4);
        assert_abs_diff_eq!(grid.angle(0), -PI / 2.0);
        assert_abs_diff_eq!(grid.angle(2), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(grid.step(), PI / 4.0);
        let (cos, sin) = grid.cos_sin(2);
        assert_abs_diff_eq!(cos, 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(sin, 0.0, epsilon = 1e-15);
        assert!(grid.angle(3) < PI / 2.0);
    }

    #[test]
    fn test_field_of_view_is_strict() {
        let fov = FieldOfView::new(5);
        assert_eq!(fov.center(), 2.0);
        assert!(fov.contains(0.0, 0.0));
        assert!(fov.contains(1.0, 1.0));
        // on the circle is outside
        assert!(!fov.contains(2.0, 0.0));
        assert!(!fov.contains(-2.0, 0.0));
    }
}
