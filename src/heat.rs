// src/heat.rs

use serde::Serialize;

use crate::geopoint::{Coordinate, WeightedPoint};

/// Intensity of the point placed on the resolved coordinate itself.
pub const CENTER_INTENSITY: f64 = 0.85;

// (delta latitude, delta longitude, intensity) around the center, in drawing order.
const AMOEBA_LOBES: [(f64, f64, f64); 5] = [
    (0.0009, 0.0028, 0.7),
    (-0.0006, 0.0038, 0.6),
    (0.0014, 0.0048, 0.5),
    (0.0028, 0.0012, 0.55),
    (-0.0009, -0.0018, 0.4),
];

/// Number of points produced by [`generate`].
pub const POINT_COUNT: usize = AMOEBA_LOBES.len() + 1;

/// Builds the decorative "amoeba" heat constellation around `center`.
///
/// The shape is cosmetic and carries no risk information. The output always has
/// [`POINT_COUNT`] points and the first one sits exactly on `center`.
pub fn generate(center: Coordinate) -> Vec<WeightedPoint> {
    let mut points = Vec::with_capacity(POINT_COUNT);
    points.push(WeightedPoint::new(center, CENTER_INTENSITY));
    points.extend(
        AMOEBA_LOBES
            .iter()
            .map(|&(d_lat, d_lon, intensity)| {
                WeightedPoint::new(center.offset(d_lat, d_lon), intensity)
            }),
    );
    points
}

/// A color stop of the heat gradient.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: &'static str,
}

/// Visual parameters of the heat overlay.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct HeatLayerStyle {
    pub radius: u32,
    pub blur: u32,
    pub max: f64,
    pub gradient: Vec<GradientStop>,
}

impl Default for HeatLayerStyle {
    fn default() -> Self {
        HeatLayerStyle {
            radius: 140,
            blur: 100,
            max: 1.0,
            gradient: vec![
                GradientStop { position: 0.0, color: "#22c55e" },
                GradientStop { position: 0.35, color: "#facc15" },
                GradientStop { position: 0.6, color: "#fb923c" },
                GradientStop { position: 0.85, color: "#ef4444" },
            ],
        }
    }
}

impl HeatLayerStyle {
    /// Color of the highest gradient stop at or below `intensity`.
    ///
    /// Intensities below the first stop get the first stop's color; `None` only
    /// for an empty gradient.
    pub fn color_for(&self, intensity: f64) -> Option<&'static str> {
        let normalized = if self.max > 0.0 { intensity / self.max } else { intensity };
        self.gradient
            .iter()
            .rev()
            .find(|stop| stop.position <= normalized)
            .or_else(|| self.gradient.first())
            .map(|stop| stop.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nagpur() -> Coordinate {
        Coordinate::new(21.1458, 79.0882).unwrap()
    }

    #[test]
    fn generates_six_points_starting_at_center() {
        let points = generate(nagpur());
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].coordinate, nagpur());
        assert_eq!(points[0].intensity, 0.85);
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(generate(nagpur()), generate(nagpur()));
    }

    #[test]
    fn lobes_keep_their_order_and_weights() {
        let center = nagpur();
        let points = generate(center);
        let intensities: Vec<f64> = points.iter().map(|p| p.intensity).collect();
        assert_eq!(intensities, vec![0.85, 0.7, 0.6, 0.5, 0.55, 0.4]);

        assert_eq!(points[1].coordinate.latitude, center.latitude + 0.0009);
        assert_eq!(points[1].coordinate.longitude, center.longitude + 0.0028);
        assert_eq!(points[5].coordinate.latitude, center.latitude - 0.0009);
        assert_eq!(points[5].coordinate.longitude, center.longitude - 0.0018);
    }

    #[test]
    fn gradient_lookup_picks_lower_stop() {
        let style = HeatLayerStyle::default();
        assert_eq!(style.color_for(0.85), Some("#ef4444"));
        assert_eq!(style.color_for(0.7), Some("#fb923c"));
        assert_eq!(style.color_for(0.4), Some("#facc15"));
        assert_eq!(style.color_for(0.1), Some("#22c55e"));
        assert_eq!(style.color_for(-1.0), Some("#22c55e"));
    }
}
