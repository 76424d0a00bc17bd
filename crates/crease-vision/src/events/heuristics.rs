//! Geometric tests over recent ball positions.
//!
//! All functions take positions oldest first and are total: short inputs,
//! zero-length vectors and out-of-domain cosines produce a negative answer
//! rather than an error.

use crease_models::{BoundingBox, FrameSize, Position};

/// True when the latest position is within `margin` of a frame edge and the
/// displacement over the last three samples points at the nearest edge.
pub fn is_boundary(positions: &[Position], frame: FrameSize, margin: f64) -> bool {
    let Some(latest) = positions.last() else {
        return false;
    };

    let [left, right, top, bottom] = frame.edge_distances(latest);
    let near_edge = left < margin || right < margin || top < margin || bottom < margin;
    if !near_edge || positions.len() < 3 {
        return false;
    }

    let (dx, dy) = positions[positions.len() - 3].delta_to(latest);
    let nearest = left.min(right).min(top).min(bottom);

    // Corners tie; heading toward either edge is enough.
    (nearest == left && dx < 0.0)
        || (nearest == right && dx > 0.0)
        || (nearest == top && dy < 0.0)
        || (nearest == bottom && dy > 0.0)
}

/// True when the last five y-coordinates barely vary (a four along the
/// ground rather than a six in the air). Defaults to true on short input.
pub fn is_along_ground(positions: &[Position], variance_threshold: f64) -> bool {
    if positions.len() < 5 {
        return true;
    }
    let ys: Vec<f64> = positions[positions.len() - 5..].iter().map(|p| p.y).collect();
    variance(&ys) < variance_threshold
}

/// True when the ball is heading toward the stumps and is within
/// `max_distance` of their center.
pub fn is_wicket(positions: &[Position], stumps: &BoundingBox, max_distance: f64) -> bool {
    if positions.len() < 3 {
        return false;
    }

    let latest = positions[positions.len() - 1];
    let (dx, dy) = positions[positions.len() - 3].delta_to(&latest);
    let center = stumps.center();
    let (sx, sy) = latest.delta_to(&center);

    let heading_in = dx * sx + dy * sy > 0.0;
    heading_in && latest.distance(&center) < max_distance
}

/// Angle in degrees between the first and last step of the most recent five
/// positions, or `None` when either step has zero length or fewer than five
/// positions exist.
pub fn direction_change_degrees(positions: &[Position]) -> Option<f64> {
    if positions.len() < 5 {
        return None;
    }

    let window = &positions[positions.len() - 5..];
    let v1 = window[0].delta_to(&window[1]);
    let v2 = window[3].delta_to(&window[4]);

    let mag1 = (v1.0 * v1.0 + v1.1 * v1.1).sqrt();
    let mag2 = (v2.0 * v2.0 + v2.1 * v2.1).sqrt();
    if mag1 <= 0.0 || mag2 <= 0.0 {
        return None;
    }

    let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / (mag1 * mag2)).clamp(-1.0, 1.0);
    Some(cos.acos().to_degrees())
}

/// True when the ball changed direction by more than `threshold_degrees`.
pub fn is_shot_played(positions: &[Position], threshold_degrees: f64) -> bool {
    direction_change_degrees(positions).is_some_and(|angle| angle > threshold_degrees)
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> Vec<Position> {
        points.iter().map(|&p| Position::from(p)).collect()
    }

    const FRAME: FrameSize = FrameSize {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_boundary_requires_heading_to_nearest_edge() {
        let outgoing = path(&[(200.0, 240.0), (120.0, 240.0), (40.0, 240.0)]);
        assert!(is_boundary(&outgoing, FRAME, 50.0));

        let incoming = path(&[(0.0, 240.0), (20.0, 240.0), (40.0, 240.0)]);
        assert!(!is_boundary(&incoming, FRAME, 50.0));

        let interior = path(&[(300.0, 240.0), (320.0, 240.0), (340.0, 240.0)]);
        assert!(!is_boundary(&interior, FRAME, 50.0));
    }

    #[test]
    fn test_boundary_bottom_edge() {
        let falling = path(&[(320.0, 300.0), (320.0, 380.0), (320.0, 460.0)]);
        assert!(is_boundary(&falling, FRAME, 50.0));
    }

    #[test]
    fn test_boundary_needs_three_samples() {
        let short = path(&[(100.0, 240.0), (10.0, 240.0)]);
        assert!(!is_boundary(&short, FRAME, 50.0));
    }

    #[test]
    fn test_along_ground() {
        let flat = path(&[(0.0, 100.0), (10.0, 102.0), (20.0, 99.0), (30.0, 101.0), (40.0, 100.0)]);
        assert!(is_along_ground(&flat, 100.0));

        let lofted = path(&[(0.0, 300.0), (10.0, 250.0), (20.0, 200.0), (30.0, 150.0), (40.0, 100.0)]);
        assert!(!is_along_ground(&lofted, 100.0));

        assert!(is_along_ground(&lofted[..3], 100.0));
    }

    #[test]
    fn test_wicket_heading_and_distance() {
        let stumps = BoundingBox::from_corners(300.0, 380.0, 320.0, 460.0); // center (310, 420)
        let approaching = path(&[(310.0, 300.0), (310.0, 340.0), (310.0, 390.0)]);
        assert!(is_wicket(&approaching, &stumps, 50.0));

        let leaving = path(&[(310.0, 440.0), (310.0, 420.0), (310.0, 390.0)]);
        assert!(!is_wicket(&leaving, &stumps, 50.0));

        let far = path(&[(310.0, 100.0), (310.0, 150.0), (310.0, 200.0)]);
        assert!(!is_wicket(&far, &stumps, 50.0));
    }

    #[test]
    fn test_direction_change() {
        let straight = path(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (40.0, 0.0)]);
        assert!((direction_change_degrees(&straight).unwrap()).abs() < 1e-9);
        assert!(!is_shot_played(&straight, 30.0));

        let reversed = path(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0), (20.0, 0.0)]);
        assert!((direction_change_degrees(&reversed).unwrap() - 180.0).abs() < 1e-9);
        assert!(is_shot_played(&reversed, 30.0));

        let stalled = path(&[(0.0, 0.0), (0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        assert_eq!(direction_change_degrees(&stalled), None);
        assert!(!is_shot_played(&stalled, 30.0));
    }

    #[test]
    fn test_variance() {
        assert_eq!(variance(&[]), 0.0);
        assert!((variance(&[1.0, 2.0, 3.0, 4.0]) - 1.25).abs() < 1e-12);
    }
}
