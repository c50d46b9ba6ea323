//! Shared landmark fixtures for unit tests.

use crate::landmarks::{index, LandmarkSet, Point, LANDMARK_COUNT};

/// Landmark points of a front-facing neutral face: centered gaze, relaxed
/// brows, closed mouth. Classifies as Focused.
pub(crate) fn neutral_points() -> Vec<Point> {
    let mut points = vec![Point::new(0.5, 0.5); LANDMARK_COUNT];
    points[index::LEFT_FACE_CONTOUR] = Point::new(0.2, 0.5);
    points[index::RIGHT_FACE_CONTOUR] = Point::new(0.8, 0.5);
    points[index::LEFT_BROW_INNER] = Point::new(0.44, 0.40);
    points[index::RIGHT_BROW_INNER] = Point::new(0.56, 0.40);
    points[index::RIGHT_EYE_INNER] = Point::new(0.65, 0.45);
    points[index::LEFT_EYE_INNER] = Point::new(0.35, 0.45);
    points[index::RIGHT_IRIS_CENTER] = Point::new(0.50, 0.45);
    points[index::RIGHT_EYE_TOP] = Point::new(0.50, 0.42);
    points[index::RIGHT_EYE_BOTTOM] = Point::new(0.50, 0.48);
    points[index::UPPER_LEFT_LIP_CORNER] = Point::new(0.42, 0.62);
    points[index::LOWER_RIGHT_LIP_CORNER] = Point::new(0.58, 0.62);
    points[index::UPPER_INNER_LIP_CENTER] = Point::new(0.50, 0.615);
    points[index::LOWER_INNER_LIP_CENTER] = Point::new(0.50, 0.625);
    points[index::NOSE_TIP] = Point::new(0.50, 0.52);
    points
}

pub(crate) fn neutral_face() -> LandmarkSet {
    LandmarkSet::new(neutral_points())
}

/// Every landmark collapsed onto one point: zero face width, zero eye extent.
pub(crate) fn degenerate_face() -> LandmarkSet {
    LandmarkSet::new(vec![Point::new(0.5, 0.5); LANDMARK_COUNT])
}

/// Neutral face with the iris shifted toward the inner corner (gaze RIGHT).
pub(crate) fn gaze_right_face() -> LandmarkSet {
    let mut points = neutral_points();
    points[index::RIGHT_IRIS_CENTER] = Point::new(0.63, 0.45);
    LandmarkSet::new(points)
}

/// Neutral face with the inner brows drawn together (rule-based confusion).
pub(crate) fn confused_face() -> LandmarkSet {
    let mut points = neutral_points();
    points[index::LEFT_BROW_INNER] = Point::new(0.47, 0.40);
    points[index::RIGHT_BROW_INNER] = Point::new(0.53, 0.40);
    LandmarkSet::new(points)
}

/// Neutral face with a wide, open mouth (happiness rule).
pub(crate) fn happy_face() -> LandmarkSet {
    let mut points = neutral_points();
    points[index::UPPER_LEFT_LIP_CORNER] = Point::new(0.38, 0.62);
    points[index::LOWER_RIGHT_LIP_CORNER] = Point::new(0.62, 0.62);
    points[index::UPPER_INNER_LIP_CENTER] = Point::new(0.50, 0.61);
    points[index::LOWER_INNER_LIP_CENTER] = Point::new(0.50, 0.63);
    LandmarkSet::new(points)
}
