//! Facial landmark vocabulary and planar geometry.
//!
//! Landmarks arrive from the external detector as normalized 2-D points in
//! the 478-point refined face-landmark index space. Only the named indices
//! below are consumed; everything else rides along untouched.

/// Number of points in the refined face-landmark index space.
pub const LANDMARK_COUNT: usize = 478;

/// Named landmark indices.
pub mod index {
    /// Right iris/pupil center (refined landmarks)
    pub const RIGHT_IRIS_CENTER: usize = 474;
    /// Left iris/pupil center
    pub const LEFT_IRIS_CENTER: usize = 468;
    /// Right eye corner near the nose
    pub const RIGHT_EYE_INNER: usize = 263;
    /// Left eye corner near the nose
    pub const LEFT_EYE_INNER: usize = 362;
    /// Right eye outer corner
    pub const RIGHT_EYE_OUTER: usize = 133;
    /// Left eye outer corner
    pub const LEFT_EYE_OUTER: usize = 33;
    /// Upper eyelid reference for vertical gaze
    pub const RIGHT_EYE_TOP: usize = 386;
    /// Lower eyelid reference for vertical gaze
    pub const RIGHT_EYE_BOTTOM: usize = 374;
    /// Left eyebrow inner point
    pub const LEFT_BROW_INNER: usize = 107;
    /// Right eyebrow inner point
    pub const RIGHT_BROW_INNER: usize = 336;
    /// Left jaw/cheek extreme
    pub const LEFT_FACE_CONTOUR: usize = 234;
    /// Right jaw/cheek extreme
    pub const RIGHT_FACE_CONTOUR: usize = 454;
    /// Outer lip left corner
    pub const UPPER_LEFT_LIP_CORNER: usize = 61;
    /// Outer lip right corner, paired with the left corner for mouth width
    pub const LOWER_RIGHT_LIP_CORNER: usize = 291;
    /// Top inner lip center
    pub const UPPER_INNER_LIP_CENTER: usize = 13;
    /// Bottom inner lip center
    pub const LOWER_INNER_LIP_CENTER: usize = 14;
    /// Nose tip, smile reference
    pub const NOSE_TIP: usize = 1;
}

/// A normalized 2-D landmark point.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// One detected face's landmark points for a single frame.
///
/// Immutable once built. Lookups of absent indices resolve to the origin, so
/// every geometry function stays total; a set shorter than the named indices
/// simply reads as degenerate geometry.
#[derive(Debug, Clone)]
pub struct LandmarkSet {
    points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Point at a named index, origin when absent.
    pub fn point(&self, idx: usize) -> Point {
        self.points.get(idx).copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
