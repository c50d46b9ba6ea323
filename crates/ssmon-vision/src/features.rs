//! Geometry feature extraction.
//!
//! Pure functions of one landmark set. All ratios are normalized by face
//! width so they are scale-invariant; degenerate geometry (zero face width,
//! zero eye extent) yields the neutral value instead of dividing by zero.

use ssmon_models::{FeatureSnapshot, GazeDirection};

use crate::config::MonitorConfig;
use crate::landmarks::{index, LandmarkSet};

/// Inter-contour face width, the normalization base for every ratio.
fn face_width(lm: &LandmarkSet) -> f64 {
    lm.point(index::LEFT_FACE_CONTOUR)
        .distance(&lm.point(index::RIGHT_FACE_CONTOUR))
}

/// Inter-brow distance over face width. Zero when the face width is zero.
pub fn brow_ratio(lm: &LandmarkSet) -> f64 {
    let width = face_width(lm);
    if width == 0.0 {
        return 0.0;
    }
    lm.point(index::LEFT_BROW_INNER)
        .distance(&lm.point(index::RIGHT_BROW_INNER))
        / width
}

/// Mouth geometry: `(width_ratio, open_ratio, smile_up)`.
///
/// `smile_up` is the signed vertical nose-to-lip offset over face width,
/// as fed to the trained model (positive when the lip corners sit below the
/// nose tip).
pub fn mouth_features(lm: &LandmarkSet) -> (f64, f64, f64) {
    let width = face_width(lm);
    if width == 0.0 {
        return (0.0, 0.0, 0.0);
    }

    let left = lm.point(index::UPPER_LEFT_LIP_CORNER);
    let right = lm.point(index::LOWER_RIGHT_LIP_CORNER);
    let top = lm.point(index::UPPER_INNER_LIP_CENTER);
    let bottom = lm.point(index::LOWER_INNER_LIP_CENTER);
    let nose = lm.point(index::NOSE_TIP);

    let mouth_width = left.distance(&right) / width;
    let mouth_open = top.distance(&bottom) / width;
    let smile_up = (nose.y - (left.y + right.y) / 2.0) / width;

    (mouth_width, mouth_open, smile_up)
}

/// Absolute-orientation roll of the face-contour axis, in degrees.
pub fn head_roll_degrees(lm: &LandmarkSet) -> f64 {
    let left = lm.point(index::LEFT_FACE_CONTOUR);
    let right = lm.point(index::RIGHT_FACE_CONTOUR);
    (right.y - left.y).atan2(right.x - left.x).to_degrees()
}

/// Rule-based happiness check.
///
/// Note the smile offset here is measured lip-to-nose, the opposite sign of
/// the model feature from [`mouth_features`].
pub fn is_happy(lm: &LandmarkSet, config: &MonitorConfig) -> bool {
    let width = face_width(lm);
    if width == 0.0 {
        return false;
    }

    let left = lm.point(index::UPPER_LEFT_LIP_CORNER);
    let right = lm.point(index::LOWER_RIGHT_LIP_CORNER);
    let top = lm.point(index::UPPER_INNER_LIP_CENTER);
    let bottom = lm.point(index::LOWER_INNER_LIP_CENTER);
    let nose = lm.point(index::NOSE_TIP);

    let mouth_width = left.distance(&right) / width;
    let mouth_open = top.distance(&bottom) / width;
    let smile_up = ((left.y + right.y) / 2.0 - nose.y) / width;

    (mouth_width > config.happy_mouth_width && mouth_open > config.happy_mouth_open)
        || smile_up < config.happy_smile_up
}

/// Horizontal gaze from the right iris measured against the span between the
/// two inner eye corners.
pub fn horizontal_gaze(lm: &LandmarkSet, config: &MonitorConfig) -> GazeDirection {
    let iris = lm.point(index::RIGHT_IRIS_CENTER);
    let inner = lm.point(index::RIGHT_EYE_INNER);
    let outer = lm.point(index::LEFT_EYE_INNER);

    let eye_width = inner.distance(&outer);
    if eye_width == 0.0 {
        return GazeDirection::Center;
    }

    let ratio = iris.distance(&inner) / eye_width;
    if ratio < config.gaze_right_ratio {
        GazeDirection::Right
    } else if ratio > config.gaze_left_ratio {
        GazeDirection::Left
    } else {
        GazeDirection::Center
    }
}

/// Vertical gaze from the right iris position between the eyelid references.
pub fn vertical_gaze(lm: &LandmarkSet, config: &MonitorConfig) -> GazeDirection {
    let iris = lm.point(index::RIGHT_IRIS_CENTER);
    let upper = lm.point(index::RIGHT_EYE_TOP);
    let lower = lm.point(index::RIGHT_EYE_BOTTOM);

    let eye_height = upper.distance(&lower);
    if eye_height == 0.0 {
        return GazeDirection::Center;
    }

    let ratio = iris.distance(&upper) / eye_height;
    if ratio < config.gaze_up_ratio {
        GazeDirection::Up
    } else if ratio > config.gaze_down_ratio {
        GazeDirection::Down
    } else {
        GazeDirection::Center
    }
}

/// Combined gaze direction. Horizontal wins over vertical.
pub fn gaze(lm: &LandmarkSet, config: &MonitorConfig) -> GazeDirection {
    let horizontal = horizontal_gaze(lm, config);
    if !horizontal.is_center() {
        return horizontal;
    }
    vertical_gaze(lm, config)
}

/// Rule-based confusion check from brow position.
///
/// Returns the verdict against the primary threshold together with the raw
/// ratio; the caller applies the tighter override comparison on the ratio.
pub fn brow_confusion(lm: &LandmarkSet, config: &MonitorConfig) -> (bool, f64) {
    let width = face_width(lm);
    if width == 0.0 {
        return (false, 0.0);
    }

    let ratio = lm
        .point(index::LEFT_BROW_INNER)
        .distance(&lm.point(index::RIGHT_BROW_INNER))
        / width;
    (ratio < config.brow_confusion_ratio, ratio)
}

/// Fixed-order feature vector for the trained confusion model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub brow: f64,
    pub mouth_width: f64,
    pub mouth_open: f64,
    pub smile_up: f64,
    pub head_roll_abs: f64,
}

impl FeatureVector {
    /// Model input row, in training column order.
    pub fn as_row(&self) -> [f64; 5] {
        [
            self.brow,
            self.mouth_width,
            self.mouth_open,
            self.smile_up,
            self.head_roll_abs,
        ]
    }

    /// The subset echoed back to the student client.
    pub fn snapshot(&self) -> FeatureSnapshot {
        FeatureSnapshot {
            brow: self.brow,
            smile_up: self.smile_up,
            roll: self.head_roll_abs,
        }
    }
}

/// Extract the model feature vector from one landmark set.
pub fn extract(lm: &LandmarkSet) -> FeatureVector {
    let (mouth_width, mouth_open, smile_up) = mouth_features(lm);
    FeatureVector {
        brow: brow_ratio(lm),
        mouth_width,
        mouth_open,
        smile_up,
        head_roll_abs: head_roll_degrees(lm).abs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::Point;
    use crate::testutil::{degenerate_face, neutral_face, neutral_points};

    #[test]
    fn test_degenerate_face_yields_neutral_features() {
        let lm = degenerate_face();
        assert_eq!(brow_ratio(&lm), 0.0);
        assert_eq!(mouth_features(&lm), (0.0, 0.0, 0.0));
        assert_eq!(brow_confusion(&lm, &MonitorConfig::default()), (false, 0.0));
        assert!(!is_happy(&lm, &MonitorConfig::default()));
        assert_eq!(
            gaze(&lm, &MonitorConfig::default()),
            GazeDirection::Center
        );
    }

    #[test]
    fn test_neutral_face_ratios() {
        let lm = neutral_face();
        let brow = brow_ratio(&lm);
        assert!((brow - 0.2).abs() < 1e-9, "brow ratio: {brow}");

        let (width, open, smile_up) = mouth_features(&lm);
        assert!((width - 0.16 / 0.6).abs() < 1e-9);
        assert!((open - 0.01 / 0.6).abs() < 1e-9);
        assert!(smile_up < 0.0, "lip corners below nose: {smile_up}");

        assert_eq!(head_roll_degrees(&lm), 0.0);
    }

    #[test]
    fn test_neutral_face_gaze_is_center() {
        let config = MonitorConfig::default();
        let lm = neutral_face();
        assert_eq!(horizontal_gaze(&lm, &config), GazeDirection::Center);
        assert_eq!(vertical_gaze(&lm, &config), GazeDirection::Center);
        assert_eq!(gaze(&lm, &config), GazeDirection::Center);
    }

    #[test]
    fn test_iris_near_inner_corner_reads_right() {
        let config = MonitorConfig::default();
        let mut points = neutral_points();
        points[index::RIGHT_IRIS_CENTER] = Point::new(0.63, 0.45);
        assert_eq!(
            gaze(&LandmarkSet::new(points), &config),
            GazeDirection::Right
        );
    }

    #[test]
    fn test_iris_near_eyelid_top_reads_up() {
        let config = MonitorConfig::default();
        let mut points = neutral_points();
        points[index::RIGHT_IRIS_CENTER] = Point::new(0.5, 0.425);
        assert_eq!(gaze(&LandmarkSet::new(points), &config), GazeDirection::Up);
    }

    #[test]
    fn test_horizontal_gaze_dominates_vertical() {
        let config = MonitorConfig::default();
        let mut points = neutral_points();
        // Off-center both ways; the horizontal reading must win.
        points[index::RIGHT_IRIS_CENTER] = Point::new(0.63, 0.42);
        assert_eq!(
            gaze(&LandmarkSet::new(points), &config),
            GazeDirection::Right
        );
    }

    #[test]
    fn test_brow_confusion_thresholds() {
        let config = MonitorConfig::default();
        let lm = neutral_face();
        let (confused, ratio) = brow_confusion(&lm, &config);
        assert!(!confused);
        assert!((ratio - 0.2).abs() < 1e-9);

        let mut points = neutral_points();
        points[index::LEFT_BROW_INNER] = Point::new(0.47, 0.40);
        points[index::RIGHT_BROW_INNER] = Point::new(0.53, 0.40);
        let (confused, ratio) = brow_confusion(&LandmarkSet::new(points), &config);
        assert!(confused);
        assert!((ratio - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_wide_open_mouth_is_happy() {
        let config = MonitorConfig::default();
        let mut points = neutral_points();
        points[index::UPPER_LEFT_LIP_CORNER] = Point::new(0.38, 0.62);
        points[index::LOWER_RIGHT_LIP_CORNER] = Point::new(0.62, 0.62);
        points[index::UPPER_INNER_LIP_CENTER] = Point::new(0.50, 0.61);
        points[index::LOWER_INNER_LIP_CENTER] = Point::new(0.50, 0.63);
        assert!(is_happy(&LandmarkSet::new(points), &config));
    }

    #[test]
    fn test_feature_vector_row_order() {
        let fv = FeatureVector {
            brow: 0.1,
            mouth_width: 0.2,
            mouth_open: 0.3,
            smile_up: 0.4,
            head_roll_abs: 5.0,
        };
        assert_eq!(fv.as_row(), [0.1, 0.2, 0.3, 0.4, 5.0]);

        let snapshot = fv.snapshot();
        assert_eq!(snapshot.brow, 0.1);
        assert_eq!(snapshot.smile_up, 0.4);
        assert_eq!(snapshot.roll, 5.0);
    }
}
