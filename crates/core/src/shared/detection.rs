/// A face-like region located in one frame.
///
/// Computed fresh per frame and never linked across frames. The cascade
/// detector reports a fixed confidence of `1.0`; the model detector reports
/// its real score.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
    pub confidence: f64,
}

/// Confidence reported by detectors that only answer "face present".
pub const BINARY_CONFIDENCE: f64 = 1.0;

impl Detection {
    pub fn new(left: i32, top: i32, width: i32, height: i32, confidence: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            confidence,
        }
    }

    /// Build from a corner pair, rounding to whole pixels.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
        let left = x1.round() as i32;
        let top = y1.round() as i32;
        Self {
            left,
            top,
            width: (x2.round() as i32 - left).max(0),
            height: (y2.round() as i32 - top).max(0),
            confidence,
        }
    }

    pub fn right(&self) -> i32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Clip to a `frame_width` × `frame_height` frame. Returns `None` when
    /// nothing of the box remains visible.
    pub fn clamped(&self, frame_width: u32, frame_height: u32) -> Option<Detection> {
        let fw = frame_width as i32;
        let fh = frame_height as i32;
        let x1 = self.left.clamp(0, fw);
        let y1 = self.top.clamp(0, fh);
        let x2 = self.right().clamp(0, fw);
        let y2 = self.bottom().clamp(0, fh);
        let clipped = Detection::new(x1, y1, x2 - x1, y2 - y1, self.confidence);
        (!clipped.is_empty()).then_some(clipped)
    }

    /// Confidence formatted for on-frame labels.
    pub fn label(&self) -> String {
        format!("{:.2}", self.confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_from_corners_computes_size() {
        let d = Detection::from_corners(10.2, 20.6, 60.4, 80.0, 0.8);
        assert_eq!(d, Detection::new(10, 21, 50, 59, 0.8));
        assert_eq!(d.right(), 60);
        assert_eq!(d.bottom(), 80);
    }

    #[test]
    fn test_from_corners_inverted_is_empty() {
        let d = Detection::from_corners(50.0, 50.0, 10.0, 10.0, 0.9);
        assert!(d.is_empty());
    }

    #[test]
    fn test_clamped_inside_frame_unchanged() {
        let d = Detection::new(10, 10, 50, 50, 0.9);
        assert_eq!(d.clamped(100, 100), Some(d.clone()));
    }

    #[test]
    fn test_clamped_clips_edges() {
        let d = Detection::new(-10, 90, 40, 40, 0.9);
        assert_eq!(d.clamped(100, 100), Some(Detection::new(0, 90, 30, 10, 0.9)));
    }

    #[test]
    fn test_clamped_fully_outside_is_none() {
        let d = Detection::new(200, 200, 10, 10, 0.9);
        assert_eq!(d.clamped(100, 100), None);
    }

    #[rstest]
    #[case(0.9, "0.90")]
    #[case(0.505, "0.51")]
    #[case(1.0, "1.00")]
    fn test_label_two_decimals(#[case] confidence: f64, #[case] expected: &str) {
        let d = Detection::new(0, 0, 1, 1, confidence);
        assert_eq!(d.label(), expected);
    }
}
