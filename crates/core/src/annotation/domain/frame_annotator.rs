use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

/// Box and label appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationStyle {
    pub color: [u8; 3],
    /// Box outline thickness in pixels.
    pub thickness: i32,
    /// Draw the `{:.2}` confidence above each box.
    pub labels: bool,
    pub font_scale: f64,
}

impl AnnotationStyle {
    pub fn boxes_only() -> Self {
        Self {
            labels: false,
            ..Self::default()
        }
    }
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            color: [0, 255, 0],
            thickness: 2,
            labels: true,
            font_scale: 0.5,
        }
    }
}

/// Draws detections onto a copy of a frame.
///
/// Implementations never modify the input, and return a pixel-identical copy
/// when `detections` is empty.
pub trait FrameAnnotator: Send {
    fn annotate(
        &self,
        frame: &Frame,
        detections: &[Detection],
    ) -> Result<Frame, Box<dyn std::error::Error>>;
}

/// Gap between the label baseline and the box.
pub const LABEL_MARGIN: i32 = 5;

/// Bottom-left origin for a label `text_height` pixels tall: just above the
/// box, or inside its top edge when there is no room above.
pub fn label_origin(detection: &Detection, text_height: i32, thickness: i32) -> (i32, i32) {
    let above = detection.top - LABEL_MARGIN;
    if above - text_height >= 0 {
        (detection.left, above)
    } else {
        (
            detection.left + thickness + LABEL_MARGIN,
            detection.top + thickness + LABEL_MARGIN + text_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::room_above(Detection::new(10, 40, 50, 50, 0.9), (10, 35))]
    #[case::exactly_enough_room(Detection::new(10, 17, 50, 50, 0.9), (10, 12))]
    #[case::at_top_edge(Detection::new(10, 2, 60, 60, 0.9), (17, 21))]
    fn test_label_origin(#[case] detection: Detection, #[case] expected: (i32, i32)) {
        assert_eq!(label_origin(&detection, 12, 2), expected);
    }

    #[test]
    fn test_boxes_only_keeps_colour_and_thickness() {
        let style = AnnotationStyle::boxes_only();

        assert!(!style.labels);
        assert_eq!(style.color, [0, 255, 0]);
        assert_eq!(style.thickness, 2);
    }
}
