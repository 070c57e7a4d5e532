/// Box and label rendering through OpenCV's `imgproc` drawing functions.
use opencv::core::{Mat, Point, Rect, Scalar};
use opencv::imgproc;
use opencv::prelude::*;

use crate::annotation::domain::frame_annotator::{label_origin, AnnotationStyle, FrameAnnotator};
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

const RGB_CHANNELS: i32 = 3;
const LABEL_FONT: i32 = imgproc::FONT_HERSHEY_SIMPLEX;
const LABEL_THICKNESS: i32 = 1;

pub struct OpenCvAnnotator {
    style: AnnotationStyle,
}

impl OpenCvAnnotator {
    pub fn new(style: AnnotationStyle) -> Self {
        Self { style }
    }

    fn draw(&self, canvas: &mut Mat, detection: &Detection) -> opencv::Result<()> {
        // The canvas holds RGB bytes, so the scalar is in RGB order too.
        let [r, g, b] = self.style.color;
        let color = Scalar::new(f64::from(r), f64::from(g), f64::from(b), 0.0);

        imgproc::rectangle(
            canvas,
            Rect::new(detection.left, detection.top, detection.width, detection.height),
            color,
            self.style.thickness,
            imgproc::LINE_8,
            0,
        )?;

        if !self.style.labels {
            return Ok(());
        }
        let text = detection.label();
        let mut baseline = 0;
        let size = imgproc::get_text_size(
            &text,
            LABEL_FONT,
            self.style.font_scale,
            LABEL_THICKNESS,
            &mut baseline,
        )?;
        let (x, y) = label_origin(detection, size.height, self.style.thickness);
        imgproc::put_text(
            canvas,
            &text,
            Point::new(x, y),
            LABEL_FONT,
            self.style.font_scale,
            color,
            LABEL_THICKNESS,
            imgproc::LINE_8,
            false,
        )
    }
}

impl FrameAnnotator for OpenCvAnnotator {
    fn annotate(
        &self,
        frame: &Frame,
        detections: &[Detection],
    ) -> Result<Frame, Box<dyn std::error::Error>> {
        if detections.is_empty() {
            return Ok(frame.clone());
        }

        let flat = Mat::from_slice(frame.data())?;
        let mut canvas = flat
            .reshape(RGB_CHANNELS, frame.height() as i32)?
            .try_clone()?;
        for detection in detections {
            self.draw(&mut canvas, detection)?;
        }

        let data = canvas.data_bytes()?.to_vec();
        Ok(Frame::new(data, frame.width(), frame.height(), frame.index()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 3] = [0, 0, 0];
    const GREEN: [u8; 3] = [0, 255, 0];

    fn black(w: u32, h: u32) -> Frame {
        Frame::filled(w, h, BLACK, 7)
    }

    fn any_green(frame: &Frame, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> bool {
        ys.clone()
            .any(|y| xs.clone().any(|x| frame.pixel(x, y) == Some(GREEN)))
    }

    #[test]
    fn test_no_detections_is_pixel_identical_copy() {
        let mut frame = black(64, 48);
        frame.data_mut()[10] = 77;

        let out = OpenCvAnnotator::new(AnnotationStyle::default())
            .annotate(&frame, &[])
            .unwrap();

        assert_eq!(out, frame);
    }

    #[test]
    fn test_input_frame_is_not_modified() {
        let frame = black(100, 100);
        let detection = Detection::new(10, 10, 50, 50, 0.9);

        let out = OpenCvAnnotator::new(AnnotationStyle::default())
            .annotate(&frame, &[detection])
            .unwrap();

        assert!(frame.data().iter().all(|&v| v == 0));
        assert_ne!(out, frame);
        assert_eq!(out.index(), 7);
    }

    #[test]
    fn test_box_outline_drawn_and_interior_untouched() {
        let frame = black(100, 100);
        let detection = Detection::new(10, 10, 50, 50, 1.0);

        let out = OpenCvAnnotator::new(AnnotationStyle::boxes_only())
            .annotate(&frame, &[detection])
            .unwrap();

        assert_eq!(out.pixel(10, 10), Some(GREEN));
        assert_eq!(out.pixel(35, 10), Some(GREEN));
        assert_eq!(out.pixel(59, 59), Some(GREEN));
        assert_eq!(out.pixel(35, 35), Some(BLACK));
        assert_eq!(out.pixel(0, 0), Some(BLACK));
        assert_eq!(out.pixel(80, 80), Some(BLACK));
    }

    #[test]
    fn test_label_drawn_above_box() {
        let frame = black(100, 100);
        let detection = Detection::new(10, 40, 50, 50, 0.9);

        let out = OpenCvAnnotator::new(AnnotationStyle::default())
            .annotate(&frame, &[detection])
            .unwrap();

        assert!(any_green(&out, 10..60, 20..37));
        assert!(!any_green(&out, 0..100, 0..18));
    }

    #[test]
    fn test_label_moves_inside_when_no_room_above() {
        let frame = black(100, 100);
        let detection = Detection::new(10, 2, 60, 60, 0.9);

        let labeled = OpenCvAnnotator::new(AnnotationStyle::default())
            .annotate(&frame, &[detection.clone()])
            .unwrap();
        let unlabeled = OpenCvAnnotator::new(AnnotationStyle::boxes_only())
            .annotate(&frame, &[detection])
            .unwrap();

        assert!(any_green(&labeled, 14..56, 6..22));
        assert!(!any_green(&unlabeled, 14..56, 6..22));
    }

    #[test]
    fn test_multiple_detections_all_drawn() {
        let frame = black(100, 100);
        let detections = vec![
            Detection::new(5, 5, 20, 20, 1.0),
            Detection::new(50, 50, 20, 20, 1.0),
        ];

        let out = OpenCvAnnotator::new(AnnotationStyle::boxes_only())
            .annotate(&frame, &detections)
            .unwrap();

        assert_eq!(out.pixel(5, 5), Some(GREEN));
        assert_eq!(out.pixel(50, 50), Some(GREEN));
    }
}
