use std::error::Error;
use std::path::Path;

use facegate_core::annotation::domain::frame_annotator::{AnnotationStyle, FrameAnnotator};
use facegate_core::annotation::infrastructure::opencv_annotator::OpenCvAnnotator;
use facegate_core::capture::domain::frame_source::FrameSource;
use facegate_core::capture::infrastructure::opencv_camera::OpenCvCamera;
use facegate_core::detection::domain::face_detector::FaceDetector;
use facegate_core::detection::infrastructure::cascade_detector::CascadeFaceDetector;
use facegate_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;

use crate::settings::Detector;

/// Builds the pieces a capture session runs on.
pub trait CaptureBackend {
    fn camera(&self, index: u32) -> Box<dyn FrameSource>;

    /// `model` is the resolved YOLO model; unused by the cascade.
    fn detector(
        &self,
        kind: Detector,
        model: Option<&Path>,
    ) -> Result<Box<dyn FaceDetector>, Box<dyn Error>>;

    fn annotator(&self, style: AnnotationStyle) -> Box<dyn FrameAnnotator>;
}

pub struct OpenCvBackend;

impl CaptureBackend for OpenCvBackend {
    fn camera(&self, index: u32) -> Box<dyn FrameSource> {
        Box::new(OpenCvCamera::new(index as i32))
    }

    fn detector(
        &self,
        kind: Detector,
        model: Option<&Path>,
    ) -> Result<Box<dyn FaceDetector>, Box<dyn Error>> {
        match kind {
            Detector::Cascade => Ok(Box::new(CascadeFaceDetector::new()?)),
            Detector::Yolo => {
                let path = model.ok_or("Face detection model not resolved")?;
                Ok(Box::new(OnnxYoloDetector::new(path)?))
            }
        }
    }

    fn annotator(&self, style: AnnotationStyle) -> Box<dyn FrameAnnotator> {
        Box::new(OpenCvAnnotator::new(style))
    }
}
