use thiserror::Error;

use crate::annotation::domain::frame_annotator::FrameAnnotator;
use crate::detection::domain::detection_policy::DetectionPolicy;
use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::detection::Detection;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum StepError {
    #[error("face detection failed: {0}")]
    Detection(String),
    #[error("annotation failed: {0}")]
    Annotation(String),
}

/// Result of one detect-and-annotate pass.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutput {
    pub annotated: Frame,
    /// Detections that passed the policy, in detector order.
    pub detections: Vec<Detection>,
}

/// Detect, filter and annotate a single frame.
///
/// Holds no state between frames apart from whatever the detector keeps.
pub struct PerceptionStep {
    detector: Box<dyn FaceDetector>,
    policy: DetectionPolicy,
    annotator: Box<dyn FrameAnnotator>,
}

impl PerceptionStep {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        policy: DetectionPolicy,
        annotator: Box<dyn FrameAnnotator>,
    ) -> Self {
        Self {
            detector,
            policy,
            annotator,
        }
    }

    /// Raw detections are clamped to the frame before the policy runs.
    pub fn process(&mut self, frame: &Frame) -> Result<StepOutput, StepError> {
        let raw = self
            .detector
            .detect(frame)
            .map_err(|e| StepError::Detection(e.to_string()))?;
        let clamped = raw
            .into_iter()
            .filter_map(|d| d.clamped(frame.width(), frame.height()))
            .collect();
        let detections = self.policy.apply(clamped);
        let annotated = self
            .annotator
            .annotate(frame, &detections)
            .map_err(|e| StepError::Annotation(e.to_string()))?;
        Ok(StepOutput {
            annotated,
            detections,
        })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::{HashMap, HashSet};

    use super::*;

    pub const MARK: [u8; 3] = [0, 255, 0];

    /// Detector that answers by frame index.
    pub struct ScriptedDetector {
        pub results: HashMap<usize, Vec<Detection>>,
        pub failing: HashSet<usize>,
    }

    impl ScriptedDetector {
        pub fn new(results: Vec<(usize, Vec<Detection>)>) -> Self {
            Self {
                results: results.into_iter().collect(),
                failing: HashSet::new(),
            }
        }

        /// Fail instead of answering for frame `index`.
        pub fn failing_on(mut self, index: usize) -> Self {
            self.failing.insert(index);
            self
        }
    }

    impl FaceDetector for ScriptedDetector {
        fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            if self.failing.contains(&frame.index()) {
                return Err("detector error".into());
            }
            Ok(self
                .results
                .get(&frame.index())
                .cloned()
                .unwrap_or_default())
        }
    }

    pub struct FailingDetector;

    impl FaceDetector for FailingDetector {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
            Err("detector error".into())
        }
    }

    /// Paints the top-left pixel of every detection with [`MARK`].
    pub struct CornerMarker;

    impl FrameAnnotator for CornerMarker {
        fn annotate(
            &self,
            frame: &Frame,
            detections: &[Detection],
        ) -> Result<Frame, Box<dyn std::error::Error>> {
            let mut out = frame.clone();
            let width = out.width() as usize;
            for d in detections {
                let at = (d.top as usize * width + d.left as usize) * 3;
                out.data_mut()[at..at + 3].copy_from_slice(&MARK);
            }
            Ok(out)
        }
    }

    pub struct FailingAnnotator;

    impl FrameAnnotator for FailingAnnotator {
        fn annotate(
            &self,
            _frame: &Frame,
            _detections: &[Detection],
        ) -> Result<Frame, Box<dyn std::error::Error>> {
            Err("no canvas".into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{CornerMarker, FailingAnnotator, FailingDetector, ScriptedDetector, MARK};
    use super::*;
    use crate::detection::domain::detection_policy::Selection;

    fn black(index: usize) -> Frame {
        Frame::filled(100, 100, [0, 0, 0], index)
    }

    #[test]
    fn test_no_detections_returns_identical_copy() {
        let mut step = PerceptionStep::new(
            Box::new(ScriptedDetector::new(vec![])),
            DetectionPolicy::cascade(),
            Box::new(CornerMarker),
        );
        let frame = black(0);

        let out = step.process(&frame).unwrap();

        assert!(out.detections.is_empty());
        assert_eq!(out.annotated, frame);
    }

    #[test]
    fn test_policy_filters_before_annotation() {
        let detections = vec![
            Detection::new(10, 10, 20, 20, 0.4),
            Detection::new(50, 50, 20, 20, 0.9),
        ];
        let mut step = PerceptionStep::new(
            Box::new(ScriptedDetector::new(vec![(0, detections)])),
            DetectionPolicy::new(Some(0.5), Selection::All),
            Box::new(CornerMarker),
        );

        let out = step.process(&black(0)).unwrap();

        assert_eq!(out.detections, vec![Detection::new(50, 50, 20, 20, 0.9)]);
        assert_eq!(out.annotated.pixel(10, 10), Some([0, 0, 0]));
        assert_eq!(out.annotated.pixel(50, 50), Some(MARK));
    }

    #[test]
    fn test_detections_outside_frame_are_dropped() {
        let mut step = PerceptionStep::new(
            Box::new(ScriptedDetector::new(vec![(
                0,
                vec![Detection::new(200, 200, 10, 10, 1.0)],
            )])),
            DetectionPolicy::cascade(),
            Box::new(CornerMarker),
        );

        let out = step.process(&black(0)).unwrap();

        assert!(out.detections.is_empty());
    }

    #[test]
    fn test_detector_error_propagates() {
        let mut step = PerceptionStep::new(
            Box::new(FailingDetector),
            DetectionPolicy::cascade(),
            Box::new(CornerMarker),
        );

        let err = step.process(&black(0)).unwrap_err();

        assert!(matches!(err, StepError::Detection(_)));
        assert_eq!(err.to_string(), "face detection failed: detector error");
    }

    #[test]
    fn test_annotation_error_propagates() {
        let mut step = PerceptionStep::new(
            Box::new(ScriptedDetector::new(vec![])),
            DetectionPolicy::cascade(),
            Box::new(FailingAnnotator),
        );

        let err = step.process(&black(0)).unwrap_err();

        assert!(matches!(err, StepError::Annotation(_)));
    }
}
