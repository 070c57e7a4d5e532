/// Haar-cascade frontal face detector using OpenCV's `objdetect` module.
///
/// Runs on the luminance image and answers "face present" only, so every
/// detection carries `BINARY_CONFIDENCE`.
use std::path::{Path, PathBuf};

use opencv::core::{self, Mat, Rect, Size, Vector};
use opencv::objdetect::CascadeClassifier;
use opencv::prelude::*;

use crate::detection::domain::face_detector::FaceDetector;
use crate::shared::constants::CASCADE_FILE;
use crate::shared::detection::{Detection, BINARY_CONFIDENCE};
use crate::shared::frame::Frame;

/// Scale step between pyramid levels.
const SCALE_FACTOR: f64 = 1.1;

/// Neighbouring hits required to keep a candidate.
const MIN_NEIGHBORS: i32 = 5;

/// Smallest face considered, in pixels.
const MIN_FACE_SIZE: i32 = 30;

pub struct CascadeFaceDetector {
    classifier: CascadeClassifier,
}

impl CascadeFaceDetector {
    /// Load the bundled OpenCV frontal-face cascade.
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let path = locate_default_cascade()?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let path_str = path
            .to_str()
            .ok_or_else(|| format!("Cascade path is not valid UTF-8: {}", path.display()))?;
        let classifier = CascadeClassifier::new(path_str)?;
        if classifier.empty()? {
            return Err(format!("Failed to load cascade from {}", path.display()).into());
        }
        log::info!("Loaded face cascade {}", path.display());
        Ok(Self { classifier })
    }
}

impl FaceDetector for CascadeFaceDetector {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let luma = frame.to_luma();
        let gray = Mat::new_rows_cols_with_data(frame.height() as i32, frame.width() as i32, &luma)?;

        let mut faces = Vector::<Rect>::new();
        self.classifier.detect_multi_scale(
            &*gray,
            &mut faces,
            SCALE_FACTOR,
            MIN_NEIGHBORS,
            0,
            Size::new(MIN_FACE_SIZE, MIN_FACE_SIZE),
            Size::new(0, 0),
        )?;

        Ok(faces
            .iter()
            .map(|r| Detection::new(r.x, r.y, r.width, r.height, BINARY_CONFIDENCE))
            .collect())
    }
}

/// Find the frontal-face cascade in OpenCV's sample-data search path.
fn locate_default_cascade() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let found = core::find_file(CASCADE_FILE, true, false)?;
    if found.is_empty() {
        return Err(format!("OpenCV data file not found: {CASCADE_FILE}").into());
    }
    Ok(PathBuf::from(found))
}
