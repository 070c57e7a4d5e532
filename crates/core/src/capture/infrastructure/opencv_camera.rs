/// Webcam capture through OpenCV's `videoio` module.
use opencv::core::Mat;
use opencv::imgproc;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::{Frame, RGB_CHANNELS};

/// Camera opened by device index. Frames arrive as BGR and are converted to
/// RGB before they leave this adapter.
pub struct OpenCvCamera {
    index: i32,
    capture: Option<VideoCapture>,
    next_frame: usize,
}

impl OpenCvCamera {
    pub fn new(index: i32) -> Self {
        Self {
            index,
            capture: None,
            next_frame: 0,
        }
    }

    fn unavailable(&self, reason: impl ToString) -> CaptureError {
        CaptureError::Unavailable {
            device: self.describe(),
            reason: reason.to_string(),
        }
    }
}

impl FrameSource for OpenCvCamera {
    fn describe(&self) -> String {
        format!("#{}", self.index)
    }

    fn open(&mut self) -> Result<(), CaptureError> {
        let capture =
            VideoCapture::new(self.index, videoio::CAP_ANY).map_err(|e| self.unavailable(e))?;
        let opened = capture.is_opened().map_err(|e| self.unavailable(e))?;
        // Keep the handle even when closed so release() still reaches it.
        self.capture = Some(capture);
        if !opened {
            return Err(self.unavailable("device did not open"));
        }
        Ok(())
    }

    fn read(&mut self) -> Result<Frame, CaptureError> {
        let capture = self.capture.as_mut().ok_or(CaptureError::Released)?;

        let mut bgr = Mat::default();
        let grabbed = capture
            .read(&mut bgr)
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        if !grabbed || bgr.empty() {
            return Err(CaptureError::FrameRead("camera returned no frame".into()));
        }

        let frame = mat_to_frame(&bgr, self.next_frame)
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        self.next_frame += 1;
        Ok(frame)
    }

    fn release(&mut self) {
        if let Some(mut capture) = self.capture.take() {
            if let Err(e) = capture.release() {
                log::warn!("Releasing camera {} failed: {e}", self.describe());
            }
        }
    }
}

/// Convert a BGR `Mat` into an RGB `Frame`.
pub fn mat_to_frame(bgr: &Mat, index: usize) -> opencv::Result<Frame> {
    if bgr.channels() != RGB_CHANNELS as i32 {
        return Err(opencv::Error::new(
            opencv::core::StsBadArg,
            format!("expected 3-channel frame, got {}", bgr.channels()),
        ));
    }
    let mut rgb = Mat::default();
    imgproc::cvt_color_def(bgr, &mut rgb, imgproc::COLOR_BGR2RGB)?;
    let data = rgb.data_bytes()?.to_vec();
    Ok(Frame::new(data, rgb.cols() as u32, rgb.rows() as u32, index))
}

/// Convert an RGB `Frame` into a BGR `Mat` for OpenCV display.
pub fn frame_to_mat(frame: &Frame) -> opencv::Result<Mat> {
    let flat = Mat::from_slice(frame.data())?;
    let rgb = flat.reshape(RGB_CHANNELS as i32, frame.height() as i32)?;
    let mut bgr = Mat::default();
    imgproc::cvt_color_def(&*rgb, &mut bgr, imgproc::COLOR_RGB2BGR)?;
    Ok(bgr)
}
