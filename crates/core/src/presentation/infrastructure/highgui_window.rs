/// Native display window through OpenCV's `highgui` module.
use opencv::highgui;

use crate::capture::infrastructure::opencv_camera::frame_to_mat;
use crate::presentation::domain::frame_presenter::{FramePresenter, PresentError, UserSignal};
use crate::shared::constants::QUIT_KEY;
use crate::shared::frame::Frame;

/// Milliseconds `wait_key` blocks per cycle.
const KEY_POLL_MS: i32 = 1;

pub struct HighGuiWindow {
    title: String,
    shown: bool,
    closed: bool,
}

impl HighGuiWindow {
    pub fn new(title: &str) -> Result<Self, PresentError> {
        highgui::named_window(title, highgui::WINDOW_AUTOSIZE).map_err(to_present_error)?;
        Ok(Self {
            title: title.to_string(),
            shown: false,
            closed: false,
        })
    }

    fn is_visible(&self) -> Result<bool, PresentError> {
        let visible = highgui::get_window_property(&self.title, highgui::WND_PROP_VISIBLE)
            .map_err(to_present_error)?;
        Ok(visible >= 1.0)
    }
}

impl FramePresenter for HighGuiWindow {
    fn present(&mut self, frame: &Frame) -> Result<(), PresentError> {
        let mat = frame_to_mat(frame).map_err(to_present_error)?;
        highgui::imshow(&self.title, &mat).map_err(to_present_error)?;
        self.shown = true;
        Ok(())
    }

    fn poll(&mut self) -> Result<UserSignal, PresentError> {
        let key = highgui::wait_key(KEY_POLL_MS).map_err(to_present_error)?;
        if key >= 0 && (key & 0xFF) as u8 == QUIT_KEY as u8 {
            return Ok(UserSignal::QuitKey);
        }
        // Visibility is meaningless until the first imshow creates the surface.
        if self.shown && !self.is_visible()? {
            return Ok(UserSignal::WindowClosed);
        }
        Ok(UserSignal::Continue)
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(e) = highgui::destroy_window(&self.title) {
            log::debug!("Destroying window '{}' failed: {e}", self.title);
        }
    }
}

impl Drop for HighGuiWindow {
    fn drop(&mut self) {
        self.close();
    }
}

fn to_present_error(e: opencv::Error) -> PresentError {
    PresentError(e.to_string())
}
