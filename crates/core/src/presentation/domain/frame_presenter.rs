use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug)]
#[error("display failed: {0}")]
pub struct PresentError(pub String);

/// What the presenter observed from the user since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserSignal {
    Continue,
    QuitKey,
    WindowClosed,
}

/// Output surface for the blocking perception loop.
///
/// `poll` runs once per cycle even when no frame was shown, so a user can
/// still quit while the camera is failing to deliver frames.
pub trait FramePresenter {
    fn present(&mut self, frame: &Frame) -> Result<(), PresentError>;

    fn poll(&mut self) -> Result<UserSignal, PresentError>;

    /// Tear down the surface. Called after the camera has been released.
    fn close(&mut self) {}
}
