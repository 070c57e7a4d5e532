use thiserror::Error;

use crate::shared::frame::Frame;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The device could not be opened. Terminal for the program.
    #[error("could not open camera {device}: {reason}")]
    Unavailable { device: String, reason: String },
    /// A single read failed. The cycle is skipped and the next tick retries.
    #[error("failed to read frame: {0}")]
    FrameRead(String),
    #[error("camera already released")]
    Released,
}

/// One exclusively-owned camera device.
///
/// Callers should hold sources through a `CameraGuard`, which guarantees that
/// `release` runs exactly once on every exit path.
pub trait FrameSource: Send {
    /// Human-readable device name for logs and error messages.
    fn describe(&self) -> String;

    /// Open the device. Called once, before the first `read`.
    fn open(&mut self) -> Result<(), CaptureError>;

    /// Acquire the next frame.
    fn read(&mut self) -> Result<Frame, CaptureError>;

    /// Release the device handle.
    fn release(&mut self);
}
