use super::frame_source::{CaptureError, FrameSource};
use crate::shared::frame::Frame;

/// Scoped ownership of a `FrameSource`.
///
/// `release` is idempotent and also runs on drop, so the device is released
/// exactly once whether the owner stops normally, returns early with an
/// error, or fails to open the device in the first place.
pub struct CameraGuard {
    source: Box<dyn FrameSource>,
    released: bool,
}

impl CameraGuard {
    /// Open `source` and take ownership of it.
    ///
    /// On failure the source is released before the error is returned.
    pub fn acquire(source: Box<dyn FrameSource>) -> Result<Self, CaptureError> {
        let mut guard = Self {
            source,
            released: false,
        };
        guard.source.open()?;
        log::info!("Camera {} opened", guard.source.describe());
        Ok(guard)
    }

    pub fn read(&mut self) -> Result<Frame, CaptureError> {
        if self.released {
            return Err(CaptureError::Released);
        }
        self.source.read()
    }

    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.source.release();
        log::info!("Camera {} released", self.source.describe());
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl Drop for CameraGuard {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Scripted frame source that counts `open`/`release` calls.
    pub struct FakeSource {
        pub frames: VecDeque<Result<Frame, CaptureError>>,
        pub fail_open: bool,
        pub releases: Arc<AtomicUsize>,
    }

    impl FakeSource {
        pub fn new(frames: Vec<Result<Frame, CaptureError>>) -> Self {
            Self {
                frames: frames.into(),
                fail_open: false,
                releases: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn failing_open() -> Self {
            Self {
                fail_open: true,
                ..Self::new(vec![])
            }
        }

        pub fn release_counter(&self) -> Arc<AtomicUsize> {
            self.releases.clone()
        }
    }

    impl FrameSource for FakeSource {
        fn describe(&self) -> String {
            "fake".into()
        }

        fn open(&mut self) -> Result<(), CaptureError> {
            if self.fail_open {
                return Err(CaptureError::Unavailable {
                    device: "fake".into(),
                    reason: "not connected".into(),
                });
            }
            Ok(())
        }

        fn read(&mut self) -> Result<Frame, CaptureError> {
            self.frames
                .pop_front()
                .unwrap_or_else(|| Err(CaptureError::FrameRead("no more frames".into())))
        }

        fn release(&mut self) {
            self.releases.fetch_add(1, Ordering::SeqCst);
        }
    }
}
