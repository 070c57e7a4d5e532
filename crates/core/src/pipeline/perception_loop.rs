use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;

use crate::capture::domain::camera_guard::CameraGuard;
use crate::capture::domain::frame_source::{CaptureError, FrameSource};
use crate::presentation::domain::frame_presenter::{FramePresenter, PresentError, UserSignal};

use super::gate::Gate;
use super::loop_logger::LoopLogger;
use super::perception_step::{PerceptionStep, StepError, StepOutput};

#[derive(Error, Debug)]
pub enum LoopError {
    #[error(transparent)]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Step(#[from] StepError),
    #[error(transparent)]
    Present(#[from] PresentError),
}

/// Why a loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    QuitKey,
    WindowClosed,
    /// Stopped through a [`StopHandle`], e.g. Ctrl-C.
    Interrupted,
    CaptureFailed,
    DialogDismissed,
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// No camera held yet. A started loop never reports this; owners that
    /// have not started one do.
    Idle,
    Capturing,
    Stopped(StopReason),
}

/// What one tick produced.
#[derive(Debug)]
pub enum TickOutcome {
    Frame(StepOutput),
    /// The camera returned no frame; the gate keeps its previous value.
    ReadFailed,
    Stopped(StopReason),
}

/// Cloneable request to stop a running loop from another thread or a signal
/// handler. Checked before every tick.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    requested: Arc<AtomicBool>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

/// Acquire → detect → annotate → present, with a gate flag recomputed from
/// each frame's detections.
///
/// Owns the camera for its whole lifetime. The camera is released exactly
/// once: by `stop`, by an error path inside `run`, or on drop.
pub struct PerceptionLoop {
    camera: CameraGuard,
    step: PerceptionStep,
    gate: Gate,
    state: LoopState,
    stop_handle: StopHandle,
    logger: Box<dyn LoopLogger>,
}

impl PerceptionLoop {
    /// Open `source` and enter `Capturing`. A source that fails to open is
    /// released before the error is returned.
    pub fn start(
        source: Box<dyn FrameSource>,
        step: PerceptionStep,
        logger: Box<dyn LoopLogger>,
    ) -> Result<Self, CaptureError> {
        let camera = CameraGuard::acquire(source)?;
        Ok(Self {
            camera,
            step,
            gate: Gate::new(),
            state: LoopState::Capturing,
            stop_handle: StopHandle::default(),
            logger,
        })
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn gate_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop_handle.clone()
    }

    /// Release the camera and move to `Stopped`. Later calls keep the first
    /// reason.
    pub fn stop(&mut self, reason: StopReason) -> StopReason {
        if let LoopState::Stopped(first) = self.state {
            return first;
        }
        self.camera.release();
        self.gate.reset();
        self.state = LoopState::Stopped(reason);
        log::info!("Perception loop stopped: {reason:?}");
        self.logger.summary();
        reason
    }

    /// Run one cycle without presenting.
    ///
    /// A failed read is reported as [`TickOutcome::ReadFailed`] and leaves the
    /// gate alone. A failed detect or annotate pass closes the gate and is
    /// returned without stopping, so the caller decides whether to retry on
    /// the next tick.
    pub fn tick(&mut self) -> Result<TickOutcome, LoopError> {
        if let LoopState::Stopped(reason) = self.state {
            return Ok(TickOutcome::Stopped(reason));
        }
        if self.stop_handle.is_requested() {
            return Ok(TickOutcome::Stopped(self.stop(StopReason::Interrupted)));
        }

        let start = Instant::now();
        let frame = match self.camera.read() {
            Ok(frame) => frame,
            Err(CaptureError::FrameRead(reason)) => {
                log::warn!("Skipping frame: {reason}");
                self.logger.read_failure();
                return Ok(TickOutcome::ReadFailed);
            }
            Err(e) => {
                self.stop(StopReason::CaptureFailed);
                return Err(e.into());
            }
        };
        self.logger.timing("read", elapsed_ms(start));

        let start = Instant::now();
        let output = match self.step.process(&frame) {
            Ok(output) => output,
            Err(e) => {
                self.gate.reset();
                self.logger.step_failure();
                return Err(e.into());
            }
        };
        self.logger.timing("process", elapsed_ms(start));
        self.logger
            .metric("detections", output.detections.len() as f64);
        self.logger.frame();

        self.gate.update(output.detections.len());
        Ok(TickOutcome::Frame(output))
    }

    /// Blocking variant: tick, present, then poll the user until a stop
    /// condition. Frames that fail detection are skipped like failed reads.
    /// The camera is released before the presenter is closed.
    pub fn run(&mut self, presenter: &mut dyn FramePresenter) -> Result<StopReason, LoopError> {
        let result = self.drive(presenter);
        if let Err(e) = &result {
            log::error!("Perception loop failed: {e}");
            self.stop(StopReason::CaptureFailed);
        }
        presenter.close();
        result
    }

    fn drive(&mut self, presenter: &mut dyn FramePresenter) -> Result<StopReason, LoopError> {
        loop {
            match self.tick() {
                Ok(TickOutcome::Stopped(reason)) => return Ok(reason),
                Ok(TickOutcome::ReadFailed) => {}
                Ok(TickOutcome::Frame(output)) => {
                    let start = Instant::now();
                    presenter.present(&output.annotated)?;
                    self.logger.timing("present", elapsed_ms(start));
                }
                Err(LoopError::Step(e)) => log::warn!("Skipping frame: {e}"),
                Err(e) => return Err(e),
            }

            match presenter.poll()? {
                UserSignal::Continue => {}
                UserSignal::QuitKey => return Ok(self.stop(StopReason::QuitKey)),
                UserSignal::WindowClosed => return Ok(self.stop(StopReason::WindowClosed)),
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
