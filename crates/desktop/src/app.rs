use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use iced::widget::image;
use iced::{window, Element, Subscription, Task, Theme};

use facegate_core::annotation::domain::frame_annotator::AnnotationStyle;
use facegate_core::detection::domain::detection_policy::{DetectionPolicy, Selection};
use facegate_core::pipeline::loop_logger::NullLoopLogger;
use facegate_core::pipeline::perception_loop::{
    LoopError, LoopState, PerceptionLoop, StopReason, TickOutcome,
};
use facegate_core::pipeline::perception_step::PerceptionStep;
use facegate_core::shared::constants::TICK_INTERVAL;
use facegate_core::shared::frame::Frame;
use facegate_core::transaction::domain::transaction_form::TransactionForm;
use facegate_core::transaction::domain::transaction_request::{
    DestinationAccount, TransactionKind,
};

use crate::backend::{CaptureBackend, OpenCvBackend};
use crate::screens;
use crate::settings::{Appearance, Detector, Settings};
use crate::theme;
use crate::workers::model_worker::{self, DownloadProgress};

const AUTH_TITLE: &str = "Facegate - Face Authentication";
const TRANSACTIONS_TITLE: &str = "Facegate - Transactions";

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Authentication,
    Settings,
    Transactions,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    ModelResolved(Result<PathBuf, String>),
    ConfirmHovered(bool),
    Confirm,
    OpenSettings,
    CloseSettings,
    CameraIndexChanged(u32),
    DetectorChanged(Detector),
    ConfidenceChanged(u32),
    AppearanceChanged(Appearance),
    HighContrastChanged(bool),
    FontScaleChanged(f32),
    RestoreDefaults,
    KindSelected(TransactionKind),
    AmountChanged(String),
    AccountSelected(DestinationAccount),
    SubmitHovered(bool),
    Submit,
    DialogClosed,
    CloseRequested(window::Id),
    Exit,
    PollSystemTheme,
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Capture settings the running loop was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CaptureConfig {
    camera_index: u32,
    detector: Detector,
    confidence: u32,
}

impl CaptureConfig {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            camera_index: settings.camera_index,
            detector: settings.detector,
            confidence: settings.confidence,
        }
    }
}

pub struct App {
    screen: Screen,
    pub settings: Settings,
    perception: Option<PerceptionLoop>,
    applied: Option<CaptureConfig>,
    preview: Option<image::Handle>,
    model_path: Option<PathBuf>,
    download: DownloadProgress,
    loading_model: bool,
    startup_error: Option<String>,
    form: TransactionForm,
    confirm_hovered: bool,
    submit_hovered: bool,
    backend: Box<dyn CaptureBackend>,
}

impl App {
    pub fn new() -> (Self, Task<Message>) {
        Self::with_backend(Settings::load(), Box::new(OpenCvBackend))
    }

    pub fn with_backend(
        settings: Settings,
        backend: Box<dyn CaptureBackend>,
    ) -> (Self, Task<Message>) {
        let mut app = Self {
            screen: Screen::Authentication,
            settings,
            perception: None,
            applied: None,
            preview: None,
            model_path: None,
            download: Arc::new(Mutex::new((0, 0))),
            loading_model: false,
            startup_error: None,
            form: TransactionForm::new(),
            confirm_hovered: false,
            submit_hovered: false,
            backend,
        };
        let task = app.start_capture();
        (app, task)
    }

    pub fn title(&self) -> String {
        match self.screen {
            Screen::Authentication | Screen::Settings => AUTH_TITLE.to_string(),
            Screen::Transactions => TRANSACTIONS_TITLE.to_string(),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => return self.tick(),
            Message::ModelResolved(Ok(path)) => {
                self.loading_model = false;
                self.model_path = Some(path);
                if self.awaiting_model() {
                    return self.start_capture();
                }
            }
            Message::ModelResolved(Err(e)) => {
                self.loading_model = false;
                if self.awaiting_model() {
                    return self
                        .fail(format!("Could not load the face detection model.\n\n{e}"));
                }
                log::warn!("Face detection model unavailable: {e}");
            }
            Message::ConfirmHovered(hovered) => {
                self.confirm_hovered = hovered;
            }
            Message::Confirm => {
                if self.gate_enabled() {
                    self.stop_capture(StopReason::Confirmed);
                    self.screen = Screen::Transactions;
                }
            }
            Message::OpenSettings => {
                self.screen = Screen::Settings;
            }
            Message::CloseSettings => {
                self.screen = Screen::Authentication;
                if self.applied != Some(CaptureConfig::from_settings(&self.settings)) {
                    self.preview = None;
                    return self.start_capture();
                }
            }
            Message::CameraIndexChanged(index) => {
                self.settings.camera_index = index;
                self.settings.save();
            }
            Message::DetectorChanged(detector) => {
                self.settings.detector = detector;
                self.settings.save();
            }
            Message::ConfidenceChanged(val) => {
                self.settings.confidence = val;
                self.settings.save();
            }
            Message::AppearanceChanged(appearance) => {
                self.settings.appearance = appearance;
                self.settings.save();
            }
            Message::HighContrastChanged(enabled) => {
                self.settings.high_contrast = enabled;
                self.settings.save();
            }
            Message::FontScaleChanged(scale) => {
                self.settings.font_scale = scale;
                self.settings.save();
            }
            Message::RestoreDefaults => {
                self.settings = Settings::default();
                self.settings.save();
            }
            Message::KindSelected(kind) => {
                self.form.kind = kind;
            }
            Message::AmountChanged(value) => {
                self.form.amount_input = value;
            }
            Message::AccountSelected(account) => {
                self.form.destination = account;
            }
            Message::SubmitHovered(hovered) => {
                self.submit_hovered = hovered;
            }
            Message::Submit => {
                return match self.form.submit() {
                    Ok(request) => show_dialog(
                        rfd::MessageLevel::Info,
                        "Success",
                        request.confirmation_message(),
                        Message::DialogClosed,
                    ),
                    Err(e) => show_dialog(
                        rfd::MessageLevel::Warning,
                        "Error",
                        e.to_string(),
                        Message::DialogClosed,
                    ),
                };
            }
            Message::DialogClosed => {}
            Message::CloseRequested(_) | Message::Exit => {
                self.stop_capture(StopReason::DialogDismissed);
                return iced::exit();
            }
            Message::PollSystemTheme => {
                // Theme is resolved fresh in theme() on every render,
                // so just requesting a redraw is enough.
            }
        }
        Task::none()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let fs = self.settings.font_scale;
        match self.screen {
            Screen::Authentication => screens::auth_screen::view(
                fs,
                self.preview.as_ref(),
                self.status_line(),
                self.gate_enabled(),
                self.confirm_hovered,
            ),
            Screen::Settings => screens::settings_screen::view(&self.settings),
            Screen::Transactions => {
                screens::transaction_screen::view(fs, &self.form, self.submit_hovered)
            }
        }
    }

    pub fn theme(&self) -> Theme {
        theme::resolve_theme(self.settings.appearance, self.settings.high_contrast)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![window::close_requests().map(Message::CloseRequested)];
        let capturing = self.perception.is_some() || self.loading_model;
        if self.screen == Screen::Authentication && capturing {
            subscriptions.push(iced::time::every(TICK_INTERVAL).map(|_| Message::Tick));
        }
        if self.settings.appearance == Appearance::System {
            subscriptions
                .push(iced::time::every(Duration::from_secs(2)).map(|_| Message::PollSystemTheme));
        }
        Subscription::batch(subscriptions)
    }

    fn loop_state(&self) -> LoopState {
        self.perception
            .as_ref()
            .map_or(LoopState::Idle, PerceptionLoop::state)
    }

    fn gate_enabled(&self) -> bool {
        self.perception
            .as_ref()
            .is_some_and(PerceptionLoop::gate_enabled)
    }

    fn status_line(&self) -> String {
        if let Some(error) = &self.startup_error {
            return error.clone();
        }
        if self.loading_model && self.perception.is_none() {
            return match model_worker::percent(&self.download) {
                Some(pct) => format!("Downloading face detection model... {pct}%"),
                None => "Loading face detection model...".to_string(),
            };
        }
        match self.loop_state() {
            LoopState::Idle => "Starting camera...".to_string(),
            LoopState::Capturing if self.gate_enabled() => {
                "Face detected. You can confirm your identity.".to_string()
            }
            LoopState::Capturing => "Look at the camera to continue.".to_string(),
            LoopState::Stopped(_) => "Camera stopped.".to_string(),
        }
    }

    /// Whether the authentication screen is waiting on the model before it
    /// can open the camera.
    fn awaiting_model(&self) -> bool {
        self.screen == Screen::Authentication
            && self.perception.is_none()
            && self.settings.detector == Detector::Yolo
    }

    /// Open the camera with the current settings, resolving the model first
    /// when the YOLO detector is selected.
    ///
    /// Any running loop is dropped, releasing its camera, before the new one
    /// opens.
    fn start_capture(&mut self) -> Task<Message> {
        self.perception = None;

        if self.settings.detector == Detector::Yolo && self.model_path.is_none() {
            if self.loading_model {
                return Task::none();
            }
            self.loading_model = true;
            return Task::perform(
                model_worker::resolve_yolo(self.download.clone()),
                Message::ModelResolved,
            );
        }

        let detector = match self
            .backend
            .detector(self.settings.detector, self.model_path.as_deref())
        {
            Ok(detector) => detector,
            Err(e) => {
                return self.fail(format!("Could not load the face detector.\n\n{e}"));
            }
        };
        let (policy, style) = match self.settings.detector {
            Detector::Cascade => (DetectionPolicy::cascade(), AnnotationStyle::boxes_only()),
            Detector::Yolo => (
                DetectionPolicy::new(
                    Some(self.settings.confidence_threshold()),
                    Selection::Primary,
                ),
                AnnotationStyle::default(),
            ),
        };
        let step = PerceptionStep::new(detector, policy, self.backend.annotator(style));

        let camera = self.backend.camera(self.settings.camera_index);
        match PerceptionLoop::start(camera, step, Box::new(NullLoopLogger)) {
            Ok(perception) => {
                self.perception = Some(perception);
                self.applied = Some(CaptureConfig::from_settings(&self.settings));
                Task::none()
            }
            Err(e) => self.fail(format!("Could not access the camera.\n\n{e}")),
        }
    }

    fn tick(&mut self) -> Task<Message> {
        let Some(perception) = self.perception.as_mut() else {
            return Task::none();
        };
        match perception.tick() {
            Ok(TickOutcome::Frame(output)) => {
                self.preview = Some(to_image_handle(&output.annotated));
            }
            Ok(TickOutcome::ReadFailed) | Ok(TickOutcome::Stopped(_)) => {}
            Err(LoopError::Step(e)) => {
                log::warn!("Skipping frame, keeping previous preview: {e}");
            }
            Err(e) => {
                self.perception = None;
                return self.fail(format!("The camera stopped responding.\n\n{e}"));
            }
        }
        Task::none()
    }

    fn stop_capture(&mut self, reason: StopReason) {
        if let Some(mut perception) = self.perception.take() {
            perception.stop(reason);
        }
        self.preview = None;
    }

    /// Report a fatal startup error, then exit once the dialog is dismissed.
    fn fail(&mut self, message: String) -> Task<Message> {
        log::error!("{message}");
        self.startup_error = Some(message.clone());
        show_dialog(rfd::MessageLevel::Error, "Error", message, Message::Exit)
    }
}

fn to_image_handle(frame: &Frame) -> image::Handle {
    image::Handle::from_rgba(frame.width(), frame.height(), frame.to_rgba())
}

fn show_dialog(
    level: rfd::MessageLevel,
    title: &str,
    description: String,
    then: Message,
) -> Task<Message> {
    let dialog = rfd::AsyncMessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(rfd::MessageButtons::Ok);
    Task::perform(
        async move {
            dialog.show().await;
        },
        move |_| then.clone(),
    )
}

/// Scale a base font size by the user's font_scale setting.
pub fn scaled(base: f32, font_scale: f32) -> f32 {
    (base * font_scale).round()
}
