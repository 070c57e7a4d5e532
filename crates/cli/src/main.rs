use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

use facegate_core::annotation::domain::frame_annotator::AnnotationStyle;
use facegate_core::annotation::infrastructure::opencv_annotator::OpenCvAnnotator;
use facegate_core::capture::infrastructure::opencv_camera::OpenCvCamera;
use facegate_core::detection::domain::detection_policy::{DetectionPolicy, Selection};
use facegate_core::detection::domain::face_detector::FaceDetector;
use facegate_core::detection::infrastructure::cascade_detector::CascadeFaceDetector;
use facegate_core::detection::infrastructure::model_resolver;
use facegate_core::detection::infrastructure::onnx_yolo_detector::OnnxYoloDetector;
use facegate_core::pipeline::loop_logger::StdoutLoopLogger;
use facegate_core::pipeline::perception_loop::{PerceptionLoop, StopReason};
use facegate_core::pipeline::perception_step::PerceptionStep;
use facegate_core::presentation::infrastructure::highgui_window::HighGuiWindow;
use facegate_core::shared::constants::{
    DEFAULT_CAMERA_INDEX, DETECTION_WINDOW_TITLE, MODEL_CONFIDENCE_THRESHOLD, QUIT_KEY,
    YOLO_MODEL_NAME, YOLO_MODEL_URL,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DetectorKind {
    /// Haar cascade, every face, no confidence score.
    Cascade,
    /// YOLO face model, scored detections.
    Yolo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SelectionArg {
    All,
    Primary,
}

/// Live webcam face detection in a native window.
#[derive(Parser)]
#[command(name = "facegate-detect")]
struct Cli {
    /// Camera device index.
    #[arg(long, default_value_t = DEFAULT_CAMERA_INDEX)]
    camera: i32,

    /// Face detector backend.
    #[arg(long, value_enum, default_value = "yolo")]
    detector: DetectorKind,

    /// YOLO ONNX model file (downloaded to the cache when omitted).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Haar cascade XML file (located through OpenCV's data path when omitted).
    #[arg(long)]
    cascade: Option<PathBuf>,

    /// Confidence a detection must exceed (0.0-1.0). Defaults to 0.5 for yolo
    /// and no threshold for cascade.
    #[arg(long)]
    confidence: Option<f64>,

    /// Which detections to draw. Defaults to primary for yolo, all for cascade.
    #[arg(long, value_enum)]
    selection: Option<SelectionArg>,

    /// Draw boxes without confidence labels.
    #[arg(long)]
    no_labels: bool,

    /// Window title.
    #[arg(long, default_value = DETECTION_WINDOW_TITLE)]
    title: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let detector = build_detector(&cli)?;
    let annotator = Box::new(OpenCvAnnotator::new(annotation_style(&cli)));
    let step = PerceptionStep::new(detector, detection_policy(&cli), annotator);

    let camera = Box::new(OpenCvCamera::new(cli.camera));
    let mut perception = PerceptionLoop::start(camera, step, Box::new(StdoutLoopLogger::new()))?;

    let handle = perception.stop_handle();
    ctrlc::set_handler(move || handle.stop())?;

    let mut window = HighGuiWindow::new(&cli.title)?;
    println!("Camera opened. Press '{QUIT_KEY}' to quit...");

    let reason = perception.run(&mut window)?;
    log::info!("Stopped: {}", describe_stop(reason));
    println!("Camera closed");
    Ok(())
}

fn build_detector(cli: &Cli) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    match cli.detector {
        DetectorKind::Cascade => {
            let detector = match &cli.cascade {
                Some(path) => CascadeFaceDetector::from_file(path)?,
                None => CascadeFaceDetector::new()?,
            };
            Ok(Box::new(detector))
        }
        DetectorKind::Yolo => {
            log::info!("Resolving model: {YOLO_MODEL_NAME}");
            let model_path = model_resolver::resolve(
                cli.model.as_deref(),
                YOLO_MODEL_NAME,
                YOLO_MODEL_URL,
                Some(Box::new(download_progress)),
            )?;
            Ok(Box::new(OnnxYoloDetector::new(&model_path)?))
        }
    }
}

fn detection_policy(cli: &Cli) -> DetectionPolicy {
    let (default_threshold, default_selection) = match cli.detector {
        DetectorKind::Cascade => (None, Selection::All),
        DetectorKind::Yolo => (Some(MODEL_CONFIDENCE_THRESHOLD), Selection::Primary),
    };
    let selection = match cli.selection {
        Some(SelectionArg::All) => Selection::All,
        Some(SelectionArg::Primary) => Selection::Primary,
        None => default_selection,
    };
    DetectionPolicy::new(cli.confidence.or(default_threshold), selection)
}

fn annotation_style(cli: &Cli) -> AnnotationStyle {
    if cli.no_labels {
        AnnotationStyle::boxes_only()
    } else {
        AnnotationStyle::default()
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if cli.camera < 0 {
        return Err(format!("Camera index must be non-negative, got {}", cli.camera).into());
    }
    if let Some(confidence) = cli.confidence {
        if !(0.0..=1.0).contains(&confidence) {
            return Err(
                format!("Confidence must be between 0.0 and 1.0, got {confidence}").into(),
            );
        }
    }
    if cli.detector == DetectorKind::Cascade && cli.model.is_some() {
        return Err("--model only applies to --detector yolo".into());
    }
    if cli.detector == DetectorKind::Yolo && cli.cascade.is_some() {
        return Err("--cascade only applies to --detector cascade".into());
    }
    if let Some(path) = cli.cascade.as_ref().or(cli.model.as_ref()) {
        if !path.exists() {
            return Err(format!("File not found: {}", path.display()).into());
        }
    }
    Ok(())
}

fn describe_stop(reason: StopReason) -> &'static str {
    match reason {
        StopReason::QuitKey => "quit key pressed",
        StopReason::WindowClosed => "window closed",
        StopReason::Interrupted => "interrupted",
        StopReason::CaptureFailed => "capture failed",
        StopReason::DialogDismissed => "dialog dismissed",
        StopReason::Confirmed => "confirmed",
    }
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}
