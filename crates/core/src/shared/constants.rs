use std::time::Duration;

pub const YOLO_MODEL_NAME: &str = "yolov8n-face-lindevs.onnx";
pub const YOLO_MODEL_URL: &str =
    "https://github.com/lindevs/yolov8-face/releases/latest/download/yolov8n-face-lindevs.onnx";

/// Frontal-face Haar cascade, looked up through OpenCV's sample-data search path.
pub const CASCADE_FILE: &str = "haarcascades/haarcascade_frontalface_default.xml";

/// Camera opened when none is configured.
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Confidence a model detection must strictly exceed to be drawn.
pub const MODEL_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Period of the GUI perception tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

pub const DETECTION_WINDOW_TITLE: &str = "Face Detection";

/// Key that closes the native detection window.
pub const QUIT_KEY: char = 'q';
