#[cfg(feature = "opencv")]
pub mod cascade_detector;
pub mod model_resolver;
pub mod onnx_yolo_detector;
