use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use iced::futures::channel::oneshot;

use facegate_core::detection::infrastructure::model_resolver;
use facegate_core::shared::constants::{YOLO_MODEL_NAME, YOLO_MODEL_URL};

/// Latest `(downloaded, total)` bytes reported by a running download.
pub type DownloadProgress = Arc<Mutex<(u64, u64)>>;

/// Resolve the YOLO model on a background thread.
///
/// The blocking download must stay off the async runtime, so resolution runs
/// on its own thread and the result comes back through a oneshot channel.
/// `progress` is updated as bytes arrive; the UI samples it on its tick.
pub async fn resolve_yolo(progress: DownloadProgress) -> Result<PathBuf, String> {
    let (tx, rx) = oneshot::channel();

    thread::spawn(move || {
        log::info!("Resolving model: {YOLO_MODEL_NAME}");
        let result = model_resolver::resolve(
            None,
            YOLO_MODEL_NAME,
            YOLO_MODEL_URL,
            Some(Box::new(move |downloaded, total| {
                if let Ok(mut p) = progress.lock() {
                    *p = (downloaded, total);
                }
            })),
        );
        let _ = tx.send(result.map_err(|e| e.to_string()));
    });

    rx.await
        .unwrap_or_else(|_| Err("Model resolver thread exited unexpectedly".into()))
}

/// Percentage for display, or `None` before the size is known.
pub fn percent(progress: &DownloadProgress) -> Option<u32> {
    let (downloaded, total) = *progress.lock().ok()?;
    (total > 0).then(|| (downloaded.min(total) * 100 / total) as u32)
}
