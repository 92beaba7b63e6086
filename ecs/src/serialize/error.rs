use thiserror::Error;

/// Failure exits of the scene serializer.
///
/// These are the only hard failures — everything else (malformed UUID
/// keys, missing fields, unloadable assets) is recovered locally with a
/// log line. An I/O or parse failure leaves the scene untouched.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("scene file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("scene document error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("scene document root is not an object")]
    InvalidRoot,
}
