use std::path::PathBuf;

use thiserror::Error;

/// File IO failures around the draft and the transcript. The engine itself
/// has no failure modes.
#[derive(Debug, Error)]
pub enum VichatError {
    #[error("cannot load draft from '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot append to transcript '{}': {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },
}
