use std::path::Path;
use std::time::Duration;

use super::PendingRadii;

#[derive(Debug)]
pub enum PersistError {
    Io(std::io::Error),
    Format(serde_json::Error),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Io(e) => write!(f, "반경 정보 파일 입출력 오류: {e}"),
            PersistError::Format(e) => write!(f, "반경 정보 형식 오류: {e}"),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<std::io::Error> for PersistError {
    fn from(e: std::io::Error) -> Self {
        PersistError::Io(e)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Format(e)
    }
}

/// Loads radii dumped by a previous run. The dump is deleted afterwards,
/// whether or not it could be read. Failures leave the map empty.
pub fn on_startup(path: &Path, ttl: Duration) -> PendingRadii {
    let pending = PendingRadii::new(ttl);
    if !path.exists() {
        return pending;
    }

    match load(path, &pending) {
        Ok(count) => tracing::info!("저장된 반경 정보 {count}개 복구: {}", path.display()),
        Err(e) => tracing::warn!("반경 정보 복구 실패: {e}"),
    }

    if let Err(e) = std::fs::remove_file(path) {
        tracing::warn!("반경 정보 파일 삭제 실패: {e}");
    }

    pending
}

/// Writes the live radii to `path` so the next run can pick them up.
/// Returns the number of entries written.
pub fn on_shutdown(path: &Path, pending: &PendingRadii) -> Result<usize, PersistError> {
    let (bytes, count) = pending.to_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(count)
}

fn load(path: &Path, pending: &PendingRadii) -> Result<usize, PersistError> {
    let bytes = std::fs::read(path)?;
    Ok(pending.restore_bytes(&bytes)?)
}
