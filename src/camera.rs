//! Camera acquisition as a scoped lease.
//!
//! Holding a [`CameraLease`] means the device is open; dropping it releases
//! the device on every exit path.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{log_camera_error, CameraError};

/// Video source collaborator
pub trait CameraSource: Send {
    fn acquire(&mut self) -> Result<(), CameraError>;
    fn release(&mut self);
}

pub struct CameraLease {
    source: Box<dyn CameraSource>,
}

impl CameraLease {
    pub fn acquire(mut source: Box<dyn CameraSource>) -> Result<Self, CameraError> {
        if let Err(err) = source.acquire() {
            log_camera_error(&err, "CameraLease::acquire");
            return Err(err);
        }
        tracing::info!("[Camera] acquired");
        Ok(Self { source })
    }
}

impl Drop for CameraLease {
    fn drop(&mut self) {
        self.source.release();
        tracing::info!("[Camera] released");
    }
}

/// Camera stand-in for the CLI and tests.
///
/// Shares its `active` flag so callers can observe release after the lease
/// is gone.
pub struct StubCamera {
    active: Arc<AtomicBool>,
    failure: Option<CameraError>,
}

impl StubCamera {
    pub fn new() -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            failure: None,
        }
    }

    /// A camera whose acquisition always fails with `err`
    pub fn failing(err: CameraError) -> Self {
        Self {
            active: Arc::new(AtomicBool::new(false)),
            failure: Some(err),
        }
    }

    pub fn active_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.active)
    }
}

impl Default for StubCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraSource for StubCamera {
    fn acquire(&mut self) -> Result<(), CameraError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if self.active.swap(true, Ordering::SeqCst) {
            return Err(CameraError::AcquisitionFailed {
                details: "device already in use".to_string(),
            });
        }
        Ok(())
    }

    fn release(&mut self) {
        self.active.store(false, Ordering::SeqCst);
    }
}
