//! Polling of asynchronous deletions.
//!
//! Resource group deletion answers `202 Accepted` with a `Location` URL.
//! Polling that URL keeps returning 202 while the deletion runs; 200, 204
//! or 404 means it finished.

use super::{ApiError, ArmClient, send};

/// A deletion that was accepted and is running server side
#[derive(Debug, Clone)]
pub struct PendingDeletion {
    /// Name of the resource group being deleted
    pub name: String,
    /// The `Location` URL to poll
    pub poll_url: String,
}

impl ArmClient {
    /// One poll of a pending deletion. `true` means finished.
    pub fn deletion_finished(&self, pending: &PendingDeletion) -> Result<bool, ApiError> {
        match send(self.request_absolute("GET", &pending.poll_url)) {
            Ok(response) => Ok(response.status() != 202),
            Err(err) if err.is_not_found() => Ok(true),
            Err(err) => Err(err),
        }
    }
}
