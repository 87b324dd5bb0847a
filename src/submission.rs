//! Request-in-flight state for form submissions

use std::fmt::Display;

use crate::error::{FolioError, Result};

/// Lifecycle of one form's submissions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionState {
    pub fn is_busy(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Enter `Submitting`; refuses while a submission is already in flight
    pub fn begin(&mut self) -> Result<()> {
        if self.is_busy() {
            return Err(FolioError::Busy);
        }
        *self = SubmissionState::Submitting;
        Ok(())
    }

    /// Record the outcome of the in-flight submission
    pub fn finish<T, E: Display>(&mut self, result: &std::result::Result<T, E>) {
        *self = match result {
            Ok(_) => SubmissionState::Succeeded,
            Err(e) => SubmissionState::Failed(e.to_string()),
        };
    }

    /// Run `f` as one guarded submission
    pub fn run<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        self.begin()?;
        let result = f();
        self.finish(&result);
        result
    }
}
