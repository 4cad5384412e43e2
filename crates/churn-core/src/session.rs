//! Submission state machine.
//!
//! A session holds one input mode at a time. Input is staged first and only
//! scored on an explicit [`Session::submit`]:
//!
//! ```text
//! Idle -> AwaitingSubmit -> Predicting -> ResultShown
//!                                     \-> ErrorShown
//! ```
//!
//! From `ResultShown` or `ErrorShown` a new input can be staged. Switching the
//! mode discards everything and returns to `Idle`.

use std::fmt;

use churn_ingest::Upload;
use churn_model::CustomerRecord;
use churn_predict::ChurnPredictor;
use tracing::{debug, warn};

use crate::bulk::{BulkAdapter, BulkOutcome};
use crate::error::{CoreError, Result};
use crate::manual::{ManualAdapter, ManualOutcome};
use crate::message::ResultMessage;

/// Where the customer data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Manual,
    Upload,
}

impl InputMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Upload => "Upload File (CSV/XLSX)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    AwaitingSubmit,
    Predicting,
    ResultShown,
    ErrorShown,
}

impl SessionState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingSubmit => "awaiting submit",
            Self::Predicting => "predicting",
            Self::ResultShown => "showing a result",
            Self::ErrorShown => "showing an error",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input waiting for submission.
#[derive(Debug, Clone)]
pub enum StagedInput {
    Manual(CustomerRecord),
    Upload(Upload),
}

/// Result of the last successful submission.
#[derive(Debug, Clone)]
pub enum Outcome {
    Manual(ManualOutcome),
    Bulk(BulkOutcome),
}

impl Outcome {
    pub fn as_manual(&self) -> Option<&ManualOutcome> {
        match self {
            Self::Manual(outcome) => Some(outcome),
            Self::Bulk(_) => None,
        }
    }

    pub fn as_bulk(&self) -> Option<&BulkOutcome> {
        match self {
            Self::Bulk(outcome) => Some(outcome),
            Self::Manual(_) => None,
        }
    }

    pub fn message(&self) -> &ResultMessage {
        match self {
            Self::Manual(outcome) => &outcome.message,
            Self::Bulk(outcome) => &outcome.message,
        }
    }
}

/// One user's interaction with a shared predictor.
pub struct Session<'a, P: ChurnPredictor + ?Sized> {
    predictor: &'a P,
    mode: InputMode,
    state: SessionState,
    staged: Option<StagedInput>,
    outcome: Option<Outcome>,
    message: Option<ResultMessage>,
}

impl<'a, P: ChurnPredictor + ?Sized> Session<'a, P> {
    pub fn new(predictor: &'a P, mode: InputMode) -> Self {
        Self {
            predictor,
            mode,
            state: SessionState::Idle,
            staged: None,
            outcome: None,
            message: None,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn staged(&self) -> Option<&StagedInput> {
        self.staged.as_ref()
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Message to display for the current state, if any.
    pub fn message(&self) -> Option<&ResultMessage> {
        self.message.as_ref()
    }

    /// Change the input mode, discarding staged input and shown results.
    pub fn switch_mode(&mut self, mode: InputMode) {
        debug!(from = self.mode.as_str(), to = mode.as_str(), "input mode switched");
        self.mode = mode;
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.staged = None;
        self.outcome = None;
        self.message = None;
    }

    /// Stage form input. Replaces anything staged before.
    pub fn stage_manual(&mut self, record: CustomerRecord) -> Result<()> {
        self.stage(InputMode::Manual, StagedInput::Manual(record), "stage form input")
    }

    /// Stage a parsed upload. Replaces anything staged before.
    pub fn stage_upload(&mut self, upload: Upload) -> Result<()> {
        self.stage(InputMode::Upload, StagedInput::Upload(upload), "stage an upload")
    }

    fn stage(&mut self, mode: InputMode, input: StagedInput, action: &'static str) -> Result<()> {
        if self.mode != mode || self.state == SessionState::Predicting {
            return Err(CoreError::InvalidTransition {
                state: self.state,
                action,
            });
        }
        self.staged = Some(input);
        self.outcome = None;
        self.message = None;
        self.state = SessionState::AwaitingSubmit;
        Ok(())
    }

    /// Score the staged input.
    ///
    /// On failure the session moves to `ErrorShown`, keeps an error message
    /// for display, and returns the error.
    pub fn submit(&mut self) -> Result<&Outcome> {
        if self.state != SessionState::AwaitingSubmit {
            return Err(CoreError::InvalidTransition {
                state: self.state,
                action: "submit",
            });
        }
        let Some(input) = self.staged.take() else {
            return Err(CoreError::InvalidTransition {
                state: self.state,
                action: "submit",
            });
        };

        self.state = SessionState::Predicting;
        let result = match input {
            StagedInput::Manual(record) => ManualAdapter::new(self.predictor)
                .predict(record)
                .map(Outcome::Manual),
            StagedInput::Upload(upload) => BulkAdapter::new(self.predictor)
                .predict(&upload)
                .map(Outcome::Bulk),
        };

        match result {
            Ok(outcome) => {
                self.state = SessionState::ResultShown;
                self.message = Some(outcome.message().clone());
                Ok(self.outcome.insert(outcome))
            }
            Err(err) => {
                warn!(category = %err.category(), error = %err, "prediction failed");
                self.state = SessionState::ErrorShown;
                self.message = Some(ResultMessage::for_error(&err));
                Err(err)
            }
        }
    }
}
