//! Form state machine.
//!
//! `Idle -> Confirm -> Loading -> (Success | Error)`, with `Confirm -> Idle`
//! on cancel and `(Success | Error) -> Idle` on reset. Every transition is
//! driven by an explicit user action.

use settle_core::types::{SubmissionRequest, TriggerResponse};
use thiserror::Error;

use crate::api::ClientError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Confirm,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("cannot {action} while {status:?}")]
    InvalidTransition { action: &'static str, status: Status },
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}

#[derive(Debug, Clone)]
pub struct Form {
    month: u32,
    year: i64,
    status: Status,
    message: String,
}

impl Form {
    pub fn new(month: u32, year: i64) -> Result<Self, FormError> {
        if !(1..=12).contains(&month) {
            return Err(FormError::InvalidMonth(month));
        }
        Ok(Self {
            month,
            year,
            status: Status::Idle,
            message: String::new(),
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// e.g. "March 2026"
    pub fn label(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    pub fn select_month(&mut self, month: u32) -> Result<(), FormError> {
        self.expect(Status::Idle, "change the month")?;
        if !(1..=12).contains(&month) {
            return Err(FormError::InvalidMonth(month));
        }
        self.month = month;
        Ok(())
    }

    pub fn request_confirmation(&mut self) -> Result<(), FormError> {
        self.expect(Status::Idle, "ask for confirmation")?;
        self.status = Status::Confirm;
        Ok(())
    }

    pub fn cancel(&mut self) -> Result<(), FormError> {
        self.expect(Status::Confirm, "cancel")?;
        self.status = Status::Idle;
        Ok(())
    }

    /// Moves to `Loading` and hands back the request to send.
    pub fn submit(&mut self) -> Result<SubmissionRequest, FormError> {
        self.expect(Status::Confirm, "submit")?;
        self.status = Status::Loading;
        self.message.clear();
        Ok(SubmissionRequest {
            month: self.month,
            year: self.year,
        })
    }

    pub fn finish(&mut self, outcome: Result<TriggerResponse, ClientError>) -> Result<(), FormError> {
        self.expect(Status::Loading, "finish")?;
        match outcome {
            Ok(resp) => {
                let timestamp = resp.timestamp.unwrap_or_default();
                let shown = timestamp.get(..19).unwrap_or(&timestamp);
                self.status = Status::Success;
                self.message = format!("Settlement for {} sent. Timestamp: {}Z", self.label(), shown);
            }
            Err(err) => {
                self.status = Status::Error;
                self.message = err.to_string();
            }
        }
        Ok(())
    }

    pub fn reset(&mut self) -> Result<(), FormError> {
        if !matches!(self.status, Status::Success | Status::Error) {
            return Err(FormError::InvalidTransition {
                action: "reset",
                status: self.status,
            });
        }
        self.status = Status::Idle;
        self.message.clear();
        Ok(())
    }

    fn expect(&self, status: Status, action: &'static str) -> Result<(), FormError> {
        if self.status == status {
            Ok(())
        } else {
            Err(FormError::InvalidTransition {
                action,
                status: self.status,
            })
        }
    }
}

pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}
