use chrono::{DateTime, Local};

use crate::core::Countdown;

/// Simulated network delay of a submission, seconds
pub const SUBMIT_DELAY_SECS: f32 = 1.0;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("'{0}' is not an email address")]
    InvalidEmail(String),

    #[error("a submission is already in progress")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Editing,
    Submitting,
    Sent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Contact form with a simulated submission
///
/// Nothing leaves the process: a valid submit waits [`SUBMIT_DELAY_SECS`]
/// of ticks, then clears the fields and reports `Sent`.
#[derive(Debug, Clone)]
pub struct ContactForm {
    pub fields: ContactFields,
    status: FormStatus,
    delay: Countdown,
    sent_at: Option<DateTime<Local>>,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            fields: ContactFields::default(),
            status: FormStatus::Editing,
            delay: Countdown::new(SUBMIT_DELAY_SECS),
            sent_at: None,
        }
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// Local time the last submission completed
    pub fn sent_at(&self) -> Option<DateTime<Local>> {
        self.sent_at
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let f = &self.fields;
        for (name, value) in [("name", &f.name), ("email", &f.email), ("message", &f.message)] {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }
        if !is_email(f.email.trim()) {
            return Err(FormError::InvalidEmail(f.email.clone()));
        }
        Ok(())
    }

    pub fn submit(&mut self) -> Result<(), FormError> {
        if self.status == FormStatus::Submitting {
            return Err(FormError::Busy);
        }
        self.validate()?;

        self.status = FormStatus::Submitting;
        self.delay.start();
        log::info!("Submitting contact form for {}", self.fields.email.trim());
        Ok(())
    }

    /// Advance the simulated delay; returns true when the form becomes `Sent`
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.delay.tick(delta) {
            return false;
        }

        self.fields = ContactFields::default();
        self.status = FormStatus::Sent;
        self.sent_at = Some(Local::now());
        true
    }

    /// Back to an empty form ("send another")
    pub fn reset(&mut self) {
        self.delay.cancel();
        self.status = FormStatus::Editing;
    }
}

fn is_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !s.contains(' '),
        None => false,
    }
}
