//! Debounced as-you-type validation for a single field.
//!
//! Time is passed in explicitly so callers can drive the validator from any
//! event loop (or from tests) without timers or threads.

use std::fmt;
use std::time::{Duration, Instant};

use super::domain::FormField;
use super::validation::FormValidator;

type FieldCheck = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

struct Pending {
    value: String,
    due: Instant,
}

/// Cancel-and-restart debouncer around a per-field check.
pub struct LiveFieldValidator {
    field: FormField,
    delay: Duration,
    check: FieldCheck,
    pending: Option<Pending>,
    error: Option<String>,
}

impl LiveFieldValidator {
    pub fn new<F>(field: FormField, delay: Duration, check: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            field,
            delay,
            check: Box::new(check),
            pending: None,
            error: None,
        }
    }

    /// Debounce [`FormValidator::validate_field`] for `field`.
    pub fn for_field(validator: FormValidator, field: FormField, delay: Duration) -> Self {
        Self::new(field, delay, move |value| validator.validate_field(field, value))
    }

    pub fn field(&self) -> FormField {
        self.field
    }

    /// Record an edit made at `now`, restarting the delay. Blank input cancels
    /// any pending check and clears the error right away.
    pub fn edit(&mut self, value: impl Into<String>, now: Instant) {
        let value = value.into();
        if value.trim().is_empty() {
            self.pending = None;
            self.error = None;
            return;
        }

        self.pending = Some(Pending {
            value,
            due: now + self.delay,
        });
    }

    /// Run the pending check once its delay has elapsed. Returns true when a
    /// check ran during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending.take() {
            Some(pending) if now >= pending.due => {
                self.error = (self.check)(&pending.value);
                true
            }
            still_waiting => {
                self.pending = still_waiting;
                false
            }
        }
    }

    pub fn is_validating(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl fmt::Debug for LiveFieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveFieldValidator")
            .field("field", &self.field)
            .field("delay", &self.delay)
            .field("validating", &self.is_validating())
            .field("error", &self.error)
            .finish()
    }
}
