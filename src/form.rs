//! The form's state: current input, inline errors and the last response.
//!
//! Edits never validate. [`Form::submit`] runs one full attempt and leaves the
//! form back in an idle display state. The attempt holds `&mut self` until it
//! resolves, so a second submit on the same form cannot start meanwhile.
use tracing::{debug, info};

use crate::submit::{self, Sender};
use crate::types::{Field, RegistrationInput, SubmissionResult, UnknownField, Upload, ValidationErrors};
use crate::validate::validate;

/// Where the last submit left the form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// Validation failed; `errors` is populated and nothing was sent.
    Invalid,
    Succeeded,
    Failed,
}

#[derive(Debug, Default)]
pub struct Form {
    input: RegistrationInput,
    errors: ValidationErrors,
    result: Option<SubmissionResult>,
    phase: Phase,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: RegistrationInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &RegistrationInput {
        &self.input
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn result(&self) -> Option<&SubmissionResult> {
        self.result.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            Field::Username => &mut self.input.username,
            Field::Email => &mut self.input.email,
            Field::Phone => &mut self.input.phone,
            Field::Password => &mut self.input.password,
        };
        *slot = value;
    }

    pub fn set_file(&mut self, file: Option<Upload>) {
        if let Some(f) = &file {
            debug!(file_name = %f.file_name, size = f.bytes.len(), "file selected");
        }
        self.input.file = file;
    }

    /// Change handler keyed by the input's `name` attribute.
    pub fn handle_input(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field: Field = name.parse()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Validate, then send if the input is clean.
    ///
    /// Errors are recomputed from scratch on every call. The stored result is
    /// only replaced when an attempt actually reaches the sender.
    pub async fn submit<S>(&mut self, sender: &S) -> Phase
    where
        S: Sender + ?Sized,
    {
        let errors = validate(&self.input);
        if !errors.is_empty() {
            info!(count = errors.len(), "registration rejected by validation");
            self.errors = errors;
            self.phase = Phase::Invalid;
            return self.phase;
        }

        self.errors = ValidationErrors::new();
        let result = submit::send_validated(&self.input, sender).await;
        self.phase = if result.is_success() {
            Phase::Succeeded
        } else {
            Phase::Failed
        };
        self.result = Some(result);
        self.phase
    }
}
