//! Plain-text rendering of the form's inline errors and response area.
use std::fmt::Write;

use serde_json::Value;

use crate::form::Form;
use crate::types::{Field, SubmissionResult, ValidationErrors};

/// One `field: message` line per error, in field order.
pub fn render_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for field in Field::ALL {
        if let Some(msg) = errors.get(field) {
            let _ = writeln!(out, "{field}: {msg}");
        }
    }
    out
}

/// Text for the response area. Success and failure share the same slot.
pub fn render_result(result: &SubmissionResult) -> String {
    match result {
        // bare strings show without quotes
        SubmissionResult::Success(Value::String(s)) => s.clone(),
        SubmissionResult::Success(body) => body.to_string(),
        SubmissionResult::Failure(e) => e.to_string(),
    }
}

pub fn render(form: &Form) -> String {
    let mut out = render_errors(form.errors());
    if let Some(result) = form.result() {
        out.push_str(&render_result(result));
        out.push('\n');
    }
    out
}
