//! Client side of a registration form: field validation and a single
//! multipart submission to a remote endpoint.
pub mod config;
pub mod display;
pub mod form;
pub mod http;
pub mod payload;
pub mod submit;
pub mod types;
pub mod validate;

pub use form::{Form, Phase};
pub use http::HttpSender;
pub use submit::{submit, RawResponse, SendError, Sender, SubmissionError};
pub use types::{Field, RegistrationInput, SubmissionResult, Upload, ValidationErrors};
pub use validate::validate;
