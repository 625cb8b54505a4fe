//! Send a validated registration and reconcile the response.
use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::payload::MultipartPayload;
use crate::types::{RegistrationInput, SubmissionResult, ValidationErrors};

/// Status line and body as the transport received them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SendError {
    message: String,
}

impl SendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Performs the actual POST of a multipart payload.
#[async_trait]
pub trait Sender: Send + Sync {
    async fn send(&self, payload: MultipartPayload) -> Result<RawResponse, SendError>;
}

#[async_trait]
impl<S: Sender + ?Sized> Sender for &S {
    async fn send(&self, payload: MultipartPayload) -> Result<RawResponse, SendError> {
        (**self).send(payload).await
    }
}

#[async_trait]
impl<S: Sender + ?Sized> Sender for Box<S> {
    async fn send(&self, payload: MultipartPayload) -> Result<RawResponse, SendError> {
        (**self).send(payload).await
    }
}

/// Why an attempt failed. `Display` is the text shown in the response area.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Decode(String),
}

/// Send `input` unless `errors` says it is invalid.
///
/// Returns `None`, without touching `sender`, when `errors` is non-empty. Any
/// failure after that point comes back as [`SubmissionResult::Failure`].
pub async fn submit<S>(
    input: &RegistrationInput,
    errors: &ValidationErrors,
    sender: &S,
) -> Option<SubmissionResult>
where
    S: Sender + ?Sized,
{
    if !errors.is_empty() {
        return None;
    }
    Some(send_validated(input, sender).await)
}

/// One attempt for input that already passed validation.
#[tracing::instrument(skip_all, fields(attempt = %Uuid::new_v4()))]
pub(crate) async fn send_validated<S>(input: &RegistrationInput, sender: &S) -> SubmissionResult
where
    S: Sender + ?Sized,
{
    let payload = MultipartPayload::from(input);
    match exchange(sender, payload).await {
        Ok(body) => {
            info!("Success: {body}");
            SubmissionResult::Success(body)
        }
        Err(e) => {
            error!("Error: {e}");
            SubmissionResult::Failure(e)
        }
    }
}

async fn exchange<S>(sender: &S, payload: MultipartPayload) -> Result<Value, SubmissionError>
where
    S: Sender + ?Sized,
{
    let response = sender
        .send(payload)
        .await
        .map_err(|e| SubmissionError::Transport(e.to_string()))?;
    if !response.is_success() {
        return Err(SubmissionError::Status(response.status));
    }
    serde_json::from_slice(&response.body).map_err(|e| SubmissionError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Field;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct SpySender {
        reply: Result<RawResponse, SendError>,
        calls: AtomicUsize,
        last: Mutex<Option<MultipartPayload>>,
    }

    impl SpySender {
        fn replying(status: u16, body: &str) -> Self {
            Self::with(Ok(RawResponse {
                status,
                body: body.as_bytes().to_vec(),
            }))
        }

        fn with(reply: Result<RawResponse, SendError>) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Sender for SpySender {
        async fn send(&self, payload: MultipartPayload) -> Result<RawResponse, SendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().expect("spy lock") = Some(payload);
            self.reply.clone()
        }
    }

    #[fixture]
    fn input() -> RegistrationInput {
        RegistrationInput {
            username: "bob".into(),
            email: "bob@x.com".into(),
            password: "secret1".into(),
            phone: "+1-555-123-4567".into(),
            file: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn ok_json_body_is_success(input: RegistrationInput) {
        let spy = SpySender::replying(200, r#"{"id":1}"#);
        let result = submit(&input, &ValidationErrors::new(), &spy).await;
        assert_eq!(result, Some(SubmissionResult::Success(json!({"id": 1}))));
        assert_eq!(spy.calls(), 1);

        let sent = spy.last.lock().expect("spy lock").clone().expect("payload sent");
        assert_eq!(sent.get_text("name"), Some("bob"));
        assert_eq!(sent.get_text("phone"), Some("+1-555-123-4567"));
    }

    #[rstest]
    #[case(500)]
    #[case(404)]
    #[case(302)]
    #[case(199)]
    #[tokio::test]
    async fn non_2xx_is_status_failure(input: RegistrationInput, #[case] status: u16) {
        let spy = SpySender::replying(status, r#"{"id":1}"#);
        let result = submit(&input, &ValidationErrors::new(), &spy).await;
        let Some(SubmissionResult::Failure(err)) = result else {
            panic!("expected failure, got {result:?}");
        };
        assert_eq!(err, SubmissionError::Status(status));
        assert_eq!(err.to_string(), format!("HTTP error! status: {status}"));
    }

    #[rstest]
    #[tokio::test]
    async fn status_500_message_is_literal(input: RegistrationInput) {
        let spy = SpySender::replying(500, "oops");
        let result = submit(&input, &ValidationErrors::new(), &spy).await;
        match result {
            Some(SubmissionResult::Failure(e)) => assert_eq!(e.to_string(), "HTTP error! status: 500"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_body_is_decode_failure(input: RegistrationInput) {
        let spy = SpySender::replying(201, "<html>");
        let result = submit(&input, &ValidationErrors::new(), &spy).await;
        assert!(matches!(
            result,
            Some(SubmissionResult::Failure(SubmissionError::Decode(_)))
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn transport_error_is_caught(input: RegistrationInput) {
        let spy = SpySender::with(Err(SendError::new("connection refused")));
        let result = submit(&input, &ValidationErrors::new(), &spy).await;
        assert_eq!(
            result,
            Some(SubmissionResult::Failure(SubmissionError::Transport(
                "connection refused".into()
            )))
        );
    }

    #[rstest]
    #[tokio::test]
    async fn errors_block_the_sender(input: RegistrationInput) {
        let spy = SpySender::replying(200, "{}");
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Email, "Invalid email format");

        assert_eq!(submit(&input, &errors, &spy).await, None);
        assert_eq!(spy.calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn works_through_a_trait_object(input: RegistrationInput) {
        let boxed: Box<dyn Sender> = Box::new(SpySender::replying(200, "[1,2]"));
        let result = submit(&input, &ValidationErrors::new(), &boxed).await;
        assert_eq!(result, Some(SubmissionResult::Success(json!([1, 2]))));
    }
}
