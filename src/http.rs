//! Reqwest-backed [`Sender`].
use async_trait::async_trait;
use reqwest::multipart::{Form, Part as FormPart};
use reqwest::{Client, Url};
use tracing::debug;

use crate::payload::{MultipartPayload, PartValue};
use crate::submit::{RawResponse, SendError, Sender};

pub const DEFAULT_ENDPOINT: &str = "https://www.appssquare.sa/api/submit";

/// POSTs each payload once to a fixed endpoint. No timeout and no retry.
#[derive(Clone, Debug)]
pub struct HttpSender {
    client: Client,
    endpoint: Url,
}

impl HttpSender {
    pub fn new(endpoint: Url) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    pub fn with_client(client: Client, endpoint: Url) -> Self {
        Self { client, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Sender for HttpSender {
    async fn send(&self, payload: MultipartPayload) -> Result<RawResponse, SendError> {
        let form = to_form(payload)?;
        debug!(endpoint = %self.endpoint, "posting registration");

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(transport)?;
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

fn to_form(payload: MultipartPayload) -> Result<Form, SendError> {
    payload
        .into_parts()
        .into_iter()
        .try_fold(Form::new(), |form, part| match part.value {
            PartValue::Text(text) => Ok(form.text(part.name, text)),
            PartValue::File(upload) => {
                let mut file = FormPart::bytes(upload.bytes).file_name(upload.file_name);
                if let Some(mime) = upload.mime {
                    file = file
                        .mime_str(&mime)
                        .map_err(|e| SendError::new(format!("invalid file type {mime}: {e}")))?;
                }
                Ok(form.part(part.name, file))
            }
        })
}

fn transport(e: reqwest::Error) -> SendError {
    SendError::new(e.to_string())
}
