//! Transport-neutral multipart body.
use crate::types::{RegistrationInput, Upload};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(Upload),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub value: PartValue,
}

/// Ordered named parts of one form submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, upload: Upload) -> Self {
        self.parts.push(Part {
            name: name.into(),
            value: PartValue::File(upload),
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    pub fn get_text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::Text(v) if p.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    pub fn get_file(&self, name: &str) -> Option<&Upload> {
        self.parts.iter().find_map(|p| match &p.value {
            PartValue::File(u) if p.name == name => Some(u),
            _ => None,
        })
    }
}

/// The username goes out as `name`; the picked file, if any, as `image`.
impl From<&RegistrationInput> for MultipartPayload {
    fn from(input: &RegistrationInput) -> Self {
        let payload = MultipartPayload::new()
            .text("name", input.username.as_str())
            .text("email", input.email.as_str())
            .text("password", input.password.as_str())
            .text("phone", input.phone.as_str());
        match &input.file {
            Some(upload) => payload.file("image", upload.clone()),
            None => payload,
        }
    }
}
