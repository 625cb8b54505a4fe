use std::path::{Path, PathBuf};

use clap::Parser;
use url::Url;

use crate::http::DEFAULT_ENDPOINT;
use crate::types::{RegistrationInput, Upload};

/// Fill in the registration form and submit it once.
#[derive(Debug, Parser)]
#[command(name = "signup-form", version)]
pub struct Config {
    /// Where the multipart form is POSTed.
    #[arg(long, env = "SIGNUP_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: Url,

    #[arg(long, default_value = "")]
    pub username: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, env = "SIGNUP_PASSWORD", default_value = "", hide_env_values = true)]
    pub password: String,

    /// Image to attach as the `image` part.
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// MIME type of `--file`. Never guessed; without it the part has no type.
    #[arg(long, requires = "file")]
    pub file_type: Option<String>,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Config {
    /// Build the form input, reading `--file` from disk if given.
    pub async fn load_input(&self) -> Result<RegistrationInput, ConfigError> {
        let file = match &self.file {
            Some(path) => Some(read_upload(path, self.file_type.clone()).await?),
            None => None,
        };
        Ok(RegistrationInput {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            phone: self.phone.clone(),
            file,
        })
    }
}

async fn read_upload(path: &Path, mime: Option<String>) -> Result<Upload, ConfigError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_owned());
    Ok(Upload {
        file_name,
        mime,
        bytes,
    })
}
