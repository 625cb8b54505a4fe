// src/main.rs
use clap::Parser;
use signup_form::config::Config;
use signup_form::display::render;
use signup_form::{Form, HttpSender, Phase};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    tracing_subscriber::fmt()
        .with_env_filter(config.log.as_str())
        .init();

    let input = config.load_input().await?;
    let sender = HttpSender::new(config.endpoint.clone());
    info!("submitting registration to {}", sender.endpoint());

    let mut form = Form::with_input(input);
    let phase = form.submit(&sender).await;
    print!("{}", render(&form));

    match phase {
        Phase::Succeeded => Ok(()),
        Phase::Invalid => anyhow::bail!("registration is invalid"),
        Phase::Failed => anyhow::bail!("registration was not accepted"),
        Phase::Idle => Ok(()),
    }
}
