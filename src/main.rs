use daily_quiz_engine::{
    config::Config,
    services::{alert_service::LogAlertSink, identity_service::StaticTokenProvider},
    QuizServices,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!("Using quiz API at {}", config.api_base_url);

    let identity = Arc::new(StaticTokenProvider::new(config.id_token.clone()));
    let services = QuizServices::new(&config, identity, Arc::new(LogAlertSink))?;

    match services.daily_quiz_service.get_next_quiz_time().await {
        Ok(next) => info!(
            "Next drop {} ({}), in {}",
            next.next_drop_time_local,
            next.tz,
            next.countdown()
        ),
        Err(e) => warn!("Could not load next drop time: {}", e),
    }

    let decision = services.daily_quiz_service.can_start_quiz(true).await;
    println!("{}", serde_json::to_string_pretty(&decision)?);

    match services.attempt_service.get_today_attempt_status().await {
        Ok(status) => println!("{}", serde_json::to_string_pretty(&status)?),
        Err(e) => warn!("Could not load today's attempt: {}", e),
    }

    Ok(())
}
