use anyhow::{Context, Result};
use slugsmith::application::{
    commands::records::CreateRecordCommand,
    error::ApplicationError,
    ports::{ClockPort, DigitSourcePort},
    services::{ApplicationServices, declare_schema},
    slugs::SuffixPolicy,
};
use slugsmith::config::{AppConfig, PolicyKind};
use slugsmith::domain::record::RecordStore;
use slugsmith::infrastructure::{
    database,
    repositories::SqliteRecordStore,
    util::{SystemClock, ThreadRngDigits},
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let titles: Vec<String> = std::env::args().skip(1).collect();

    let pool = database::init_pool(config.database_url(), config.max_connections())
        .await
        .with_context(|| format!("opening {}", config.database_url()))?;
    let pool = Arc::new(pool);

    let source = config.slug_options().source_field().to_string();
    let (schema, generator) = declare_schema(config.slug_options().clone())?;

    let sqlite = SqliteRecordStore::new(Arc::clone(&pool));
    sqlite.ensure_schema(&schema).await?;
    let store: Arc<dyn RecordStore> = Arc::new(sqlite);

    let policy = match config.policy() {
        PolicyKind::Random => {
            let digits: Arc<DigitSourcePort> = Arc::new(ThreadRngDigits);
            SuffixPolicy::RandomDigit(digits)
        }
        PolicyKind::Sequential => SuffixPolicy::Sequential,
    };
    let clock: Arc<ClockPort> = Arc::new(SystemClock);

    let services = ApplicationServices::new(
        store,
        generator,
        policy,
        config.retry_budget(),
        clock,
    );
    tracing::info!(
        policy = services.resolver().policy().name(),
        count = titles.len(),
        "creating records"
    );

    for title in titles {
        let command = CreateRecordCommand::builder()
            .field(source.as_str(), title)
            .build()
            .map_err(ApplicationError::validation)?;
        let created = services.record_commands.create_record(command).await?;
        println!("{}", serde_json::to_string(&created)?);
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}
