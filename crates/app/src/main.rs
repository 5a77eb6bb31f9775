use std::sync::Arc;

use clap::Parser;
use engine::Storage;
use migration::{Migrator, MigratorTrait};
use settings::Database;

mod settings;

#[derive(Debug, Parser)]
#[command(name = "gastos", about = "Conversational expense tracker")]
struct Args {
    /// Settings file, with or without extension.
    #[arg(long, default_value = settings::DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    let settings = settings::Settings::new(&args.config)?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "gastos={level},telegram_bot={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.database).await?;
    let store: Arc<dyn Storage> = Arc::new(engine::Store::builder().database(db).build().await?);

    let health = settings.health;
    tasks.spawn(async move {
        server::run(&health.bind, health.port).await;
    });

    if let Some(telegram) = settings.telegram {
        tracing::info!("Found telegram settings...");
        let bot = telegram_bot::Bot::builder()
            .token(&telegram.token)
            .allowed_users(&telegram.allowed_users)
            .storage(store)
            .timezone(telegram.timezone()?)
            .currency(telegram.currency()?)
            .build()?;
        tasks.spawn(async move { bot.run().await });
    } else {
        tracing::warn!("No telegram settings, only the health endpoint is served");
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn parse_database(
    config: &Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("Database ready");
    Ok(database)
}
