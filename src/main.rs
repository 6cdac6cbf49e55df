use std::sync::Arc;

use color_eyre::eyre::Result;
use coursedesk_api::config::ApiConfig;
use coursedesk_db::{
    create_pool, schema::initialize_database, CourseRepository, InMemoryRepository,
    PgCourseRepository,
};
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the store: PostgreSQL when configured, process memory otherwise
    let repo: Arc<dyn CourseRepository> = match &config.database_url {
        Some(database_url) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgCourseRepository::new(db_pool))
        }
        None => Arc::new(InMemoryRepository::new()),
    };

    // Start API server
    coursedesk_api::start_server(config, repo).await?;

    Ok(())
}
