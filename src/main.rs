use hone_studio::config::AppConfig;
use hone_studio::email_client::EmailClient;
use hone_studio::gemini_client::GeminiClient;
use hone_studio::knowledge_base::KnowledgeBase;
use hone_studio::services::PgContactStore;
use hone_studio::{app_router, db, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_logging()?;

    let config = AppConfig::from_env()?;
    let knowledge_base = KnowledgeBase::load(config.knowledge_base_path.as_deref())?;
    tracing::info!("Knowledge base compiled into system prompt ({} chars)", knowledge_base.prompt().len());

    let mut state = AppState::new(knowledge_base);

    match config.database_url.as_deref() {
        Some(db_url) => match db::create_pool(db_url, &config.db_pool).await {
            Ok(pool) => {
                tracing::info!("✅ Document store connected");
                state = state.with_contact_store(Arc::new(PgContactStore::new(pool)));
            }
            Err(e) => {
                tracing::error!("❌ Failed to connect document store: {}", e);
            }
        },
        None => {
            tracing::warn!("DATABASE_URL not found. Contact submissions will fail.");
        }
    }

    match config.gemini_api_key.clone() {
        Some(api_key) => {
            tracing::info!("Initializing Gemini AI client ({})...", config.gemini_model);
            state = state.with_chat_provider(Arc::new(GeminiClient::new(api_key, config.gemini_model.clone())));
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not found. Chat relay will fail.");
        }
    }

    match config.email.clone() {
        Some(email) => {
            tracing::info!("📧 Contact notifications will be sent to {}", email.to);
            state = state.with_notifier(Arc::new(EmailClient::new(email)));
        }
        None => {
            tracing::warn!("Email credentials not complete. Contact notifications disabled.");
            tracing::info!("To enable notifications, set: EMAIL_API_KEY, EMAIL_FROM, EMAIL_TO");
        }
    }

    let app = app_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service_with_connect_info::<std::net::SocketAddr>()).await?;

    Ok(())
}

fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,hone_studio=trace,sqlx=info,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,hone_studio=info,sqlx=warn,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry().with(env_filter).with(fmt_layer).init();

    tracing::info!("Hone Studio site backend starting up...");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Build mode: {}", if cfg!(debug_assertions) { "development" } else { "production" });
    tracing::info!("Log level: {}", log_level);

    let flag = |key: &str| if std::env::var(key).map(|v| !v.is_empty()).unwrap_or(false) { "✅" } else { "❌" };
    tracing::info!(
        "Configuration - Document store: {}, Gemini AI: {}, Email: {}",
        flag("DATABASE_URL"),
        flag("GEMINI_API_KEY"),
        flag("EMAIL_API_KEY")
    );

    Ok(())
}
