use std::path::Path;
use std::sync::Arc;

use wayfinder::config::{ProfileApiConfig, WizardConfig};
use wayfinder::onboarding::routes::{OnboardingRouteState, onboarding_routes};
use wayfinder::onboarding::{OnboardingManager, QuestionCatalog};
use wayfinder::persist::{HttpProfileStore, ProfileSaver, ProfileStore};
use wayfinder::store::{LibSqlSessionStore, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let port: u16 = std::env::var("WAYFINDER_PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let db_path = std::env::var("WAYFINDER_DB_PATH")
        .unwrap_or_else(|_| "./data/wayfinder-sessions.db".to_string());

    let profile_api_url = std::env::var("WAYFINDER_PROFILE_API_URL").unwrap_or_else(|_| {
        eprintln!("Error: WAYFINDER_PROFILE_API_URL not set");
        eprintln!("  export WAYFINDER_PROFILE_API_URL=https://<project>.example.co/rest/v1/onboarding_profiles");
        std::process::exit(1);
    });
    let profile_api_key = std::env::var("WAYFINDER_PROFILE_API_KEY").unwrap_or_else(|_| {
        eprintln!("Error: WAYFINDER_PROFILE_API_KEY not set");
        std::process::exit(1);
    });

    let config = WizardConfig::from_env();
    let catalog = QuestionCatalog::default_questions();

    eprintln!("🧭 Wayfinder v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Questions: {}", catalog.total_count());
    eprintln!("   Session TTL: {}s", config.session_ttl.as_secs());
    eprintln!("   API: http://0.0.0.0:{}/api/onboarding/turn", port);

    // ── Session store ────────────────────────────────────────────────────
    let sessions: Arc<dyn SessionStore> = Arc::new(
        LibSqlSessionStore::new_local(Path::new(&db_path), config.session_ttl)
            .await
            .unwrap_or_else(|e| {
                eprintln!("Error: Failed to open session store at {}: {}", db_path, e);
                std::process::exit(1);
            }),
    );
    eprintln!("   Session store: {}", db_path);

    // ── Profile persistence ──────────────────────────────────────────────
    let profile_api = ProfileApiConfig {
        endpoint: profile_api_url,
        api_key: secrecy::SecretString::from(profile_api_key),
    };
    let profiles: Arc<dyn ProfileStore> = Arc::new(HttpProfileStore::new(
        profile_api,
        config.save_request_timeout,
    ));
    let saver = ProfileSaver::new(profiles, config.save_max_attempts, config.save_base_delay);

    // ── Manager + server ─────────────────────────────────────────────────
    let manager = Arc::new(OnboardingManager::new(
        catalog,
        sessions,
        saver,
        config.paths.clone(),
    ));

    let app = onboarding_routes(OnboardingRouteState { manager });
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    tracing::info!(port, "Onboarding server started");
    axum::serve(listener, app).await?;
    Ok(())
}
