use actix_web::{web, App, HttpServer};
use backend::config::app::Config;
use backend::extractors::JsonBodyLimit;
use backend::infra::state::build_state;
use backend::middleware::cors::cors_middleware;
use backend::middleware::rate_limit::RateLimits;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::security_headers::SecurityHeaders;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::security_config::SecurityConfig;

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    println!(
        "🚀 Starting site backend on http://{}:{}",
        config.host, config.port
    );

    let security_config =
        SecurityConfig::new(config.jwt_secret.as_bytes()).with_admin(config.admin.clone());

    let app_state = match build_state()
        .with_env(config.runtime_env)
        .with_db(config.db_kind)
        .with_security(security_config)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    println!("✅ Database connected");

    let data = web::Data::new(app_state);
    // Counters are shared by all workers.
    let limits = RateLimits::enabled();
    let allowed_origins = config.cors_allowed_origins.clone();
    let body_limit = JsonBodyLimit(config.max_json_payload_size);

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .wrap(SecurityHeaders)
            .wrap(cors_middleware(&allowed_origins))
            .app_data(data.clone())
            .app_data(body_limit)
            .configure(routes::configure(limits.clone()))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
