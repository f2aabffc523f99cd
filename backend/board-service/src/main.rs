use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer};
use board_service::handlers;
use board_service::metrics;
use board_service::middleware::JwtAuthMiddleware;
use board_service::purge::{PgDocumentStore, PurgeCoordinator};
use board_service::Config;
use chrono::Utc;
use object_store::{ObjectStore, S3ObjectStore};
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct HealthState {
    db_pool: PgPool,
    object_store: S3ObjectStore,
}

#[derive(Serialize)]
struct ComponentCheck {
    healthy: bool,
    message: String,
}

async fn health_summary(state: web::Data<HealthState>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(&state.db_pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "board-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "board-service"
        })),
    }
}

async fn readiness_summary(state: web::Data<HealthState>) -> HttpResponse {
    let postgres = match sqlx::query("SELECT 1").fetch_one(&state.db_pool).await {
        Ok(_) => ComponentCheck {
            healthy: true,
            message: "connected".to_string(),
        },
        Err(e) => ComponentCheck {
            healthy: false,
            message: e.to_string(),
        },
    };

    let storage = match state.object_store.health_check().await {
        Ok(_) => ComponentCheck {
            healthy: true,
            message: "connected".to_string(),
        },
        Err(e) => ComponentCheck {
            healthy: false,
            message: e.to_string(),
        },
    };

    let ready = postgres.healthy && storage.healthy;
    let status = if ready {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };

    let mut response = status;
    response.json(serde_json::json!({
        "ready": ready,
        "checks": {
            "postgres": postgres,
            "storage": storage,
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            tracing_subscriber::EnvFilter::new("info,board_service=debug,sqlx=warn")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

    if !config.auth.public_key_pem.is_empty() {
        auth_core::initialize_validation_key(&config.auth.public_key_pem)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    } else {
        tracing::warn!("AUTH_PUBLIC_KEY_PEM not set; all authenticated routes will reject");
    }

    let db_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()))?;

    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    let s3_store = S3ObjectStore::with_config(config.storage.clone())
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::ConnectionRefused, e.to_string()))?;
    let object_store: Arc<dyn ObjectStore> = Arc::new(s3_store.clone());

    let coordinator = Arc::new(PurgeCoordinator::new(
        Arc::new(PgDocumentStore::new(db_pool.clone())),
        object_store.clone(),
    ));

    let health_state = web::Data::new(HealthState {
        db_pool: db_pool.clone(),
        object_store: s3_store,
    });

    let bind_addr = (config.app.host.clone(), config.app.port);
    tracing::info!(
        host = %config.app.host,
        port = config.app.port,
        env = %config.app.env,
        "starting board-service"
    );

    let allowed_origins: Vec<String> = config
        .cors
        .allowed_origins
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    let config_data = web::Data::new(config);
    let pool_data = web::Data::new(db_pool);
    let store_data = web::Data::new(object_store);
    let coordinator_data = web::Data::new(coordinator);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allow_any_header()
            .max_age(3600);
        for origin in &allowed_origins {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(config_data.clone())
            .app_data(pool_data.clone())
            .app_data(store_data.clone())
            .app_data(coordinator_data.clone())
            .app_data(health_state.clone())
            .route("/health", web::get().to(health_summary))
            .route("/ready", web::get().to(readiness_summary))
            .route("/metrics", web::get().to(metrics::serve_metrics))
            .service(
                web::scope("/api/v1")
                    .route("/posts", web::get().to(handlers::list_posts))
                    .route("/posts/{id}", web::get().to(handlers::get_post))
                    .service(
                        web::scope("")
                            .wrap(JwtAuthMiddleware)
                            .route("/posts", web::post().to(handlers::create_post))
                            .route("/posts/{id}", web::delete().to(handlers::delete_post))
                            .route("/posts/{id}/like", web::post().to(handlers::like_post))
                            .route("/posts/{id}/like", web::delete().to(handlers::unlike_post))
                            .route(
                                "/posts/{id}/images/{filename}",
                                web::put().to(handlers::upload_post_image),
                            )
                            .route("/users/me", web::get().to(handlers::get_me))
                            .route("/users/me", web::put().to(handlers::upsert_me))
                            .route("/users/me/survey", web::put().to(handlers::save_survey))
                            .route("/admin/posts/purge", web::post().to(handlers::purge_posts)),
                    ),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
