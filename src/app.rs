use std::{path::Path, sync::Arc};

use axum::Router;
use listenfd::ListenFd;
use sqlx::SqlitePool;
use tokio::{net::TcpListener, signal};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    config::Config,
    rooms::RoomCatalog,
    routes::{game, health, users},
    store::{self, Backend, Datastore},
};

/// Shared, read-only state handed to every route.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Datastore>,
    pub catalog: Arc<RoomCatalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: impl Datastore + 'static, catalog: RoomCatalog, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}

/// Builds the full router: JSON API, game pages and static assets.
pub fn build_router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.assets_dir);

    health::router(state.clone())
        .merge(game::router(state.clone()))
        .merge(users::router(state))
        .nest_service("/assets", assets)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

pub struct App {
    db: SqlitePool,
    catalog: RoomCatalog,
    config: Config,
}

impl App {
    pub async fn with_config(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let db = store::connect(&config.database_url).await?;
        let catalog = RoomCatalog::load(&config.rooms_dir, &config.work_room_config)?;

        Ok(Self { db, catalog, config })
    }

    pub fn db(&self) -> &SqlitePool {
        &self.db
    }

    pub fn router(&self) -> Router {
        build_router(AppState::new(
            Backend::new(self.db.clone()),
            self.catalog.clone(),
            self.config.clone(),
        ))
    }

    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        // reuse a socket handed over by systemfd when there is one
        let mut listenfd = ListenFd::from_env();
        let listener = match listenfd.take_tcp_listener(0)? {
            Some(listener) => {
                listener.set_nonblocking(true)?;
                TcpListener::from_std(listener)?
            }
            None => TcpListener::bind(&self.config.bind_addr).await?,
        };

        tracing::info!(
            service = %self.config.service_name,
            rooms = ?self.catalog.names(),
            "listening on {}",
            listener.local_addr()?,
        );
        log_assets_dir(&self.config.assets_dir);

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.db.close().await;
        tracing::info!("server stopped");

        Ok(())
    }
}

fn log_assets_dir(dir: &Path) {
    if !dir.is_dir() {
        tracing::warn!("assets directory {} does not exist", dir.display());
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
