use std::{fs, net::SocketAddr, time::Duration};

use async_trait::async_trait;
use axum::Router;
use tempfile::TempDir;

use workroom::{
    build_router,
    config::Config,
    models::{ActivityType, User},
    rooms::RoomCatalog,
    store::{Datastore, DatastoreError},
    App, AppState,
};

pub const STUDIO: &str = r#"{
    "roomWidth": 320,
    "roomHeight": 180,
    "items": [
        { "id": "rug", "src": "/assets/rug.png", "label": "Rug",
          "left": 10, "bottom": 0, "width": 100, "height": 20 },
        { "id": "lamp", "src": "props:lamp", "label": "Lamp",
          "left": 200, "bottom": 20, "width": 16, "height": 48,
          "slice": { "src": "/assets/props.png", "x": 16, "y": 48, "sheetW": 256, "sheetH": 128 } }
    ]
}"#;

/// Datastore whose every call fails, as if the database went away.
pub struct FailingStore;

#[async_trait]
impl Datastore for FailingStore {
    async fn get_activity_types(&self) -> Result<Vec<ActivityType>, DatastoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }

    async fn get_user_by_username(&self, _username: &str) -> Result<Option<User>, DatastoreError> {
        Err(sqlx::Error::PoolClosed.into())
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    pub app: Option<App>,
    _rooms: TempDir,
    _shutdown: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Server backed by a fresh in-memory database and a `studio` room.
    pub async fn new() -> Self {
        Self::with_background(None).await
    }

    /// Same as `new`, with the work room background override set.
    pub async fn with_background(background: Option<&str>) -> Self {
        let rooms = write_rooms(background);
        let app = App::with_config(test_config(&rooms)).await.unwrap();
        let router = app.router();
        Self::spawn(router, rooms, Some(app)).await
    }

    /// Server whose datastore fails on every call.
    pub async fn failing() -> Self {
        let rooms = write_rooms(None);
        let config = test_config(&rooms);
        let catalog = RoomCatalog::load(&config.rooms_dir, &config.work_room_config).unwrap();
        let router = build_router(AppState::new(FailingStore, catalog, config));
        Self::spawn(router, rooms, None).await
    }

    async fn spawn(router: Router, rooms: TempDir, app: Option<App>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        // Give the server a moment to start accepting
        tokio::time::sleep(Duration::from_millis(20)).await;

        Self {
            addr,
            app,
            _rooms: rooms,
            _shutdown: handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn add_user(&self, username: &str, display_name: Option<&str>) {
        let app = self.app.as_ref().expect("server has no database");
        sqlx::query("insert into users (username, display_name) values (?, ?)")
            .bind(username)
            .bind(display_name)
            .execute(app.db())
            .await
            .unwrap();
    }
}

fn test_config(rooms: &TempDir) -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        service_name: "workroom-test".to_string(),
        rooms_dir: rooms.path().join("rooms"),
        work_room_config: rooms.path().join("work_room.json"),
        default_room: "studio".to_string(),
        assets_dir: rooms.path().join("assets"),
        ..Config::default()
    }
}

fn write_rooms(background: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("rooms")).unwrap();
    fs::write(dir.path().join("rooms").join("studio.json"), STUDIO).unwrap();

    if let Some(background) = background {
        let config = serde_json::json!({ "backgroundImage": background });
        fs::write(dir.path().join("work_room.json"), config.to_string()).unwrap();
    }

    dir
}
