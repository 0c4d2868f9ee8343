use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use filebox::auth::AuthService;
use filebox::file::{ChannelQueue, ContentStore, FileTreeManager, JobQueue, NullQueue, ThumbnailWorker};
use filebox::store::{spawn_session_cleanup, DatabaseSessionStore, MemorySessionStore, SessionStore};
use filebox::web::{AppState, WebServer};
use filebox::{Config, Database, MetadataStore, PasswordScheme};

const CONFIG_PATH: &str = "config.toml";

fn load_config() -> Config {
    let mut config = if Path::new(CONFIG_PATH).exists() {
        match Config::load(CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {CONFIG_PATH}: {e}");
                eprintln!("Using default configuration.");
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    config.apply_env_overrides();
    config
}

#[tokio::main]
async fn main() {
    let config = load_config();

    if let Err(e) = filebox::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        filebox::logging::init_console_only(&config.logging.level);
    }
    if !Path::new(CONFIG_PATH).exists() {
        warn!("{} not found, using default configuration", CONFIG_PATH);
    }

    if let Err(e) = run(config).await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> filebox::Result<()> {
    config.validate()?;
    info!("Filebox starting");

    let db = Database::open(&config.database.path).await?;
    let metadata: Arc<dyn MetadataStore> = Arc::new(db.clone());

    let sessions: Arc<dyn SessionStore> = match config.session.backend.as_str() {
        "database" => Arc::new(DatabaseSessionStore::new(db.clone())),
        _ => Arc::new(MemorySessionStore::new()),
    };
    info!(backend = %config.session.backend, "Session store ready");
    spawn_session_cleanup(
        sessions.clone(),
        Duration::from_secs(config.session.cleanup_interval_secs.max(1)),
    );

    let scheme: PasswordScheme = config
        .auth
        .password_scheme
        .parse()
        .map_err(filebox::FileboxError::Config)?;
    let auth = AuthService::new(metadata.clone(), sessions.clone())
        .with_scheme(scheme)
        .with_session_ttl(Duration::from_secs(config.session.ttl_secs));

    let content = ContentStore::new(&config.files.storage_path);
    info!("File storage at {}", config.files.storage_path);

    let queue: Arc<dyn JobQueue> = if config.thumbnails.enabled {
        let (queue, receiver) = ChannelQueue::new(config.thumbnails.queue_capacity);
        let worker = ThumbnailWorker::new(
            metadata.clone(),
            content.clone(),
            config.thumbnails.sizes.clone(),
        );
        tokio::spawn(worker.run(receiver));
        Arc::new(queue)
    } else {
        warn!("Thumbnail generation disabled");
        Arc::new(NullQueue)
    };

    let files = FileTreeManager::new(metadata.clone(), content)
        .with_queue(queue)
        .with_max_file_size(config.files.max_upload_bytes())
        .with_thumbnail_sizes(config.thumbnails.sizes.clone());

    let state = AppState::new(auth, files, metadata, sessions);
    let server = WebServer::new(&config.server, &config.web, state)?;
    server.run().await?;

    info!("Filebox stopped");
    Ok(())
}
