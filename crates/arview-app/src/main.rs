mod app_state;
mod cli;
mod keymap;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arview_config::schema::LoggingConfig;
use arview_config::toml_loader;
use arview_config::ReloadManager;
use arview_platform::{InstanceRole, JsonFileStore};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};
use winit::event_loop::EventLoop;

use app_state::{ArviewApp, LaunchOptions};

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("panic: {info}");
        default_hook(info);
    }));
}

/// `RUST_LOG`, then `--log-level`, then the config file.
fn init_logging(cli_level: Option<&str>, logging: &LoggingConfig) {
    let fallback = cli_level.unwrap_or(logging.level.as_filter());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if logging.file_logging {
        open_log_file().map(|file| {
            fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
        })
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();
}

fn open_log_file() -> Option<std::fs::File> {
    let dir = arview_platform::log_dir().ok()?;
    std::fs::create_dir_all(&dir).ok()?;
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("arview.log"))
    {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("arview: cannot open log file: {e}");
            None
        }
    }
}

fn config_path(args: &cli::Args) -> PathBuf {
    if let Some(path) = &args.config {
        return path.clone();
    }
    match toml_loader::default_config_path() {
        Ok(path) => {
            if !path.exists() {
                if let Err(e) = toml_loader::create_default_config(&path) {
                    eprintln!("arview: cannot write config template: {e}");
                }
            }
            path
        }
        Err(_) => PathBuf::from("config.toml"),
    }
}

/// Logging settings read before the subscriber exists. Errors are reported
/// again, with logging up, when the config is loaded for real.
fn peek_logging(path: &Path) -> LoggingConfig {
    toml_loader::load_from_path(path)
        .map(|c| c.logging)
        .unwrap_or_default()
}

fn main() {
    let args = cli::parse();
    let config_path = config_path(&args);
    if args.reset_config {
        match arview_config::reset_config_to_path(&config_path) {
            Ok(()) => println!("config reset: {}", config_path.display()),
            Err(e) => eprintln!("arview: {e}"),
        }
        return;
    }
    init_logging(args.log_level.as_deref(), &peek_logging(&config_path));
    install_panic_hook();

    tracing::info!("arview v{} starting", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir().unwrap_or_default();
    let target = cli::resolve_target(args.target.as_deref(), &cwd);

    let instance = match arview_platform::acquire_instance(
        &arview_platform::instance_socket(),
        &target.as_line(),
    ) {
        Ok(InstanceRole::Secondary) => {
            tracing::info!("handed target to running instance, exiting");
            return;
        }
        Ok(InstanceRole::Primary(listener)) => Some(listener),
        Err(e) => {
            tracing::warn!("single-instance socket unavailable: {e}");
            None
        }
    };

    if let Err(e) = arview_platform::ensure_dirs() {
        tracing::warn!("failed to create directories: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return;
        }
    };

    let (config, config_rx) = runtime.block_on(async { ReloadManager::start(config_path.clone()) });
    tracing::info!(path = %config_path.display(), "config loaded");

    let store = match JsonFileStore::open_default() {
        Ok(store) => Arc::new(store) as Arc<dyn arview_common::StateStore>,
        Err(e) => {
            tracing::warn!("state file unavailable, state will not persist: {e}");
            Arc::new(arview_common::MemoryStore::new())
        }
    };

    let margins = args
        .has_margin_overrides()
        .then(|| args.margins(config.appearance.margins));
    let options = LaunchOptions {
        target,
        config_path,
        margins,
        background: args.bg.clone(),
        parent_pid: args.ppid,
        instance,
    };

    let event_loop = match EventLoop::new() {
        Ok(el) => el,
        Err(e) => {
            tracing::error!("failed to create event loop: {e}");
            return;
        }
    };

    let mut app = ArviewApp::new(config, store, options);
    app.attach_runtime(runtime, config_rx);

    tracing::info!("entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("event loop error: {e}");
    }
    tracing::info!("shutdown complete");
}

