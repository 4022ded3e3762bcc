//! src/main.rs
//! Resource library TUI plus the clipboard and listing subcommands

use std::{
    io::{self, Stdout, Write},
    panic::PanicHookInfo,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc},
};
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

use clipr::{ClipboardCodec, SystemClipboard};
use remix_core::{
    AppError, Logger,
    config::Config,
    controller::{
        clipboard_worker::ClipboardWorker,
        event_loop::{EventLoop, MetricsSnap, TaskResult},
        handlers::KeyRouter,
    },
    data::{Catalog, JsonFileSource, ResourceSource},
    model::{
        app_state::AppState,
        library::ResourceLibraryStore,
        route::Route,
        search_index::SearchIndex,
    },
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Parser)]
#[command(name = "remix", version, about = "Browse and remix design resources")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Resource dataset (JSON); overrides `data.path` from the config
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Route to open on start: `/resource/<key>` or a bare key
    route: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Capture the rich-HTML payload currently on the clipboard
    Capture {
        /// Write the payload to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Put a resource's payload on the clipboard
    Copy {
        /// Resource slug or id
        key: String,
    },
    /// Print the resources of the filtered view or of a search
    List {
        /// Category id to filter by; repeatable
        #[arg(long = "category")]
        categories: Vec<String>,

        /// Search text; category filters are ignored when given
        #[arg(long)]
        search: Option<String>,
    },
}

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref()).await?;

    match cli.command {
        Some(command) => {
            Logger::init_stderr(&config.logging).context("Failed to initialize logging")?;
            run_command(command, cli.data.as_deref(), &config).await
        }
        None => {
            setup_panic_handler();
            let app = App::new(cli.data.as_deref(), cli.route.as_deref(), config)
                .await
                .context("Failed to initialize application")?;
            app.run().await.context("Application runtime error")?;
            info!("Application exited cleanly");
            Ok(())
        }
    }
}

async fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path).await,
        None => Config::load().await,
    };
    config.context("Failed to load configuration")
}

fn dataset_source(data: Option<&Path>, config: &Config) -> Result<JsonFileSource> {
    let path = data
        .map(Path::to_path_buf)
        .or_else(|| config.data.path.clone())
        .context("No dataset given: pass --data or set data.path in the config")?;
    Ok(JsonFileSource::new(path))
}

async fn load_catalog(data: Option<&Path>, config: &Config) -> Result<Catalog> {
    let source = dataset_source(data, config)?;
    Catalog::load(&source)
        .await
        .with_context(|| format!("Failed to load catalog from {}", source.path().display()))
}

/// ---------------------------------------------------------------------------
/// subcommands
/// ---------------------------------------------------------------------------
async fn run_command(command: Commands, data: Option<&Path>, config: &Config) -> Result<()> {
    match command {
        Commands::Capture { out } => capture(out.as_deref(), config),
        Commands::Copy { key } => copy(&key, data, config).await,
        Commands::List { categories, search } => {
            list(&categories, search.as_deref(), data, config).await
        }
    }
}

fn capture(out: Option<&Path>, config: &Config) -> Result<()> {
    let mut codec = ClipboardCodec::new(SystemClipboard::new(), config.clipboard.clone());
    let mut event = codec
        .read_paste_event()
        .context("Failed to read the clipboard")?;

    let Some(payload) = codec.capture(&mut event) else {
        bail!("Clipboard holds no rich HTML");
    };
    info!(bytes = payload.len(), "Captured clipboard payload");

    match out {
        Some(path) => std::fs::write(path, payload.as_str())
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(payload.as_str().as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

async fn copy(key: &str, data: Option<&Path>, config: &Config) -> Result<()> {
    let source = dataset_source(data, config)?;
    let resource = source
        .resource_by_identity(key)
        .await
        .with_context(|| format!("Failed to read {}", source.describe()))?
        .with_context(|| format!("Resource not found: {key}"))?;

    let Some(payload) = resource.payload.as_ref() else {
        bail!("Resource {key} has nothing to remix");
    };

    // The process owns the selection until it exits, so stay alive until
    // something else is copied.
    let clipboard = SystemClipboard::holding();
    info!(key, hold = clipboard.holds_until_replaced(), "Copying resource to clipboard");
    let mut codec = ClipboardCodec::new(clipboard, config.clipboard.clone());
    codec
        .try_write(payload)
        .context("Failed to write the clipboard")?;
    info!(key, "Resource copied to clipboard");
    Ok(())
}

async fn list(
    categories: &[String],
    search: Option<&str>,
    data: Option<&Path>,
    config: &Config,
) -> Result<()> {
    let catalog = load_catalog(data, config).await?;
    let index = SearchIndex::new(&catalog.categories);
    let mut store = ResourceLibraryStore::new(catalog.categories, catalog.resources);

    let resources = match search {
        Some(text) => index.query(store.resources(), text),
        None => {
            for id in categories {
                store.toggle_category(id);
            }
            store.filtered_resources()
        }
    };

    let mut stdout = io::stdout().lock();
    for resource in resources {
        let category = resource
            .category_ref
            .as_deref()
            .and_then(|id| store.category_title(id))
            .unwrap_or("-");
        writeln!(stdout, "{}\t{}\t{}", resource.identity(), resource.name, category)?;
    }
    Ok(())
}

/// ---------------------------------------------------------------------------
/// interactive application
/// ---------------------------------------------------------------------------
struct App {
    terminal: AppTerminal,
    event_loop: EventLoop,
    state: AppState,
    ui_renderer: UIRenderer,
    shutdown: Arc<Notify>,
    _log_guard: WorkerGuard,
}

impl App {
    async fn new(data: Option<&Path>, route: Option<&str>, config: Config) -> Result<Self> {
        let log_guard = Logger::init_tracing(&config.logging, &Config::log_dir()?)
            .context("Failed to initialize logging")?;
        info!("Starting remix");

        let initial = match route {
            Some(route) => {
                Route::parse(route).ok_or_else(|| AppError::InvalidRoute(route.to_string()))?
            }
            None => Route::Listing,
        };

        let catalog = load_catalog(data, &config).await?;
        let config = Arc::new(config);

        let (task_tx, task_rx) = mpsc::unbounded_channel::<TaskResult>();
        let clipboard = ClipboardWorker::new(
            Box::new(SystemClipboard::new()),
            config.clipboard.clone(),
            task_tx.clone(),
        );
        let event_loop = EventLoop::new(task_rx, KeyRouter::new(&config.keys));
        let state = AppState::new(catalog, Arc::clone(&config), clipboard, task_tx, initial);

        let terminal = setup_terminal().context("Failed to initialize terminal")?;

        info!(route = %state.history.current(), "Application initialized successfully");
        Ok(Self {
            terminal,
            event_loop,
            state,
            ui_renderer: UIRenderer::new(),
            shutdown: Arc::new(Notify::new()),
            _log_guard: log_guard,
        })
    }

    async fn run(mut self) -> Result<()> {
        self.setup_shutdown_handler();
        info!("Starting event loop");

        'outer: loop {
            self.render()?;

            let context = self.state.input_context();
            tokio::select! {
                _ = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    break;
                }
                next = self.event_loop.next_actions(context) => {
                    let Some(actions) = next else {
                        info!("Input stream closed");
                        break;
                    };
                    for action in actions {
                        if !self.state.dispatch(action) {
                            info!("Quit requested");
                            break 'outer;
                        }
                    }
                }
            }
        }

        self.log_final_metrics();
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let state = &self.state;
        let renderer = &mut self.ui_renderer;
        self.terminal
            .draw(|frame: &mut Frame<'_>| renderer.render(frame, state))
            .context("Failed to draw terminal")?;
        Ok(())
    }

    fn log_final_metrics(&self) {
        let metrics: MetricsSnap = self.event_loop.snapshot_metrics();
        info!(
            tasks = metrics.tasks,
            keys = metrics.keys,
            unhandled = metrics.unhandled,
            frames = self.ui_renderer.frames(),
            uptime = ?self.event_loop.uptime(),
            "Final metrics"
        );
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let mut sigterm = match signal(SignalKind::terminate()) {
                    Ok(sigterm) => sigterm,
                    Err(e) => {
                        warn!("Failed to create SIGTERM handler: {}", e);
                        return;
                    }
                };

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Application panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
