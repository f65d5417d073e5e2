use crate::api::Api;
use crate::board::persistence::PersistenceShim;
use crate::config::{preferences::PreferenceStore, Config};
use crate::error::AppError;
use crate::events::network::{Event as NetworkEvent, Handler as NetworkEventHandler};
use crate::events::terminal::Handler as TerminalEventHandler;
use crate::logger::CustomLogger;
use crate::state::State;
use crate::ui::Theme;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::*;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use tokio::sync::Mutex;

pub type NetworkEventSender = std::sync::mpsc::Sender<NetworkEvent>;
type NetworkEventReceiver = std::sync::mpsc::Receiver<NetworkEvent>;
pub type PreferencesSaveSender = std::sync::mpsc::Sender<PreferenceStore>;
type PreferencesSaveReceiver = std::sync::mpsc::Receiver<PreferenceStore>;
type LogReceiver = std::sync::mpsc::Receiver<String>;

/// Oversees event processing, state management, and terminal output.
///
pub struct App {
    state: Arc<Mutex<State>>,
    config: Config,
    log_receiver: LogReceiver,
}

impl App {
    /// Start a new application according to the given configuration. Returns
    /// the result of the application execution.
    ///
    pub async fn start(config: Config) -> Result<()> {
        let logger = CustomLogger::new(LevelFilter::Debug);
        logger.install()?;

        info!("Starting application...");
        let (tx, rx) = std::sync::mpsc::channel::<NetworkEvent>();
        let (save_tx, save_rx) = std::sync::mpsc::channel::<PreferenceStore>();

        let preferences = match config.dir_path() {
            Some(dir) => PreferenceStore::load(dir).unwrap_or_else(|e| {
                warn!("Failed to load preferences, starting fresh: {}", e);
                PreferenceStore::default()
            }),
            None => PreferenceStore::default(),
        };
        let theme = Theme::from_name(&config.theme_name).unwrap_or_else(|| {
            warn!("Unknown theme '{}', using default", config.theme_name);
            Theme::default()
        });
        let state = State::new(
            tx,
            save_tx,
            preferences,
            theme,
            config.hotkeys.clone(),
            config.default_workspace_id.clone(),
            config.tree_delay_ms,
        );

        // Log records are queued and drained into the debug panel by the UI loop
        let (log_tx, log_rx) = std::sync::mpsc::channel::<String>();
        let log_tx = std::sync::Mutex::new(log_tx);
        logger.set_log_callback(Box::new(move |entry| {
            if let Ok(sender) = log_tx.lock() {
                let _ = sender.send(entry);
            }
        }));

        let app = App {
            state: Arc::new(Mutex::new(state)),
            config,
            log_receiver: log_rx,
        };
        app.start_network(rx)?;
        start_preferences_saver(save_rx);
        app.start_ui().await?;

        // Save preferences on exit
        {
            let mut state = app.state.lock().await;
            if let Err(e) = state.sync_preferences().save() {
                error!("Failed to save preferences on exit: {}", e);
            }
        }

        info!("Exiting application...");
        Ok(())
    }

    /// Start a separate thread for asynchronous state mutations.
    ///
    fn start_network(&self, net_receiver: NetworkEventReceiver) -> Result<()> {
        debug!("Creating new thread for asynchronous networking...");
        let cloned_state = Arc::clone(&self.state);
        let base_url = self.config.api_base_url.to_owned();
        let settings = self.config.persistence.clone();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::RuntimeCreation(e.to_string()))?;
        std::thread::spawn(move || {
            runtime.block_on(async {
                let api = Api::new(&base_url);
                let persistence = PersistenceShim::new(settings);
                let mut network_event_handler =
                    NetworkEventHandler::new(&cloned_state, &api, &persistence);
                while let Ok(network_event) = net_receiver.recv() {
                    if let Err(e) = network_event_handler.handle(network_event).await {
                        error!("Failed to handle network event: {}", e);
                    }
                }
            })
        });
        Ok(())
    }

    /// Begin the terminal event poll on a separate thread before starting the
    /// render loop on the main thread. Return the result following an exit
    /// request or unrecoverable error.
    ///
    async fn start_ui(&self) -> Result<()> {
        debug!("Starting user interface on main thread...");
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .map_err(|e| AppError::Terminal(e.to_string()))?;
        enable_raw_mode().map_err(|e| AppError::Terminal(e.to_string()))?;

        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;

        {
            let mut state = self.state.lock().await;
            state.load_workspaces();
        }

        let terminal_event_handler = TerminalEventHandler::new();
        let result = loop {
            let mut state = self.state.lock().await;
            for entry in self.log_receiver.try_iter() {
                state.add_log_entry(entry);
            }
            if let Ok(size) = terminal.size() {
                state.set_terminal_size(size);
            };
            if let Err(e) = terminal.draw(|frame| crate::ui::render(frame, &mut state)) {
                break Err(e.into());
            }
            match terminal_event_handler.handle_next(&mut state) {
                Ok(true) => (),
                Ok(false) => {
                    debug!("Received application exit request.");
                    break Ok(());
                }
                Err(e) => break Err(e),
            }
        };

        disable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;
        terminal.show_cursor()?;

        result
    }
}

/// Start a thread that writes preference snapshots. Snapshots queued behind
/// one another are collapsed into the newest.
///
fn start_preferences_saver(receiver: PreferencesSaveReceiver) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        while let Ok(snapshot) = receiver.recv() {
            let latest = receiver.try_iter().last().unwrap_or(snapshot);
            if let Err(e) = latest.save() {
                error!("Failed to save preferences: {}", e);
            }
        }
    })
}
