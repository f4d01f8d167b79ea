mod auth;
mod controller;
mod logging;
mod model;
mod platform;
mod view;

use std::io;
use std::sync::Arc;
use anyhow::Result;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use crossterm::{
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement,
        EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use controller::AppController;
use model::{AppModel, SessionInfo, SpotifyClient};
use platform::UiMode;

#[tokio::main]
async fn main() -> Result<()> {
    // The guard keeps the background log writer alive until exit
    let _log_guard = match logging::init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!("=== Spotify-TV Shell Starting ===");

    // Step 1: one-shot host query gating the top-level layout
    let ui_mode = platform::detect_ui_mode();
    tracing::info!(mode = ?ui_mode, "UI mode detected");

    // Step 2: authorize against the Spotify Web API
    let rspotify_client = auth::perform_oauth_flow().await?;
    let spotify_client = SpotifyClient::new(rspotify_client);

    let display_name = match spotify_client.get_display_name().await {
        Ok(name) => {
            tracing::info!(user = %name, "Spotify session authorized");
            name
        }
        Err(e) => {
            tracing::error!(error = %e, "Spotify authorization check failed");
            return Err(anyhow::anyhow!("Spotify authorization failed"));
        }
    };

    // Initialize liked songs cache from disk
    let cache_loaded = spotify_client.init_liked_songs_cache().await.is_ok();

    // If cache wasn't loaded from disk, refresh synchronously (first run)
    // Otherwise refresh in background
    if !cache_loaded || !std::path::Path::new(".cache/liked_songs.json").exists() {
        tracing::info!("Loading liked songs from API (first run or cache miss)...");
        if let Err(e) = spotify_client.refresh_liked_songs_cache().await {
            tracing::warn!(error = %e, "Could not load liked songs");
        }
    } else {
        tracing::debug!("Liked songs cache found, refreshing in background");
        let spotify_for_cache = spotify_client.clone();
        tokio::spawn(async move {
            let _ = spotify_for_cache.refresh_liked_songs_cache().await;
        });
    }

    // Hold-to-skip needs key-release reporting from the terminal
    let holds_enabled = supports_keyboard_enhancement().unwrap_or(false);
    tracing::info!(holds_enabled, "Keyboard enhancement support detected");

    let mut app_model = AppModel::new(holds_enabled);
    app_model.set_spotify_client(spotify_client.clone());

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if holds_enabled {
        execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));

    model
        .lock()
        .await
        .set_session(SessionInfo {
            signed_in: true,
            display_name,
        })
        .await;

    let controller = AppController::new(model.clone());

    // Pull the first playback snapshot in the background
    let controller_for_init = controller.clone();
    tokio::spawn(async move {
        controller_for_init.refresh_playback().await;
    });

    let res = run_app(&mut terminal, model.clone(), controller, ui_mode).await;

    // Restore terminal
    if holds_enabled {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Spotify-TV Shell shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    ui_mode: UiMode,
) -> io::Result<()> {
    let mut last_token_check = Instant::now();
    let mut last_playback_poll = Instant::now();
    const TOKEN_CHECK_INTERVAL: Duration = Duration::from_secs(60); // Check every minute
    const POSITION_POLL_INTERVAL: Duration = Duration::from_secs(1);

    loop {
        // Periodically check and refresh token if needed
        if last_token_check.elapsed() >= TOKEN_CHECK_INTERVAL {
            last_token_check = Instant::now();

            let model_guard = model.lock().await;
            if let Some(spotify) = model_guard.get_spotify_client().await {
                drop(model_guard);
                tokio::spawn(async move {
                    match spotify.refresh_token_if_needed().await {
                        Ok(_) => {},
                        Err(e) => tracing::warn!("Token refresh check failed: {}", e),
                    }
                });
            } else {
                drop(model_guard);
            }
        }

        // Fixed 1 s cadence: poll position/metadata from the player
        // connection (the strip renders it on every screen)
        if last_playback_poll.elapsed() >= POSITION_POLL_INTERVAL {
            last_playback_poll = Instant::now();
            let controller_for_poll = controller.clone();
            tokio::spawn(async move {
                controller_for_poll.refresh_playback().await;
            });
        }

        // Mature pending gesture timers on the same loop that takes
        // key presses, so cancel-on-second-press cannot race
        controller.tick_gestures(Instant::now()).await;

        // Get current state
        let (playback, ui_state, queue_state, hold, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_playback_info().await,
                model_guard.get_ui_state().await,
                model_guard.get_queue_state().await,
                model_guard.hold_progress(Instant::now()).await,
                model_guard.should_quit().await,
            )
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, ui_mode, &playback, &ui_state, &queue_state, hold);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                // Errors are surfaced through the overlay, not the log
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
