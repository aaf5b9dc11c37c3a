use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::app::{App, Page};
use crate::catalog::Catalog;
use crate::playback::{PlaybackController, RodioDevice};
use crate::visualizer::Visualizer;

mod event_loop;
mod logging;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, fallback) = settings::load_settings();
    let log_path = logging::init(&settings.logging);
    info!(log = ?log_path, "musicstream starting");
    if let Some(reason) = fallback {
        warn!(%reason, "using default settings");
    }

    // CLI argument wins over the configured catalog path.
    let source = env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| settings.library.catalog_path.clone());
    let catalog = Catalog::open(source.as_deref(), &settings.library);

    let device = RodioDevice::spawn(Duration::from_millis(settings.playback.time_update_ms));
    let player = PlaybackController::new(device, settings.playback.initial_volume);
    let visualizer = Visualizer::new(settings.visualizer.bar_count, settings.visualizer.fps);

    let mut app = App::new(catalog, player, visualizer);
    app.autoplay = settings.playback.autoplay;
    let start_page = Page::from(settings.ui.start_page);
    if start_page != app.page {
        app.navigate(start_page);
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut state = event_loop::EventLoopState::default();
    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mut state);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("musicstream exiting");
    run_result
}
