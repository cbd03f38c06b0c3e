use anyhow::{Context, Result};
use clap::Args;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::nav::controller::NavigationController;
use crate::nav::screen::InputEvent;
use crate::playback::SimulatedPlayback;
use crate::screens::{names, register_all};
use crate::ui::{StatusBar, Theme, render_screen};

const FRAME: Duration = Duration::from_millis(16);

#[derive(Args)]
pub struct RunArgs {
    /// Config file to read instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Screen to open first
    #[arg(short, long)]
    pub screen: Option<String>,
}

pub async fn run_command(args: RunArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let theme = Theme::new(config.theme);

    let factories = register_all(&config);
    let mut nav = NavigationController::new(config.nav_context(), factories, Arc::new(SimulatedPlayback::new()));

    let start = args.screen.unwrap_or_else(|| names::HOME.to_string());
    nav.navigate(&start, None, false)
        .with_context(|| format!("Failed to open screen '{}'", start))?;
    nav.start_timer();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut nav, &theme).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    if nav.is_running() {
        nav.shutdown()?;
    }
    info!("Event loop finished");
    result
}

async fn run_loop<B: Backend>(terminal: &mut Terminal<B>, nav: &mut NavigationController, theme: &Theme) -> Result<()> {
    let mut first_frame = true;

    while nav.is_running() {
        let frame_start = Instant::now();

        // Process all pending events first for minimal input latency
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(input) = map_key(key) {
                    nav.handle_input(input);
                }
            }
            if !nav.is_running() {
                return Ok(());
            }
        }

        // Commands queued by the sleep timer
        nav.process_commands();

        if nav.take_redraw() || first_frame {
            first_frame = false;
            if let Some(view) = nav.current_view() {
                let status = StatusBar::from_controller(nav);
                terminal.draw(|frame| render_screen(frame, theme, &view, &status))?;
            }
        }

        // Sleep for remainder of the frame
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME.checked_sub(elapsed) {
            tokio::time::sleep(remaining).await;
        }
    }

    Ok(())
}

/// Keyboard stand-in for the touch panel and remote
pub fn map_key(key: KeyEvent) -> Option<InputEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        return Some(InputEvent::Shutdown);
    }

    let input = match key.code {
        KeyCode::Up => InputEvent::Up,
        KeyCode::Down => InputEvent::Down,
        KeyCode::Left => InputEvent::Left,
        KeyCode::Right => InputEvent::Right,
        KeyCode::Enter => InputEvent::Select,
        KeyCode::Tab => InputEvent::FocusNext,
        KeyCode::Esc | KeyCode::Backspace => InputEvent::Back,
        KeyCode::PageUp => InputEvent::PageUp,
        KeyCode::PageDown => InputEvent::PageDown,
        KeyCode::Char(' ') => InputEvent::PlayPause,
        KeyCode::Char('h') => InputEvent::Home,
        KeyCode::Char('p') => InputEvent::Player,
        KeyCode::Char('m') => InputEvent::Mute,
        KeyCode::Char('+') => InputEvent::VolumeUp,
        KeyCode::Char('-') => InputEvent::VolumeDown,
        KeyCode::Char('q') => InputEvent::Shutdown,
        KeyCode::Char(c @ '1'..='9') => InputEvent::Touch(c as usize - '1' as usize),
        _ => return None,
    };
    Some(input)
}
