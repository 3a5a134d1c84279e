//! Main application state and event loop

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;
use std::time::Duration;
use tracing::{debug, info};

use crate::data::loader;
use crate::settings::DashboardSettings;
use crate::themes::Theme;
use crate::ui::{HelpOverlay, StatusBar};
use crate::views::dashboard::{DashboardView, TITLE};
use crate::views::{ViewAction, ViewTrait};

/// Main application
pub struct App {
    theme: Theme,
    dashboard: DashboardView,
    help_overlay: HelpOverlay,
    should_quit: bool,
}

impl App {
    /// Build the app from settings, loading the configured dataset
    pub fn new(settings: &DashboardSettings) -> Result<Self> {
        let data_path = settings.data_path();
        let funds = loader::load_dataset(data_path.as_deref())
            .context("Failed to load fund dataset")?;
        info!("Dashboard starting with {} funds", funds.len());
        Ok(Self::with_funds(funds, settings))
    }

    pub fn with_funds(funds: Vec<crate::data::FundProduct>, settings: &DashboardSettings) -> Self {
        let theme = Theme::from_settings(&settings.theme);
        Self {
            dashboard: DashboardView::new(funds, settings, theme.clone()),
            theme,
            help_overlay: HelpOverlay::new(),
            should_quit: false,
        }
    }

    pub fn dashboard(&self) -> &DashboardView {
        &self.dashboard
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw one frame: dashboard, status bar, help overlay
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        self.dashboard.render(frame, chunks[0])?;

        let status = self
            .dashboard
            .status_metrics()
            .into_iter()
            .fold(StatusBar::new(&self.theme, TITLE), |bar, (label, value)| {
                bar.metric(label, value)
            });
        frame.render_widget(status, chunks[1]);

        if self.help_overlay.visible {
            self.help_overlay.render(area, frame.buffer_mut(), &self.theme);
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<()> {
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        loop {
            let mut draw_result = Ok(());
            terminal.draw(|f| {
                draw_result = self.draw(f);
            })?;
            draw_result?;

            // Handle events
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let should_quit = self.handle_key(key.code, key.modifiers)?;
                        if should_quit {
                            break;
                        }
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        info!("Dashboard exiting");
        Ok(())
    }

    /// Dispatch a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> Result<bool> {
        if modifiers.contains(KeyModifiers::CONTROL) && key == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(true);
        }

        // Any key closes the help overlay
        if self.help_overlay.visible {
            self.help_overlay.hide();
            return Ok(false);
        }

        // Text input gets every key
        if !self.dashboard.captures_input() {
            match key {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Ok(true);
                }
                KeyCode::Char('?') => {
                    self.help_overlay.toggle();
                    return Ok(false);
                }
                _ => {}
            }
        }

        debug!("Key {:?}", key);
        match self.dashboard.handle_key(key)? {
            ViewAction::Continue => Ok(false),
            ViewAction::Quit => {
                self.should_quit = true;
                Ok(true)
            }
        }
    }
}
