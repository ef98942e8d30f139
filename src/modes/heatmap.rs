//! Heatmap mode for inspecting a learned table
//!
//! This module loads a saved Q-table and displays the per-cell maximum
//! values as an annotated, color-bucketed grid until dismissed. High-value
//! cells sit on the learned routes to the goal, so the picture makes the
//! policy legible at a glance.
//!
//! # Controls
//!
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io::{stderr, Stderr},
    path::Path,
    time::Duration,
};
use tokio::time::interval;

use crate::render::HeatmapRenderer;
use crate::rl::{load_table, QTable};

/// Heatmap mode for a saved Q-table
pub struct HeatmapMode {
    /// Loaded table whose values are displayed
    table: QTable,

    /// Renderer for TUI display
    renderer: HeatmapRenderer,

    /// Whether to quit the display
    should_quit: bool,
}

impl HeatmapMode {
    /// Create a new heatmap mode
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the saved Q-table file
    pub fn new(model_path: &Path) -> Result<Self> {
        let (table, _metadata) = load_table(model_path)
            .with_context(|| format!("Failed to load Q-table from {:?}", model_path))?;

        Ok(Self {
            table,
            renderer: HeatmapRenderer::new(),
            should_quit: false,
        })
    }

    /// Run the heatmap display until dismissed
    ///
    /// # Returns
    ///
    /// `Ok(())` on successful completion
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_display_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Main display loop
    async fn run_display_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // The picture is static; redraw slowly to track terminal resizes
        let mut render_timer = interval(Duration::from_millis(100));

        loop {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.table);
                    }).context("Failed to draw frame")?;
                }

                // Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle keyboard events
    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return;
            }

            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
        }
    }

    /// Cleanup terminal state
    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
