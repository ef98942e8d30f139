//! Visualization mode for watching extracted paths
//!
//! This module implements a TUI-based visualization mode that loads a
//! trained Q-table, extracts the greedy path from a chosen start cell and
//! replays the robot walking it. Users can control playback speed, pause,
//! and restart the walk.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - R: Restart the walk
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - Q/Esc: Quit
//!
//! # Example
//!
//! ```rust,ignore
//! use warehouse_rl::grid::Cell;
//! use warehouse_rl::modes::VisualizeMode;
//! use std::path::Path;
//!
//! let mut visualize_mode = VisualizeMode::new(
//!     Path::new("models/warehouse_q.bin"),
//!     Cell::new(9, 0),
//! )?;
//! visualize_mode.run().await?;
//! ```

use anyhow::{anyhow, ensure, Context, Result};
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
use tokio::time::{interval, Interval};

use crate::grid::{Cell, Warehouse};
use crate::render::{Renderer, WalkView};
use crate::rl::{extract_greedy_path, load_table, GreedyPath, PathOutcome};

/// Visualization speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationSpeed {
    /// Slow: 2 Hz (500ms per step)
    Slow,
    /// Normal: 8 Hz (125ms per step)
    Normal,
    /// Fast: 20 Hz (50ms per step)
    Fast,
    /// Very Fast: 60 Hz (16ms per step)
    VeryFast,
}

impl VisualizationSpeed {
    /// Get the tick interval for this speed
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => Duration::from_millis(16),
        }
    }

    /// Get a string representation of the speed
    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

/// Visualization mode for replaying a greedy path
pub struct VisualizeMode {
    /// Warehouse the path runs through, rebuilt from the saved metadata
    env: Warehouse,

    /// The extracted greedy path
    path: GreedyPath,

    /// Renderer for TUI display
    renderer: Renderer,

    /// Whether to quit the visualization
    should_quit: bool,

    /// Whether playback is paused
    paused: bool,

    /// Current playback speed
    speed: VisualizationSpeed,

    /// Index of the robot's current cell on the path
    step: usize,

    /// Number of completed replays of the walk
    replays: usize,
}

impl VisualizeMode {
    /// Create a new visualization mode
    ///
    /// Loads a trained Q-table from the specified path, rebuilds the
    /// environment it was trained on from the saved metadata, and extracts
    /// the greedy path from `start`.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the saved Q-table file
    /// * `start` - Cell the walk begins at
    ///
    /// # Returns
    ///
    /// A new VisualizeMode instance or an error if loading fails
    pub fn new(model_path: &Path, start: Cell) -> Result<Self> {
        // Load trained table
        let (table, metadata) = load_table(model_path)
            .with_context(|| format!("Failed to load Q-table from {:?}", model_path))?;

        // Rebuild the environment the table was trained on
        let env = Warehouse::new(metadata.grid_config.clone()).map_err(|err| anyhow!(err))?;
        ensure!(
            env.contains(start),
            "Start cell {} is outside the {}x{} grid",
            start,
            env.rows(),
            env.cols()
        );
        let path = extract_greedy_path(
            &table,
            &env,
            start,
            metadata.qlearning_config.max_path_length,
        );

        // Print loaded table info
        println!("{}", "=".repeat(60));
        println!("Loaded Q-table Information");
        println!("{}", "=".repeat(60));
        println!("Model path: {:?}", model_path);
        println!("Episodes trained: {}", metadata.episodes_trained);
        println!(
            "Grid size: {}x{}",
            metadata.grid_config.rows, metadata.grid_config.cols
        );
        println!("Goal: {}", metadata.grid_config.goal);
        println!("Version: {}", metadata.version);
        println!("{}", "=".repeat(60));
        println!();

        match path.outcome {
            PathOutcome::TerminalStart => {
                println!("Nothing to animate: start cell {} is terminal.", start);
            }
            PathOutcome::Truncated => {
                println!(
                    "Warning: the greedy walk from {} reached no terminal cell within {} cells; replaying the truncated walk.",
                    start,
                    path.len()
                );
            }
            PathOutcome::Complete => {
                if let Some(last) = path.last() {
                    println!(
                        "Greedy path from {}: {} cells, ending at {}.",
                        start,
                        path.len(),
                        last
                    );
                }
            }
        }
        println!();

        Ok(Self {
            env,
            path,
            renderer: Renderer::new(),
            should_quit: false,
            paused: false,
            speed: VisualizationSpeed::Normal,
            step: 0,
            replays: 0,
        })
    }

    /// Run the visualization loop
    ///
    /// Sets up the terminal, runs the main visualization loop, and cleans up
    /// on exit. Returns immediately when there is nothing to animate.
    ///
    /// # Returns
    ///
    /// `Ok(())` on successful completion
    pub async fn run(&mut self) -> Result<()> {
        if self.path.is_empty() {
            return Ok(());
        }

        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run visualization loop
        let result = self.run_visualization_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    /// Main visualization loop
    async fn run_visualization_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Walk ticks based on speed
        let mut tick_timer = interval(self.speed.tick_interval());

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle keyboard input
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                // Walk tick
                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.advance();
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.render_frame(frame);
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

    /// Advance the robot one cell, replaying from the start after the final
    /// frame
    fn advance(&mut self) {
        if self.step + 1 < self.path.len() {
            self.step += 1;
        } else {
            // Auto-restart
            self.step = 0;
            self.replays += 1;
        }
    }

    /// Handle keyboard events
    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.should_quit = true;
                }
                KeyCode::Char(' ') => {
                    self.paused = !self.paused;
                }
                KeyCode::Char('r') => {
                    // Manual restart
                    self.step = 0;
                    self.replays += 1;
                }
                KeyCode::Char('1') => {
                    self.change_speed(VisualizationSpeed::Slow, tick_timer);
                }
                KeyCode::Char('2') => {
                    self.change_speed(VisualizationSpeed::Normal, tick_timer);
                }
                KeyCode::Char('3') => {
                    self.change_speed(VisualizationSpeed::Fast, tick_timer);
                }
                KeyCode::Char('4') => {
                    self.change_speed(VisualizationSpeed::VeryFast, tick_timer);
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Change the visualization speed
    fn change_speed(&mut self, new_speed: VisualizationSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        tick_timer.reset_after(self.speed.tick_interval());
    }

    /// Render the current frame
    fn render_frame(&self, frame: &mut ratatui::Frame) {
        let view = WalkView {
            env: &self.env,
            path: &self.path,
            step: self.step,
            speed: self.speed.as_str(),
            paused: self.paused,
            replays: self.replays,
        };

        self.renderer.render(frame, &view);
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
