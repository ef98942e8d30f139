use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::grid::{Cell, Warehouse};
use crate::rl::{GreedyPath, PathOutcome};

/// Everything the renderer needs for one animation frame
pub struct WalkView<'a> {
    /// Environment whose grid is drawn
    pub env: &'a Warehouse,
    /// The extracted greedy path being replayed
    pub path: &'a GreedyPath,
    /// Index into the path of the robot's current cell
    pub step: usize,
    /// Label of the current playback speed
    pub speed: &'static str,
    /// Whether playback is paused
    pub paused: bool,
    /// Completed replays of the walk
    pub replays: usize,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &WalkView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Grid area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        // Render header with walk status
        let status = self.render_status(chunks[0], view);
        frame.render_widget(status, chunks[0]);

        // Center the grid horizontally
        let grid_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(grid_area, view);
        frame.render_widget(grid, grid_area);

        // Render footer with controls
        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, view: &WalkView) -> Paragraph<'_> {
        let robot = view.path.cells.get(view.step).copied();
        let trail = &view.path.cells[..view.step.min(view.path.cells.len())];
        let env = view.env;
        let mut lines = Vec::new();

        for row in 0..env.rows() {
            let mut spans = Vec::new();

            for col in 0..env.cols() {
                let cell = Cell::new(row, col);

                let span = if robot == Some(cell) {
                    // Robot - distinct color
                    Span::styled(
                        "■ ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else if cell == env.goal() {
                    // Goal (item packaging area)
                    Span::styled(
                        "O ",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if trail.contains(&cell) {
                    // Cells already walked this replay
                    Span::styled("□ ", Style::default().fg(Color::Blue))
                } else if env.is_terminal(cell) {
                    // Shelving
                    Span::styled("■ ", Style::default().fg(Color::Gray))
                } else {
                    // Open aisle
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Warehouse "),
            )
            .alignment(Alignment::Center)
    }

    fn render_status(&self, _area: Rect, view: &WalkView) -> Paragraph<'_> {
        let mut spans = vec![
            Span::styled("Step: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{}/{}", view.step + 1, view.path.len()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Walk: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                (view.replays + 1).to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.speed, Style::default().fg(Color::White)),
        ];

        if view.paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        if view.path.outcome == PathOutcome::Truncated {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "TRUNCATED",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" to pause | "),
            Span::styled("R", Style::default().fg(Color::Cyan)),
            Span::raw(" to restart | "),
            Span::styled("1-4", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
