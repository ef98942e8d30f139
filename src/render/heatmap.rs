//! Heatmap rendering of learned values
//!
//! Reduces a Q-table to its per-cell maximum and renders an annotated,
//! color-bucketed grid of those values, a quick picture of what each cell is
//! worth under the learned policy.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use ndarray::Array2;

use crate::rl::QTable;

pub struct HeatmapRenderer;

impl HeatmapRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, table: &QTable) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Heatmap area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let max_q = table.max_per_cell();
        let (min, max) = value_range(&max_q);

        let header = self.render_header(chunks[0], min, max);
        frame.render_widget(header, chunks[0]);

        let grid = self.render_values(chunks[1], &max_q, min, max);
        frame.render_widget(grid, chunks[1]);

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_header(&self, _area: Rect, min: f64, max: f64) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled(
                "Max Q per cell",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("min: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:.1}", min), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled("max: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{:.1}", max), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_values(&self, _area: Rect, max_q: &Array2<f64>, min: f64, max: f64) -> Paragraph<'_> {
        let (rows, cols) = max_q.dim();
        let mut lines = Vec::new();

        for row in 0..rows {
            let mut spans = Vec::new();
            for col in 0..cols {
                let value = max_q[[row, col]];
                let color = value_color(normalize(value, min, max));
                spans.push(Span::styled(
                    format!("{:>7.1}", value),
                    Style::default().fg(color),
                ));
            }
            lines.push(Line::from(spans));
            // Blank line between rows keeps the annotations readable.
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Learned Values "),
            )
            .alignment(Alignment::Center)
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for HeatmapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Smallest and largest value in the grid.
fn value_range(values: &Array2<f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &value in values {
        if value < min {
            min = value;
        }
        if value > max {
            max = value;
        }
    }
    (min, max)
}

/// Position of `value` inside [min, max] as a fraction, 0.0 when the range
/// is degenerate.
fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.0
    }
}

/// Five-bucket cold-to-warm color ramp over the normalized value.
fn value_color(norm: f64) -> Color {
    if norm < 0.2 {
        Color::DarkGray
    } else if norm < 0.4 {
        Color::Blue
    } else if norm < 0.6 {
        Color::Cyan
    } else if norm < 0.8 {
        Color::Green
    } else {
        Color::Yellow
    }
}
