//! Board and prompt widgets.

use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Widget};

use th_core::{Cell, Session};

/// Widget for rendering the full board snapshot: title, column ruler, the
/// grid symbols, the current position and the remaining candidate cells.
///
/// The symbol overlay is derived on the fly from the board and the game
/// state; it is a view, never a source of truth.
pub struct BoardWidget<'a> {
    session: &'a Session,
}

impl<'a> BoardWidget<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    fn symbol(&self, cell: Cell) -> (char, Style) {
        if cell == self.session.position() {
            return ('X', Style::default().fg(Color::White).bold());
        }
        if self.session.candidates().contains(&cell) {
            return ('$', Style::default().fg(Color::Yellow));
        }
        match self.session.board().kind(cell) {
            Some(kind) if !kind.is_clear() => ('#', Style::default().fg(Color::DarkGray)),
            _ => ('.', Style::default().fg(Color::Gray)),
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.session.board();
        let mut lines: Vec<Line> = Vec::with_capacity(board.rows() + 6);

        lines.push(Line::from(Span::styled(
            "  TREASURE HUNT BOARD",
            Style::default().bold(),
        )));
        lines.push(Line::default());

        // Column ruler. Single digits keep the ruler aligned with the grid;
        // boards wider than ten columns wrap the digit.
        let ruler: String = (0..board.cols())
            .map(|c| format!("{} ", c % 10))
            .collect();
        lines.push(Line::from(Span::styled(
            format!("    {}", ruler.trim_end()),
            Style::default().fg(Color::DarkGray),
        )));

        for row in 0..board.rows() {
            let mut spans = vec![Span::styled(
                format!("{:>2}: ", row),
                Style::default().fg(Color::DarkGray),
            )];
            for col in 0..board.cols() {
                let (symbol, style) = self.symbol(Cell::new(row as i32, col as i32));
                spans.push(Span::styled(symbol.to_string(), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::default());
        lines.push(Line::from(format!(
            "current position (X): {}",
            self.session.position()
        )));

        let candidates = self.session.candidates();
        lines.push(Line::from(format!(
            "possible treasure locations left: {}",
            candidates.len()
        )));
        let listed: String = candidates
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        lines.push(Line::from(Span::styled(
            format!("  {listed}"),
            Style::default().fg(Color::Yellow),
        )));

        Paragraph::new(lines).render(area, buf);
    }
}

/// Widget for the status message and the command prompt.
pub struct PromptWidget<'a> {
    message: Option<&'a str>,
    input: &'a str,
}

impl<'a> PromptWidget<'a> {
    pub fn new(message: Option<&'a str>, input: &'a str) -> Self {
        Self { message, input }
    }
}

impl Widget for PromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message = Line::from(Span::styled(
            self.message.unwrap_or(""),
            Style::default().fg(Color::LightRed),
        ));
        let prompt = Line::from(vec![
            Span::styled("input > ", Style::default().fg(Color::Green)),
            Span::raw(self.input),
            Span::styled("_", Style::default().fg(Color::DarkGray)),
        ]);
        Paragraph::new(vec![message, prompt]).render(area, buf);
    }
}
