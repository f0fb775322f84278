//! Application state and main UI controller.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use th_core::{Command, GameMode, GameStatus, Session, TreasureCheck, TurnReport, command};

use crate::widgets::{BoardWidget, PromptWidget};

/// UI mode - what the app is currently displaying/waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Normal gameplay: the board plus the command prompt.
    Playing,
    /// Showing the help screen.
    Help,
    /// The game ended; waiting for a replay/quit decision.
    GameOver { won: bool },
}

/// Application controller: owns the session and the line-edit input buffer.
pub struct App {
    session: Session,
    mode: UiMode,
    input: String,
    message: Option<String>,
    should_quit: bool,
    replay_requested: bool,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            mode: UiMode::Playing,
            input: String::new(),
            message: None,
            should_quit: false,
            replay_requested: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True once, after the player asked for a new game.
    pub fn take_replay_request(&mut self) -> bool {
        std::mem::take(&mut self.replay_requested)
    }

    /// Install a freshly loaded session (replay).
    pub fn replace_session(&mut self, session: Session) {
        self.session = session;
        self.mode = UiMode::Playing;
        self.input.clear();
        self.message = None;
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Feed one terminal event to the app. Returns the turn report when the
    /// event completed a movement command; the caller applies pacing and
    /// then calls [`App::finish_turn`].
    pub fn handle_event(&mut self, event: Event) -> Option<TurnReport> {
        let Event::Key(key) = event else { return None };
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match self.mode {
            UiMode::Playing => self.handle_prompt_input(key),
            UiMode::Help => {
                self.mode = UiMode::Playing;
                None
            }
            UiMode::GameOver { .. } => {
                match key.code {
                    KeyCode::Enter => self.replay_requested = true,
                    KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                    _ => {}
                }
                None
            }
        }
    }

    fn handle_prompt_input(&mut self, key: KeyEvent) -> Option<TurnReport> {
        match key.code {
            KeyCode::Enter => self.submit_line(),
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Esc => {
                self.input.clear();
                None
            }
            KeyCode::Char(c) if c.is_ascii_graphic() || c == ' ' => {
                self.input.push(c);
                None
            }
            _ => None,
        }
    }

    fn submit_line(&mut self) -> Option<TurnReport> {
        let line = std::mem::take(&mut self.input);
        self.message = None;

        match command::parse(&line, self.session.config().mode) {
            Ok(Command::Quit) => {
                self.should_quit = true;
                None
            }
            Ok(Command::Help) => {
                self.mode = UiMode::Help;
                None
            }
            Ok(Command::Move { direction, steps }) => {
                Some(self.session.play_turn(direction, steps))
            }
            Err(err) => {
                self.message = Some(err.to_string());
                None
            }
        }
    }

    /// Apply the visible outcome of a processed turn.
    pub fn finish_turn(&mut self, report: &TurnReport) {
        self.message = report.message.clone();
        match report.check {
            Some(TreasureCheck::Found) => {
                self.mode = UiMode::GameOver { won: true };
                return;
            }
            Some(TreasureCheck::Empty) => {
                self.message = Some("no treasure here..".to_string());
            }
            None => {}
        }
        if report.status == GameStatus::Lost {
            self.mode = UiMode::GameOver { won: false };
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(self.session.board().rows() as u16 + 8),
                Constraint::Length(2),
            ])
            .split(frame.area());

        frame.render_widget(BoardWidget::new(&self.session), chunks[0]);
        frame.render_widget(
            PromptWidget::new(self.message.as_deref(), &self.input),
            chunks[1],
        );

        match self.mode {
            UiMode::Playing => {}
            UiMode::Help => self.render_help(frame),
            UiMode::GameOver { won } => self.render_game_over(frame, won),
        }
    }

    fn render_help(&self, frame: &mut Frame) {
        let directions = match self.session.config().mode {
            GameMode::Free => "up/north, right/east, down/south, left/west",
            GameMode::Locked => "up/north, right/east, down/south (each usable once)",
        };
        let lines = vec![
            Line::from("Move with: <direction> <steps>"),
            Line::from(format!("  directions: {directions}")),
            Line::from("  example: down 2"),
            Line::default(),
            Line::from("Stand on a '$' cell to check it for the treasure."),
            Line::default(),
            Line::from("  help - show this screen"),
            Line::from("  q    - quit the game"),
            Line::default(),
            Line::from(Span::styled(
                "press any key to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().borders(Borders::ALL).title(" Help ");
        let area = centered_rect(50, 14, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_game_over(&self, frame: &mut Frame, won: bool) {
        let (title, headline, style) = if won {
            (
                " You won! ",
                "Congratulations! You found the treasure!",
                Style::default().fg(Color::Green).bold(),
            )
        } else {
            (
                " Game over ",
                "Game Over, no more steps available for you!",
                Style::default().fg(Color::Red).bold(),
            )
        };
        let lines = vec![
            Line::from(Span::styled(headline, style)),
            Line::default(),
            Line::from(format!("treasure location: {}", self.session.treasure())),
            Line::default(),
            Line::from(Span::styled(
                "press Enter to play again, or 'q' to quit",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        let block = Block::default().borders(Borders::ALL).title(title);
        let area = centered_rect(50, 9, frame.area());
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

/// A rectangle of the given size centered in `area`, clamped to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
