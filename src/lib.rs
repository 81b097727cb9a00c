pub mod config;
pub mod game;
pub mod parser;
pub mod recall;
pub mod registry;
pub mod scrollback;
pub mod session;

pub mod util;

use std::{io, ops::ControlFlow};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    },
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Span, Spans, Text},
    widgets::{Paragraph, Widget},
    Terminal,
};

pub use config::{Config, ConfigError, Theme};
pub use recall::DEFAULT_RECALL;
pub use scrollback::{EntryKind, HistoryEntry};
pub use session::{Completion, Host, Session};

const PROMPT: &str = "$ ";

/// A terminal widget driving a [Session] from crossterm key events.
#[derive(Debug)]
pub struct Repl<const RECALL: usize> {
    session: Session<RECALL>,
    /// Cursor position counted in chars from the end of the input
    cursor_pos: u16,
}

impl Repl<DEFAULT_RECALL> {
    pub fn new() -> Self {
        Self::new_with_session(Session::default())
    }
}

impl Default for Repl<DEFAULT_RECALL> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RECALL: usize> Repl<RECALL> {
    pub fn new_with_session(session: Session<RECALL>) -> Self {
        Self {
            session,
            cursor_pos: 0,
        }
    }

    pub fn run_fullscreen(&mut self, host: impl Host) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_on_terminal(&mut terminal, host);

        // restore terminal
        crossterm::terminal::disable_raw_mode()?;
        crossterm::execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    pub fn run_on_terminal<B: Backend>(
        &mut self,
        term: &mut Terminal<B>,
        mut host: impl Host,
    ) -> io::Result<()> {
        loop {
            term.draw(|f| {
                let size = f.size();
                let (cursor_x, cursor_y) = self.cursor_pos_in(size);
                f.set_cursor(size.x + cursor_x, size.y + cursor_y);
                f.render_widget(&mut *self, size);
            })?;

            if let Event::Key(key) = event::read()? {
                if let ControlFlow::Break(()) = self.feed_key_event(&mut host, key) {
                    return Ok(());
                }
            }
        }
    }

    pub fn feed_key_event(&mut self, host: &mut impl Host, key: KeyEvent) -> ControlFlow<()> {
        match key {
            KeyEvent {
                code: KeyCode::Char('d' | 'q'),
                modifiers: KeyModifiers::CONTROL,
            } => return ControlFlow::Break(()),
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            } => {
                self.session.discard_input();
                self.cursor_pos = 0;
            }
            KeyEvent {
                code: KeyCode::Char('l'),
                modifiers: KeyModifiers::CONTROL,
            } => {
                self.session.clear();
                self.cursor_pos = 0;
            }
            KeyEvent {
                code: code @ (KeyCode::Up | KeyCode::Down),
                modifiers: KeyModifiers::NONE,
            } => {
                if code == KeyCode::Up {
                    self.session.recall_prev();
                } else {
                    self.session.recall_next();
                }
                self.cursor_pos = 0;
            }
            KeyEvent {
                code: KeyCode::Tab,
                modifiers: KeyModifiers::NONE,
            } => {
                if let Completion::Candidates(names) = self.session.complete() {
                    self.session.notify(names.join("  "));
                }
                self.cursor_pos = 0;
            }
            KeyEvent {
                code: KeyCode::Right,
                modifiers: KeyModifiers::NONE,
            } => self.set_cursor_pos(self.cursor_pos.saturating_sub(1)),
            KeyEvent {
                code: KeyCode::Left,
                modifiers: KeyModifiers::NONE,
            } => self.set_cursor_pos(self.cursor_pos.saturating_add(1)),
            KeyEvent {
                code: KeyCode::Home,
                modifiers: _,
            } => {
                self.set_cursor_pos(self.input_len());
            }
            KeyEvent {
                code: KeyCode::End,
                modifiers: _,
            } => {
                self.set_cursor_pos(0);
            }
            KeyEvent {
                code: KeyCode::Char(c),
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            } => {
                let at = self.cursor_byte_offset();
                self.session.input_mut().insert(at, c);
            }
            KeyEvent {
                code: KeyCode::Backspace,
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            } => {
                self.set_cursor_pos(self.cursor_pos);
                let char_idx = self.input_len() - self.cursor_pos;
                if char_idx != 0 {
                    let at = util::byte_offset(self.session.input(), char_idx as usize - 1);
                    self.session.input_mut().remove(at);
                }
            }
            KeyEvent {
                code: KeyCode::Delete,
                modifiers: KeyModifiers::NONE,
            } => {
                self.set_cursor_pos(self.cursor_pos);
                if self.cursor_pos != 0 {
                    let at = self.cursor_byte_offset();
                    self.session.input_mut().remove(at);
                    self.cursor_pos -= 1;
                }
            }
            KeyEvent {
                code: KeyCode::Enter,
                modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            } => self.submit(host),
            _ => (),
        }

        ControlFlow::Continue(())
    }

    pub fn session(&self) -> &Session<RECALL> {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session<RECALL> {
        &mut self.session
    }

    fn input_len(&self) -> u16 {
        self.session.input().chars().count() as u16
    }

    fn cursor_byte_offset(&self) -> usize {
        let char_idx = self.input_len().saturating_sub(self.cursor_pos);
        util::byte_offset(self.session.input(), char_idx as usize)
    }

    /// Cursor position relative to the top left of `rect`
    pub fn cursor_pos_in(&self, rect: Rect) -> (u16, u16) {
        let rows = self.lines().len().min(rect.height.max(1) as usize) as u16;
        (
            (PROMPT.len() as u16 + self.input_len()).saturating_sub(self.cursor_pos),
            rows.saturating_sub(1),
        )
    }

    pub fn set_cursor_pos(&mut self, pos: u16) {
        self.cursor_pos = pos.clamp(0, self.input_len())
    }

    pub fn submit(&mut self, host: &mut impl Host) {
        self.set_cursor_pos(0);
        self.session.submit(host);
    }

    fn styles(&self) -> (Style, Style) {
        match self.session.theme() {
            Some(Theme::Light) => (
                Style::default().fg(Color::Blue),
                Style::default().fg(Color::DarkGray),
            ),
            Some(Theme::Dark) | None => (
                Style::default().fg(Color::Green),
                Style::default().fg(Color::Gray),
            ),
        }
    }

    /// Scrollback followed by the prompt line, one entry per screen row
    fn lines(&self) -> Vec<Spans<'_>> {
        let (prompt, muted) = self.styles();
        let mut lines = Vec::new();
        for entry in self.session.entries() {
            match entry.kind {
                EntryKind::Command => lines.push(Spans::from(vec![
                    Span::styled(PROMPT, prompt),
                    Span::raw(entry.text.as_str()),
                ])),
                // an empty output still takes a row
                EntryKind::Output if entry.text.is_empty() => {
                    lines.push(Spans::from(Span::styled("", muted)))
                }
                EntryKind::Output => lines.extend(
                    entry
                        .text
                        .lines()
                        .map(|line| Spans::from(Span::styled(format!("  {}", line), muted))),
                ),
            }
        }
        lines.push(Spans::from(vec![
            Span::styled(PROMPT, prompt),
            Span::raw(self.session.input()),
        ]));
        lines
    }
}

impl<const RECALL: usize> Widget for &mut Repl<RECALL> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let visible = util::visible_lines(&lines, area.height as usize).to_vec();
        Paragraph::new(Text::from(visible)).render(area, buf);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use tui::backend::TestBackend;

    #[derive(Default)]
    struct Sections(Vec<String>);

    impl Host for Sections {
        fn navigate_to_section(&mut self, section_id: &str) {
            self.0.push(section_id.into());
        }

        fn open_resource(&mut self, _url: &str) {}
    }

    fn repl() -> Repl<DEFAULT_RECALL> {
        Repl::new_with_session(Session::with_seed(Config::default(), 3))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(repl: &mut Repl<DEFAULT_RECALL>, host: &mut impl Host, line: &str) {
        for c in line.chars() {
            repl.feed_key_event(host, key(KeyCode::Char(c)));
        }
        repl.feed_key_event(host, key(KeyCode::Enter));
    }

    fn rows(backend: &TestBackend, width: u16, height: u16) -> Vec<String> {
        let buffer = backend.buffer();
        (0..height)
            .map(|y| (0..width).map(|x| buffer.get(x, y).symbol.clone()).collect())
            .collect()
    }

    #[test]
    fn typing_and_enter_dispatch() {
        let mut repl = repl();
        let mut host = Sections::default();
        type_line(&mut repl, &mut host, "work");
        assert_eq!(host.0, vec!["experience"]);
        assert_eq!(repl.session().input(), "");
        assert_eq!(
            repl.session().entries().last().unwrap().text,
            "Navigating to experience..."
        );
    }

    #[test]
    fn editing_in_the_middle() {
        let mut repl = repl();
        let mut host = ();
        for c in "hlp".chars() {
            repl.feed_key_event(&mut host, key(KeyCode::Char(c)));
        }
        repl.feed_key_event(&mut host, key(KeyCode::Left));
        repl.feed_key_event(&mut host, key(KeyCode::Left));
        repl.feed_key_event(&mut host, key(KeyCode::Char('e')));
        assert_eq!(repl.session().input(), "help");
        repl.feed_key_event(&mut host, key(KeyCode::Backspace));
        assert_eq!(repl.session().input(), "hlp");
        repl.feed_key_event(&mut host, key(KeyCode::Delete));
        assert_eq!(repl.session().input(), "hp");
        repl.feed_key_event(&mut host, key(KeyCode::End));
        repl.feed_key_event(&mut host, key(KeyCode::Backspace));
        assert_eq!(repl.session().input(), "h");
    }

    #[test]
    fn arrows_recall() {
        let mut repl = repl();
        let mut host = ();
        type_line(&mut repl, &mut host, "help");
        type_line(&mut repl, &mut host, "skills");
        let len = repl.session().entries().len();

        repl.feed_key_event(&mut host, key(KeyCode::Up));
        repl.feed_key_event(&mut host, key(KeyCode::Up));
        assert_eq!(repl.session().input(), "help");
        repl.feed_key_event(&mut host, key(KeyCode::Down));
        repl.feed_key_event(&mut host, key(KeyCode::Down));
        assert_eq!(repl.session().input(), "");
        assert_eq!(repl.session().recall_cursor(), None);
        assert_eq!(repl.session().entries().len(), len);
    }

    #[test]
    fn tab_completes_or_lists() {
        let mut repl = repl();
        let mut host = ();
        repl.feed_key_event(&mut host, key(KeyCode::Char('w')));
        let len = repl.session().entries().len();
        repl.feed_key_event(&mut host, key(KeyCode::Tab));
        assert_eq!(repl.session().entries().len(), len + 1);
        assert_eq!(repl.session().entries().last().unwrap().text, "work  wordle  whoami");

        repl.feed_key_event(&mut host, key(KeyCode::Char('h')));
        repl.feed_key_event(&mut host, key(KeyCode::Tab));
        assert_eq!(repl.session().input(), "whoami");
    }

    #[test]
    fn control_keys() {
        let mut repl = repl();
        let mut host = ();
        type_line(&mut repl, &mut host, "help");
        repl.feed_key_event(&mut host, key(KeyCode::Char('x')));
        repl.feed_key_event(&mut host, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(repl.session().input(), "");
        repl.feed_key_event(&mut host, KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert_eq!(repl.session().entries().len(), 3);
        assert_eq!(
            repl.feed_key_event(&mut host, KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            ControlFlow::Break(())
        );
    }

    #[test]
    fn renders_boot_and_prompt() {
        let (width, height) = (40, 6);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut repl = repl();
        terminal
            .draw(|f| {
                let size = f.size();
                f.render_widget(&mut repl, size);
            })
            .unwrap();

        let rows = rows(terminal.backend(), width, height);
        assert!(rows[0].starts_with("  [●] Initializing portfolio..."));
        assert!(rows[2].starts_with("  Type 'help' to start."));
        assert!(rows[3].starts_with("$ "));
        assert_eq!(repl.cursor_pos_in(Rect::new(0, 0, width, height)), (2, 3));
    }

    #[test]
    fn renders_tail_when_full() {
        let (width, height) = (40, 4);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut repl = repl();
        type_line(&mut repl, &mut (), "echo one");
        type_line(&mut repl, &mut (), "echo two");
        for c in "ab".chars() {
            repl.feed_key_event(&mut (), key(KeyCode::Char(c)));
        }
        terminal
            .draw(|f| {
                let size = f.size();
                f.render_widget(&mut repl, size);
            })
            .unwrap();

        let rows = rows(terminal.backend(), width, height);
        assert!(rows[0].starts_with("  one"));
        assert!(rows[1].starts_with("$ echo two"));
        assert!(rows[2].starts_with("  two"));
        assert!(rows[3].starts_with("$ ab"));
        assert_eq!(repl.cursor_pos_in(Rect::new(0, 0, width, height)), (4, 3));
    }

    #[test]
    fn empty_output_keeps_its_row() {
        let (width, height) = (40, 4);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let mut repl = repl();
        type_line(&mut repl, &mut (), "echo");
        terminal
            .draw(|f| {
                let size = f.size();
                f.render_widget(&mut repl, size);
            })
            .unwrap();

        let rows = rows(terminal.backend(), width, height);
        assert!(rows[1].starts_with("$ echo"));
        assert_eq!(rows[2].trim(), "");
        assert!(rows[3].starts_with("$ "));
        assert_eq!(repl.cursor_pos_in(Rect::new(0, 0, width, height)), (2, 3));
    }
}
