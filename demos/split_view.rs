use std::{io, ops::ControlFlow};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, BorderType, Borders, Paragraph},
    Terminal,
};

use portfolio_terminal::{util as term_util, Host, Repl};

const SECTIONS: [&str; 5] = ["about", "experience", "projects", "contributions", "contact"];

/// A fake page: highlights the section the terminal navigated to and lists opened links.
#[derive(Default)]
struct Page {
    current: Option<String>,
    opened: Vec<String>,
}

impl Host for Page {
    fn navigate_to_section(&mut self, section_id: &str) {
        self.current = Some(section_id.to_string());
    }

    fn open_resource(&mut self, url: &str) {
        self.opened.push(url.to_string());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = render(&mut terminal);

    // restore terminal
    crossterm::terminal::disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(res?)
}

fn render<B: Backend>(term: &mut Terminal<B>) -> io::Result<()> {
    let mut page = Page::default();
    let mut repl = Repl::new();

    loop {
        term.draw(|f| {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .border_type(BorderType::Rounded);

            let size = f.size();
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)].as_ref())
                .split(size);

            let page_block = block.clone().title("page");
            let page_area = page_block.inner(chunks[1]);
            let mut lines: Vec<Spans> = SECTIONS
                .iter()
                .map(|s| {
                    if page.current.as_deref() == Some(*s) {
                        Spans::from(Span::styled(
                            format!("> #{}", s),
                            Style::default().add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Spans::from(format!("  #{}", s))
                    }
                })
                .collect();
            lines.push(Spans::from(""));
            lines.extend(page.opened.iter().map(|url| Spans::from(format!("opened {}", url))));
            let lines = term_util::visible_lines(&lines, page_area.height as usize).to_vec();
            f.render_widget(page_block, chunks[1]);
            f.render_widget(Paragraph::new(lines), page_area);

            let repl_block = block.title("terminal");
            let repl_area = repl_block.inner(chunks[0]);
            f.render_widget(repl_block, chunks[0]);
            f.render_widget(&mut repl, repl_area);
            let (cursor_x, cursor_y) = repl.cursor_pos_in(repl_area);
            f.set_cursor(cursor_x + repl_area.left(), cursor_y + repl_area.top());
        })?;

        if let Event::Key(key) = event::read()? {
            if let ControlFlow::Break(()) = repl.feed_key_event(&mut page, key) {
                return Ok(());
            }
        }
    }
}
