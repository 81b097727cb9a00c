//! One terminal session: scrollback, recall, the pending input line and an
//! optional word-guess game, all driven by [Session::dispatch].

use std::{iter, mem};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    config::{Config, Theme},
    game::WordGuess,
    parser::ParsedCommand,
    recall::{RecallBuffer, DEFAULT_RECALL},
    registry::{self, Context, Output},
    scrollback::{HistoryEntry, Scrollback},
    util,
};

/// The page around the terminal.
pub trait Host {
    /// Bring the page section with the given id into view.
    fn navigate_to_section(&mut self, section_id: &str);
    /// Open a URL in a new tab or viewer. Fire and forget.
    fn open_resource(&mut self, url: &str);
}

impl Host for () {
    fn navigate_to_section(&mut self, section_id: &str) {
        log::debug!("No host attached, ignoring navigation to '{}'", section_id);
    }

    fn open_resource(&mut self, url: &str) {
        log::debug!("No host attached, ignoring open of '{}'", url);
    }
}

impl<H: Host + ?Sized> Host for &mut H {
    fn navigate_to_section(&mut self, section_id: &str) {
        (**self).navigate_to_section(section_id)
    }

    fn open_resource(&mut self, url: &str) {
        (**self).open_resource(url)
    }
}

/// Result of a tab completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched, input untouched
    None,
    /// The input was extended
    Completed,
    /// Several names match and share nothing beyond what was typed
    Candidates(Vec<String>),
}

#[derive(Debug)]
pub struct Session<const N: usize> {
    config: Config,
    scrollback: Scrollback,
    recall: RecallBuffer<N>,
    game: Option<WordGuess>,
    input: String,
    /// What was typed before recall browsing started
    draft: String,
    theme: Option<Theme>,
    rng: StdRng,
}

impl Session<DEFAULT_RECALL> {
    pub fn new(config: Config) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A session whose random choices are reproducible.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl Default for Session<DEFAULT_RECALL> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<const N: usize> Session<N> {
    pub fn with_rng(config: Config, rng: StdRng) -> Self {
        Self {
            scrollback: Scrollback::new(config.boot.clone()),
            recall: RecallBuffer::new(),
            game: None,
            input: String::new(),
            draft: String::new(),
            theme: config.theme,
            config,
            rng,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        self.scrollback.entries()
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn recall(&self) -> &RecallBuffer<N> {
        &self.recall
    }

    /// Position of the recalled line counted from the newest, none while not browsing
    pub fn recall_cursor(&self) -> Option<usize> {
        self.recall.cursor()
    }

    pub fn game(&self) -> Option<&WordGuess> {
        self.game.as_ref()
    }

    pub fn is_game_active(&self) -> bool {
        self.game.is_some()
    }

    pub fn theme(&self) -> Option<Theme> {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme = theme;
    }

    /// The pending input line
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    /// Append a host-provided line, e.g. an easter egg the page detected.
    pub fn notify(&mut self, text: impl Into<String>) {
        self.scrollback.push(HistoryEntry::output(text));
    }

    /// Drop the pending input and stop browsing recall.
    pub fn discard_input(&mut self) {
        self.input.clear();
        self.draft.clear();
        self.recall.reset_cursor();
    }

    /// Reset the scrollback to the boot sequence and drop the pending input.
    pub fn clear(&mut self) {
        self.scrollback.reset();
        self.discard_input();
    }

    /// Dispatch the pending input line. A blank line is ignored and left in place.
    pub fn submit(&mut self, host: &mut impl Host) {
        if self.input.trim().is_empty() {
            return;
        }
        let line = mem::take(&mut self.input);
        self.dispatch(&line, host);
    }

    /// Handle one submitted line end to end.
    ///
    /// While a game is running every line goes to the game. Otherwise the line
    /// is parsed and run through the registry, and side effects are sent to
    /// `host`. Each call either completes fully or, for a blank line, changes
    /// nothing.
    pub fn dispatch(&mut self, line: &str, host: &mut impl Host) {
        let raw = line.trim();
        if raw.is_empty() {
            return;
        }

        if let Some(game) = self.game.as_mut() {
            let turn = game.guess(raw);
            log::debug!("Game turn: {:?}", turn);
            if turn.is_over() {
                self.game = None;
            }
            self.record(raw, turn.to_string());
            return;
        }

        let parsed = ParsedCommand::parse(raw);
        log::debug!("Dispatching {:?}", parsed);

        let mut ctx = Context {
            config: &self.config,
            theme: self.theme,
            rng: &mut self.rng,
        };
        let text = match registry::execute(&mut ctx, &parsed) {
            Output::Text(text) => text,
            Output::Clear => {
                self.clear();
                return;
            }
            Output::Navigate { section, text } => {
                host.navigate_to_section(section);
                text.unwrap_or_else(|| format!("Navigating to {}...", section))
            }
            Output::Open { url, label } => {
                log::debug!("Opening {}", url);
                host.open_resource(&url);
                format!("Opening {}...", label)
            }
            Output::StartGame => match WordGuess::start(&mut self.rng, &self.config.words) {
                Some(game) => {
                    let prompt = game.opening_prompt();
                    self.game = Some(game);
                    prompt
                }
                None => {
                    log::warn!("Word-guess game requested without a usable word");
                    "No words to play with right now.".into()
                }
            },
            Output::RecallListing => self
                .recall
                .iter()
                .chain(iter::once(raw))
                .enumerate()
                .map(|(i, line)| format!("  {}  {}", i + 1, line))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        self.record(raw, text);
    }

    fn record(&mut self, raw: &str, output: String) {
        self.scrollback
            .extend([HistoryEntry::command(raw), HistoryEntry::output(output)]);
        self.recall.push(raw.to_string());
        self.input.clear();
        self.draft.clear();
    }

    /// Up arrow: show the next older submission in the input line.
    pub fn recall_prev(&mut self) {
        let was_browsing = self.recall.is_browsing();
        let Some(line) = self.recall.prev().map(str::to_owned) else {
            return;
        };
        if was_browsing {
            self.input = line;
        } else {
            self.draft = mem::replace(&mut self.input, line);
        }
    }

    /// Down arrow: show the next newer submission, or what was typed before browsing.
    pub fn recall_next(&mut self) {
        if !self.recall.is_browsing() {
            return;
        }
        self.input = match self.recall.next() {
            Some(line) => line.to_owned(),
            None => mem::take(&mut self.draft),
        };
    }

    /// Tab: complete a command name, or the argument of `open`.
    pub fn complete(&mut self) -> Completion {
        if self.game.is_some() {
            return Completion::None;
        }

        let typed = self.input.trim_start();
        let (head, partial, candidates): (&str, &str, Vec<&str>) =
            match typed.split_once(char::is_whitespace) {
                None => ("", typed, registry::completion_names().collect()),
                Some((cmd, rest))
                    if registry::canonical_name(&cmd.to_lowercase()) == "open"
                        && !rest.trim_start().contains(char::is_whitespace) =>
                {
                    (cmd, rest.trim_start(), registry::open_targets(&self.config))
                }
                Some(_) => return Completion::None,
            };

        let partial = partial.to_lowercase();
        let mut matches: Vec<String> = candidates
            .into_iter()
            .filter(|c| c.starts_with(&partial))
            .map(String::from)
            .collect();
        matches.dedup();

        let completed = match matches.as_slice() {
            [] => return Completion::None,
            [only] => only.clone(),
            _ => {
                let common = util::common_prefix(&matches);
                if common.chars().count() <= partial.chars().count() {
                    return Completion::Candidates(matches);
                }
                common.to_string()
            }
        };

        self.input = if head.is_empty() {
            completed
        } else {
            format!("{} {}", head, completed)
        };
        Completion::Completed
    }
}
