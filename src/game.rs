//! The word-guess mini-game that can take over the terminal's input.

use std::fmt::{self, Display, Formatter};

use rand::{seq::SliceRandom, Rng};

pub const WORD_LEN: usize = 5;
pub const MAX_ATTEMPTS: u32 = 6;

const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Whether `word` can be a target: exactly [WORD_LEN] lowercase ASCII letters.
pub(crate) fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LEN && word.bytes().all(|b| b.is_ascii_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterScore {
    /// Right letter, right position
    Exact,
    /// Letter occurs elsewhere in the target
    Present,
    Absent,
}

impl LetterScore {
    pub fn symbol(self) -> char {
        match self {
            LetterScore::Exact => '🟩',
            LetterScore::Present => '🟨',
            LetterScore::Absent => '⬛',
        }
    }
}

/// Per-position score of one guess, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback(Vec<LetterScore>);

impl Feedback {
    pub fn scores(&self) -> &[LetterScore] {
        &self.0
    }

    pub fn is_solved(&self) -> bool {
        self.0.iter().all(|s| *s == LetterScore::Exact)
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.0.iter().try_for_each(|s| write!(f, "{}", s.symbol()))
    }
}

/// Scores `guess` against `target`.
///
/// Exact matches are reserved first. The remaining target letters form a
/// multiset which the other guess positions consume left to right, so a letter
/// is only marked present as many times as it is still unaccounted for.
/// Both words must be lowercase ASCII of equal length.
pub fn score(target: &str, guess: &str) -> Feedback {
    let target = target.as_bytes();
    let guess = guess.as_bytes();
    debug_assert_eq!(target.len(), guess.len());

    let mut scores = vec![LetterScore::Absent; guess.len()];
    let mut leftover = [0u8; 26];

    for (i, (&t, &g)) in target.iter().zip(guess).enumerate() {
        if t == g {
            scores[i] = LetterScore::Exact;
        } else {
            leftover[(t - b'a') as usize] += 1;
        }
    }

    for (i, &g) in guess.iter().enumerate() {
        if scores[i] == LetterScore::Exact {
            continue;
        }
        let count = &mut leftover[(g - b'a') as usize];
        if *count > 0 {
            *count -= 1;
            scores[i] = LetterScore::Present;
        }
    }

    Feedback(scores)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guess {
    pub word: String,
    pub feedback: Feedback,
}

/// Result of feeding one line to an active game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Quit { target: String },
    /// Wrong length or not purely alphabetic; nothing was consumed
    Invalid,
    Miss { guess: Guess, attempts_remaining: u32 },
    Won { guess: Guess, attempts_used: u32 },
    Lost { guess: Guess, target: String },
}

impl Turn {
    /// Whether the game ends with this turn.
    pub fn is_over(&self) -> bool {
        matches!(self, Turn::Quit { .. } | Turn::Won { .. } | Turn::Lost { .. })
    }
}

fn write_guess(f: &mut Formatter, guess: &Guess) -> fmt::Result {
    let letters = guess
        .word
        .chars()
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(f, "{}", letters)?;
    write!(f, "{}", guess.feedback)
}

impl Display for Turn {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Turn::Quit { target } => {
                write!(f, "Game over. The word was {}.", target.to_ascii_uppercase())
            }
            Turn::Invalid => write!(
                f,
                "Guesses must be exactly {} letters (a-z). Type 'quit' to give up.",
                WORD_LEN
            ),
            Turn::Miss {
                guess,
                attempts_remaining,
            } => {
                write_guess(f, guess)?;
                write!(
                    f,
                    "\n{} attempt{} left.",
                    attempts_remaining,
                    if *attempts_remaining == 1 { "" } else { "s" }
                )
            }
            Turn::Won {
                guess,
                attempts_used,
            } => {
                write_guess(f, guess)?;
                write!(
                    f,
                    "\nYou got it in {}/{}! Type 'wordle' to play again.",
                    attempts_used, MAX_ATTEMPTS
                )
            }
            Turn::Lost { guess, target } => {
                write_guess(f, guess)?;
                write!(
                    f,
                    "\nOut of attempts. The word was {}.",
                    target.to_ascii_uppercase()
                )
            }
        }
    }
}

/// An active game. Dropping it is the transition back to "no game".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordGuess {
    target: String,
    attempts_remaining: u32,
    guesses: Vec<Guess>,
}

impl WordGuess {
    /// Starts a game with `target`, or `None` unless it is a lowercase ASCII word of [WORD_LEN] letters.
    pub fn new(target: impl Into<String>) -> Option<Self> {
        let target = target.into();
        if !is_valid_word(&target) {
            return None;
        }
        Some(Self {
            target,
            attempts_remaining: MAX_ATTEMPTS,
            guesses: Vec::new(),
        })
    }

    /// Starts a game with a target drawn uniformly from the usable `words`.
    ///
    /// Words that could not be a target are skipped. Returns `None` if none are left.
    pub fn start<R: Rng + ?Sized>(rng: &mut R, words: &[String]) -> Option<Self> {
        let usable: Vec<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|w| is_valid_word(w))
            .collect();
        if usable.len() < words.len() {
            log::warn!(
                "Skipping {} word(s) that are not {} lowercase letters",
                words.len() - usable.len(),
                WORD_LEN
            );
        }
        let target = *usable.choose(rng)?;
        log::debug!("Starting word-guess game");
        log::trace!("Word-guess target: {}", target);
        Self::new(target)
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }

    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    pub fn opening_prompt(&self) -> String {
        let slots = vec!["_"; WORD_LEN].join(" ");
        format!(
            "WORDLE: guess the {}-letter word. {} attempts left.\n{}\n{} exact  {} wrong spot  {} not in word. Type 'quit' to give up.",
            WORD_LEN,
            self.attempts_remaining,
            slots,
            LetterScore::Exact.symbol(),
            LetterScore::Present.symbol(),
            LetterScore::Absent.symbol(),
        )
    }

    /// Feeds one submitted line to the game.
    ///
    /// The caller must drop the game when the returned turn [is over](Turn::is_over).
    pub fn guess(&mut self, line: &str) -> Turn {
        let line = line.trim();
        if QUIT_WORDS.iter().any(|q| line.eq_ignore_ascii_case(q)) {
            return Turn::Quit {
                target: self.target.clone(),
            };
        }

        if line.chars().count() != WORD_LEN || !line.chars().all(|c| c.is_ascii_alphabetic()) {
            return Turn::Invalid;
        }

        let word = line.to_ascii_lowercase();
        let guess = Guess {
            feedback: score(&self.target, &word),
            word,
        };
        self.guesses.push(guess.clone());
        self.attempts_remaining = self.attempts_remaining.saturating_sub(1);

        if guess.feedback.is_solved() {
            Turn::Won {
                guess,
                attempts_used: MAX_ATTEMPTS - self.attempts_remaining,
            }
        } else if self.attempts_remaining == 0 {
            Turn::Lost {
                guess,
                target: self.target.clone(),
            }
        } else {
            Turn::Miss {
                guess,
                attempts_remaining: self.attempts_remaining,
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use LetterScore::*;

    #[test]
    fn scores_crane_trace() {
        assert_eq!(
            score("crane", "trace").scores(),
            &[Absent, Exact, Exact, Present, Exact]
        );
    }

    #[test]
    fn exact_matches_are_reserved_first() {
        // The 'e' at the end is exact, so the earlier 'e's find nothing left.
        assert_eq!(
            score("crane", "eerie").scores(),
            &[Absent, Absent, Present, Absent, Exact]
        );
    }

    #[test]
    fn repeated_letters_consume_leftovers_left_to_right() {
        assert_eq!(
            score("robot", "boost").scores(),
            &[Present, Exact, Present, Absent, Exact]
        );
        assert_eq!(
            score("abbey", "bbbbb").scores(),
            &[Absent, Exact, Exact, Absent, Absent]
        );
    }

    #[test]
    fn feedback_renders_one_symbol_per_letter() {
        let feedback = score("crane", "trace");
        assert_eq!(feedback.to_string(), "⬛🟩🟩🟨🟩");
        assert_eq!(feedback.to_string().chars().count(), WORD_LEN);
    }

    #[test]
    fn immediate_win() {
        let mut game = WordGuess::new("light").unwrap();
        let turn = game.guess("LIGHT");
        assert!(turn.is_over());
        assert!(matches!(turn, Turn::Won { attempts_used: 1, .. }));
        assert!(turn.to_string().contains("1/6"));
        assert_eq!(game.guesses()[0].feedback.to_string(), "🟩🟩🟩🟩🟩");
    }

    #[test]
    fn six_misses_lose() {
        let mut game = WordGuess::new("crane").unwrap();
        let mut seen = vec![game.attempts_remaining()];
        for i in 0..MAX_ATTEMPTS {
            let turn = game.guess("trace");
            seen.push(game.attempts_remaining());
            if i + 1 < MAX_ATTEMPTS {
                assert!(!turn.is_over());
            } else {
                assert!(matches!(&turn, Turn::Lost { target, .. } if target == "crane"));
                assert!(turn.to_string().contains("CRANE"));
            }
        }
        assert_eq!(seen, vec![6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn invalid_guesses_cost_nothing() {
        let mut game = WordGuess::new("crane").unwrap();
        for line in ["help", "toolong", "cr4ne", "", "héllo"] {
            assert_eq!(game.guess(line), Turn::Invalid);
        }
        assert_eq!(game.attempts_remaining(), MAX_ATTEMPTS);
        assert!(game.guesses().is_empty());
    }

    #[test]
    fn quit_reveals_target() {
        for line in ["quit", "EXIT", " q "] {
            let mut game = WordGuess::new("crane").unwrap();
            game.guess("trace");
            let turn = game.guess(line);
            assert!(turn.is_over());
            assert_eq!(turn.to_string(), "Game over. The word was CRANE.");
        }
    }

    #[test]
    fn miss_reports_remaining_attempts() {
        let mut game = WordGuess::new("crane").unwrap();
        let turn = game.guess("Trace");
        assert_eq!(turn.to_string(), "T R A C E\n⬛🟩🟩🟨🟩\n5 attempts left.");
    }

    #[test]
    fn seeded_start_is_deterministic() {
        let words: Vec<String> = ["crane", "light", "stack"].iter().map(|s| s.to_string()).collect();
        let a = WordGuess::start(&mut StdRng::seed_from_u64(7), &words).unwrap();
        let b = WordGuess::start(&mut StdRng::seed_from_u64(7), &words).unwrap();
        assert_eq!(a.target(), b.target());
        assert!(words.iter().any(|w| w == a.target()));
        assert!(WordGuess::start(&mut StdRng::seed_from_u64(7), &[]).is_none());
    }

    #[test]
    fn rejects_unusable_targets() {
        for word in ["Crane", "planets", "cr4ne", "", "héllo"] {
            assert!(WordGuess::new(word).is_none(), "{}", word);
        }
    }

    #[test]
    fn start_skips_unusable_words() {
        let words: Vec<String> = ["Crane", "planets", "light"].iter().map(|s| s.to_string()).collect();
        for seed in 0..16 {
            let game = WordGuess::start(&mut StdRng::seed_from_u64(seed), &words).unwrap();
            assert_eq!(game.target(), "light");
        }
        let unusable: Vec<String> = vec!["Crane".into(), "planets".into()];
        assert!(WordGuess::start(&mut StdRng::seed_from_u64(0), &unusable).is_none());
    }

    #[test]
    fn opening_prompt_shows_slots() {
        let prompt = WordGuess::new("crane").unwrap().opening_prompt();
        assert!(prompt.contains("6 attempts"));
        assert!(prompt.contains("_ _ _ _ _"));
    }
}
