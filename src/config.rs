//! Static content and tunables read by the terminal.
//!
//! Everything here has a built-in default, so a host can start with
//! [`Config::default`] and override only the fields it cares about from TOML.

use std::{fs, io, path::Path};

use serde::Deserialize;
use thiserror::Error;

use crate::game;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("The boot sequence must contain at least one line.")]
    EmptyBoot,
    #[error("The word list must contain at least one word.")]
    EmptyWordList,
    #[error("'{0}' is not a five-letter word.")]
    InvalidWord(String),
    #[error("Project slug '{0}' must be lowercase and contain no whitespace or underscores.")]
    InvalidSlug(String),
}

/// Colour scheme reported by the host page.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub about: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    pub resume: String,
    pub skills: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub slug: String,
    pub summary: String,
    pub details: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Lines shown on start and after `clear`.
    pub boot: Vec<String>,
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub pwd: String,
    /// Candidate targets for the word-guess game.
    pub words: Vec<String>,
    /// Theme the session starts with, until the host reports one.
    pub theme: Option<Theme>,
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(s)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::debug!("Loading terminal config from {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.boot.is_empty() {
            return Err(ConfigError::EmptyBoot);
        }
        if self.words.is_empty() {
            return Err(ConfigError::EmptyWordList);
        }
        if let Some(bad) = self
            .words
            .iter()
            .find(|w| !game::is_valid_word(w))
        {
            return Err(ConfigError::InvalidWord(bad.clone()));
        }
        if let Some(bad) = self.projects.iter().find(|p| {
            p.slug.is_empty()
                || p.slug.contains(|c: char| c.is_whitespace() || c == '_' || c.is_uppercase())
        }) {
            return Err(ConfigError::InvalidSlug(bad.slug.clone()));
        }
        Ok(())
    }

    pub fn project(&self, slug: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.slug == slug)
    }

    fn normalize(&mut self) {
        for word in &mut self.words {
            *word = word.trim().to_ascii_lowercase();
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Ulisses Molina".into(),
            title: "Software Engineering Student".into(),
            about: "Software engineering student at Auburn University. Open to summer 2026 internships."
                .into(),
            email: "umolina2005@gmail.com".into(),
            github: "https://github.com/UlissesMolina".into(),
            linkedin: "https://www.linkedin.com/in/ulissesmolina".into(),
            resume: "/uliResume.pdf".into(),
            skills: vec![
                "Languages: JavaScript, TypeScript, Python, HTML, CSS".into(),
                "Frameworks: React, Tailwind CSS, Vite".into(),
                "Tools: Git, Firebase, Selenium, Jira".into(),
                "Platforms: iOS, Android, Netlify".into(),
            ],
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            boot: vec![
                "[●] Initializing portfolio...".into(),
                "[●] Loading projects...".into(),
                "Type 'help' to start.".into(),
            ],
            profile: Profile::default(),
            projects: vec![
                Project {
                    slug: "trackr".into(),
                    summary: "Job application tracker with AI cover letters".into(),
                    details: "Trackr\n\n  Full-stack job application tracker. Kanban board, analytics dashboard,\n  CSV bulk import. OpenAI GPT-4o for personalized cover letters.\n  Clerk auth, RESTful API, TanStack Query.\n\n  Tech: React, TypeScript, Node.js, Express, PostgreSQL, Prisma, OpenAI, Clerk\n\n  Live: https://usetrackr.netlify.app/\n  GitHub: https://github.com/UlissesMolina/Trackr".into(),
                },
                Project {
                    slug: "tiger-scheduler".into(),
                    summary: "Auto-registration tool for Auburn courses".into(),
                    details: "Tiger Scheduler Course Auto-Register Tool\n\n  A Python automation script that monitors course availability\n  on Auburn's TigerScheduler. Checks for open seats, filters\n  courses, handles auto-login and registration.\n\n  Tech: Python, Selenium, Web Automation\n\n  GitHub: https://github.com/UlissesMolina/Tiger-Scheduler-Course-Auto-Register-Tool".into(),
                },
                Project {
                    slug: "finance-dashboard".into(),
                    summary: "Clarity Finance (income, expenses, savings)".into(),
                    details: "Clarity Finance\n\n  See your money clearly. Track income, expenses, and savings in one place.\n\n  Tech: React, TypeScript, CSS\n\n  Live: https://clarityfi.netlify.app/\n  GitHub: https://github.com/UlissesMolina/FinanceDashBoard".into(),
                },
            ],
            pwd: "/home/ulises/hopefully-your-future-company".into(),
            words: [
                "react", "crane", "light", "stack", "debug", "query", "array", "class", "cloud",
                "logic", "merge", "patch", "build", "parse", "token", "pixel", "fetch", "async",
                "trait", "scope", "shell", "linux", "regex", "cache", "index", "state", "hooks",
                "route", "proxy", "agent", "float", "frame", "input", "loops", "mutex", "nodes",
                "stdin", "tuple", "vital", "write",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            theme: None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            pwd = "/srv/www"

            [profile]
            name = "Ada"
            "#,
        )
        .unwrap();

        assert_eq!(config.pwd, "/srv/www");
        assert_eq!(config.profile.name, "Ada");
        assert_eq!(config.profile.email, Profile::default().email);
        assert_eq!(config.boot, Config::default().boot);
        assert_eq!(config.projects.len(), 3);
        assert_eq!(config.theme, None);
    }

    #[test]
    fn reads_theme() {
        let config = Config::from_toml_str(r#"theme = "light""#).unwrap();
        assert_eq!(config.theme, Some(Theme::Light));
    }

    #[test]
    fn words_are_lowercased() {
        let config = Config::from_toml_str(r#"words = ["Rusty", " CRATE "]"#).unwrap();
        assert_eq!(config.words, vec!["rusty", "crate"]);
    }

    #[test]
    fn rejects_bad_words() {
        assert!(matches!(
            Config::from_toml_str(r#"words = ["rust"]"#),
            Err(ConfigError::InvalidWord(w)) if w == "rust"
        ));
        assert!(matches!(
            Config::from_toml_str(r#"words = ["c4ble"]"#),
            Err(ConfigError::InvalidWord(_))
        ));
        assert!(matches!(
            Config::from_toml_str("words = []"),
            Err(ConfigError::EmptyWordList)
        ));
    }

    #[test]
    fn rejects_empty_boot_and_bad_slugs() {
        assert!(matches!(
            Config::from_toml_str("boot = []"),
            Err(ConfigError::EmptyBoot)
        ));
        assert!(matches!(
            Config::from_toml_str(
                r#"
                [[projects]]
                slug = "my_app"
                summary = "x"
                details = "y"
                "#
            ),
            Err(ConfigError::InvalidSlug(s)) if s == "my_app"
        ));
    }

    #[test]
    fn parse_errors_surface() {
        assert!(matches!(
            Config::from_toml_str("boot = 3"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::load("/definitely/not/here.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn theme_names() {
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::Light.as_str(), "light");
    }
}
