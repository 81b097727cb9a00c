//! The fixed command catalog.
//!
//! Every command is a [CommandDefinition] in [COMMAND_REGISTRY]. Handlers never
//! touch the session themselves: anything beyond printing text is described by
//! the returned [Output] and carried out by the dispatch loop.

use rand::{seq::SliceRandom, RngCore};

use crate::{
    config::{Config, Theme},
    parser::ParsedCommand,
};

/// What a handler asks the dispatch loop to show or do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Text shown verbatim, line breaks included
    Text(String),
    /// Scroll the host page to `section`. Without text the dispatch loop confirms the jump.
    Navigate {
        section: &'static str,
        text: Option<String>,
    },
    /// Open an external resource
    Open { url: String, label: String },
    /// Reset the scrollback to the boot sequence
    Clear,
    StartGame,
    /// List the recall buffer
    RecallListing,
}

/// What a handler gets to see of the session.
pub struct Context<'a> {
    pub config: &'a Config,
    pub theme: Option<Theme>,
    pub rng: &'a mut dyn RngCore,
}

type Handler = fn(&mut Context, &[String]) -> Output;

pub struct CommandDefinition {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Left column of the help listing
    pub usage: &'static str,
    pub summary: &'static str,
    /// Left out of `help` and completion
    pub hidden: bool,
    handler: Handler,
}

impl CommandDefinition {
    pub fn run(&self, ctx: &mut Context, args: &[String]) -> Output {
        (self.handler)(ctx, args)
    }
}

pub static COMMAND_REGISTRY: &[CommandDefinition] = &[
    CommandDefinition {
        name: "help",
        aliases: &["man", "?"],
        usage: "help",
        summary: "Show this list",
        hidden: false,
        handler: help,
    },
    CommandDefinition {
        name: "about",
        aliases: &[],
        usage: "about",
        summary: "Learn about me",
        hidden: false,
        handler: about,
    },
    CommandDefinition {
        name: "work",
        aliases: &["experience"],
        usage: "work",
        summary: "Jump to experience",
        hidden: false,
        handler: work,
    },
    CommandDefinition {
        name: "projects",
        aliases: &[],
        usage: "projects",
        summary: "View my projects",
        hidden: false,
        handler: projects,
    },
    CommandDefinition {
        name: "activity",
        aliases: &["contributions"],
        usage: "activity",
        summary: "Jump to recent GitHub activity",
        hidden: false,
        handler: activity,
    },
    CommandDefinition {
        name: "contact",
        aliases: &[],
        usage: "contact",
        summary: "Get in touch",
        hidden: false,
        handler: contact,
    },
    CommandDefinition {
        name: "skills",
        aliases: &["tech", "stack"],
        usage: "skills",
        summary: "View tech stack",
        hidden: false,
        handler: skills,
    },
    CommandDefinition {
        name: "resume",
        aliases: &["cv"],
        usage: "resume",
        summary: "Download resume",
        hidden: false,
        handler: resume,
    },
    CommandDefinition {
        name: "open",
        aliases: &[],
        usage: "open <name>",
        summary: "Open github, linkedin or a project",
        hidden: false,
        handler: open,
    },
    CommandDefinition {
        name: "github",
        aliases: &[],
        usage: "github",
        summary: "Open GitHub profile",
        hidden: false,
        handler: github,
    },
    CommandDefinition {
        name: "linkedin",
        aliases: &[],
        usage: "linkedin",
        summary: "Open LinkedIn profile",
        hidden: false,
        handler: linkedin,
    },
    CommandDefinition {
        name: "wordle",
        aliases: &["game"],
        usage: "wordle",
        summary: "Play a round of Wordle",
        hidden: false,
        handler: wordle,
    },
    CommandDefinition {
        name: "whoami",
        aliases: &[],
        usage: "whoami",
        summary: "Who is this?",
        hidden: false,
        handler: whoami,
    },
    CommandDefinition {
        name: "echo",
        aliases: &[],
        usage: "echo <text>",
        summary: "Print text",
        hidden: false,
        handler: echo,
    },
    CommandDefinition {
        name: "date",
        aliases: &[],
        usage: "date",
        summary: "Current date and time",
        hidden: false,
        handler: date,
    },
    CommandDefinition {
        name: "ls",
        aliases: &["dir"],
        usage: "ls",
        summary: "List projects",
        hidden: false,
        handler: ls,
    },
    CommandDefinition {
        name: "pwd",
        aliases: &[],
        usage: "pwd",
        summary: "Print working directory",
        hidden: false,
        handler: pwd,
    },
    CommandDefinition {
        name: "history",
        aliases: &[],
        usage: "history",
        summary: "Previously entered commands",
        hidden: false,
        handler: history,
    },
    CommandDefinition {
        name: "theme",
        aliases: &[],
        usage: "theme",
        summary: "Show the current theme",
        hidden: false,
        handler: theme,
    },
    CommandDefinition {
        name: "clear",
        aliases: &["cls"],
        usage: "clear",
        summary: "Clear the screen",
        hidden: false,
        handler: clear,
    },
    CommandDefinition {
        name: "cd",
        aliases: &[],
        usage: "cd",
        summary: "",
        hidden: true,
        handler: cd,
    },
    CommandDefinition {
        name: "exit",
        aliases: &["quit"],
        usage: "exit",
        summary: "",
        hidden: true,
        handler: exit,
    },
    CommandDefinition {
        name: "sudo",
        aliases: &[],
        usage: "sudo",
        summary: "",
        hidden: true,
        handler: sudo,
    },
    CommandDefinition {
        name: "vim",
        aliases: &["vi", "nano", "emacs"],
        usage: "vim",
        summary: "",
        hidden: true,
        handler: vim,
    },
    CommandDefinition {
        name: "git",
        aliases: &[],
        usage: "git",
        summary: "",
        hidden: true,
        handler: git,
    },
    CommandDefinition {
        name: "sl",
        aliases: &[],
        usage: "sl",
        summary: "",
        hidden: true,
        handler: sl,
    },
    CommandDefinition {
        name: "fortune",
        aliases: &["joke"],
        usage: "fortune",
        summary: "",
        hidden: true,
        handler: fortune,
    },
];

/// Finds a command definition in the registry by its name or alias.
pub fn find_command(name: &str) -> Option<&'static CommandDefinition> {
    COMMAND_REGISTRY
        .iter()
        .find(|cmd| cmd.name == name || cmd.aliases.contains(&name))
}

/// Maps an alias to its command name. Unknown names come back unchanged.
pub fn canonical_name(name: &str) -> &str {
    find_command(name).map(|cmd| cmd.name).unwrap_or(name)
}

/// Names and aliases offered by tab completion, in registry order.
pub fn completion_names() -> impl Iterator<Item = &'static str> {
    COMMAND_REGISTRY
        .iter()
        .filter(|cmd| !cmd.hidden)
        .flat_map(|cmd| std::iter::once(cmd.name).chain(cmd.aliases.iter().copied()))
        .filter(|name| name.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Every valid argument of `open`, external links first.
pub fn open_targets(config: &Config) -> Vec<&str> {
    ["github", "linkedin"]
        .into_iter()
        .chain(config.projects.iter().map(|p| p.slug.as_str()))
        .collect()
}

pub fn not_found(command: &str) -> String {
    format!(
        "Command not found: {}. Type 'help' for available commands.",
        command
    )
}

/// Runs a parsed command. Never fails: unknown commands produce a "not found" text.
pub fn execute(ctx: &mut Context, parsed: &ParsedCommand) -> Output {
    match find_command(&parsed.command) {
        Some(cmd) => cmd.run(ctx, &parsed.args),
        None => Output::Text(not_found(&parsed.command)),
    }
}

fn help(_: &mut Context, _: &[String]) -> Output {
    let mut text = String::from("Available commands:\n");
    for cmd in COMMAND_REGISTRY.iter().filter(|cmd| !cmd.hidden) {
        text.push_str(&format!("  {:<14}{}\n", cmd.usage, cmd.summary));
    }
    text.push_str("\nTry: about, work, projects, or just scroll down ↓");
    Output::Text(text)
}

fn whoami(ctx: &mut Context, _: &[String]) -> Output {
    let profile = &ctx.config.profile;
    Output::Text(format!("{} - {}", profile.name, profile.title))
}

fn about(ctx: &mut Context, _: &[String]) -> Output {
    Output::Navigate {
        section: "about",
        text: Some(ctx.config.profile.about.clone()),
    }
}

fn work(_: &mut Context, _: &[String]) -> Output {
    Output::Navigate {
        section: "experience",
        text: None,
    }
}

fn projects(ctx: &mut Context, _: &[String]) -> Output {
    let mut text = String::from("My projects:\n");
    for (i, project) in ctx.config.projects.iter().enumerate() {
        text.push_str(&format!("  {}. {} - {}\n", i + 1, project.slug, project.summary));
    }
    text.push_str("\nType 'open <project-name>' to learn more.");
    Output::Navigate {
        section: "projects",
        text: Some(text),
    }
}

fn activity(_: &mut Context, _: &[String]) -> Output {
    Output::Navigate {
        section: "contributions",
        text: None,
    }
}

fn strip_scheme(url: &str) -> &str {
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_prefix("www.").unwrap_or(url)
}

fn contact(ctx: &mut Context, _: &[String]) -> Output {
    let profile = &ctx.config.profile;
    Output::Navigate {
        section: "contact",
        text: Some(format!(
            "Email: {}\nGitHub: {}\nLinkedIn: {}",
            profile.email,
            strip_scheme(&profile.github),
            strip_scheme(&profile.linkedin)
        )),
    }
}

fn skills(ctx: &mut Context, _: &[String]) -> Output {
    Output::Text(ctx.config.profile.skills.join("\n"))
}

fn resume(ctx: &mut Context, _: &[String]) -> Output {
    Output::Open {
        url: ctx.config.profile.resume.clone(),
        label: "resume".into(),
    }
}

fn github(ctx: &mut Context, _: &[String]) -> Output {
    Output::Open {
        url: ctx.config.profile.github.clone(),
        label: "GitHub profile".into(),
    }
}

fn linkedin(ctx: &mut Context, _: &[String]) -> Output {
    Output::Open {
        url: ctx.config.profile.linkedin.clone(),
        label: "LinkedIn profile".into(),
    }
}

fn open_usage(config: &Config) -> String {
    format!(
        "Usage: open <name>\nValid names: {}",
        open_targets(config).join(", ")
    )
}

fn open(ctx: &mut Context, args: &[String]) -> Output {
    let Some(arg) = args.first() else {
        return Output::Text(open_usage(ctx.config));
    };

    match arg.to_lowercase().replace('_', "-").as_str() {
        "github" => github(ctx, &[]),
        "linkedin" => linkedin(ctx, &[]),
        slug => match ctx.config.project(slug) {
            Some(project) => Output::Text(project.details.clone()),
            None => Output::Text(format!(
                "Unknown name '{}'. {}",
                arg,
                open_usage(ctx.config)
            )),
        },
    }
}

fn wordle(_: &mut Context, _: &[String]) -> Output {
    Output::StartGame
}

fn echo(_: &mut Context, args: &[String]) -> Output {
    Output::Text(args.join(" "))
}

fn date(_: &mut Context, _: &[String]) -> Output {
    Output::Text(
        chrono::Local::now()
            .format("%a %b %e %Y %H:%M:%S %Z")
            .to_string(),
    )
}

fn ls(ctx: &mut Context, _: &[String]) -> Output {
    Output::Text(
        ctx.config
            .projects
            .iter()
            .map(|p| format!("{}/", p.slug))
            .collect::<Vec<_>>()
            .join("   "),
    )
}

fn pwd(ctx: &mut Context, _: &[String]) -> Output {
    Output::Text(ctx.config.pwd.clone())
}

fn history(_: &mut Context, _: &[String]) -> Output {
    Output::RecallListing
}

fn theme(ctx: &mut Context, _: &[String]) -> Output {
    Output::Text(match ctx.theme {
        Some(theme) => format!("Current theme: {}", theme.as_str()),
        None => "The page has not reported a theme.".into(),
    })
}

fn clear(_: &mut Context, _: &[String]) -> Output {
    Output::Clear
}

fn cd(_: &mut Context, _: &[String]) -> Output {
    Output::Text("You can't leave this portfolio.".into())
}

fn exit(_: &mut Context, _: &[String]) -> Output {
    Output::Text("Nice try, you're stuck here.".into())
}

fn sudo(_: &mut Context, args: &[String]) -> Output {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    Output::Text(match args.as_slice() {
        ["rm", "-rf", "/" | "*", ..] => "Whoa there, calm down.".into(),
        _ => "Nice try.".into(),
    })
}

fn vim(_: &mut Context, _: &[String]) -> Output {
    Output::Text("You opened vim. Good luck getting out.\n(Just kidding. No editors in here.)".into())
}

fn git(_: &mut Context, _: &[String]) -> Output {
    Output::Text(
        "On branch main\nYour portfolio is up to date with 'origin/main'.\n\nnothing to commit, working tree clean"
            .into(),
    )
}

const TRAIN: &str = r"      ====        ________                ___________
  _D _|  |_______/        \__I_I_____===__|_________|
   |(_)---  |   H\________/ |   |        =|___ ___|
   /     |  |   H  |  |     |   |         ||_| |_||
  |      |  |   H  |__--------------------| [___] |
  | ________|___H__/__|_____/[][]~\_______|       |
  |/ |   |-----------I_____I [][] []  D   |=======|_
__/ =| o |=-~~\  /~~\  /~~\  /~~\ ____Y___________|__
 |/-=|___|=    ||    ||    ||    |_____/~\___/
  \_/      \O=====O=====O=====O_/      \_/";

fn sl(_: &mut Context, _: &[String]) -> Output {
    Output::Text(format!("{}\nYou meant ls, didn't you?", TRAIN))
}

const FORTUNES: &[&str] = &[
    "There are 10 kinds of people: those who understand binary and those who don't.",
    "It works on my machine. Shipping the machine.",
    "A SQL query walks into a bar, walks up to two tables and asks: may I join you?",
    "99 little bugs in the code. Take one down, patch it around. 127 little bugs in the code.",
    "Weeks of coding can save you hours of planning.",
    "The best thing about a boolean is that even if you're wrong, you're only off by a bit.",
];

fn fortune(ctx: &mut Context, _: &[String]) -> Output {
    let line = FORTUNES.choose(&mut *ctx.rng).copied().unwrap_or_default();
    Output::Text(line.into())
}
