//! Task syntax: `name` or `name:arg[,arg...]`

use std::fmt;
use std::str::FromStr;

/// One step of an invocation, run in the order given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// `use:<names>` (alias `with`): select exactly these repositories
    Use(Vec<String>),
    /// `without:<names>`: drop these repositories from the selection
    Without(Vec<String>),
    /// `setup` (alias `clone`): clone the organization's missing repositories
    Setup,
    /// `pr` lists open pull requests, `pr:<number>` checks one out
    Pr(Option<u64>),
    /// `sh:<command>`: run a shell command in every selected repository
    Sh(String),
    /// `ls`: show the selected repositories
    List,
    /// `config`: show the effective configuration
    Config,
}

const TASK_NAMES: &str = "use, with, without, setup, clone, pr, sh, ls, config";

impl FromStr for Task {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };

        match name {
            "use" | "with" => names(name, arg).map(Task::Use),
            "without" => names(name, arg).map(Task::Without),
            "setup" | "clone" => no_arg(name, arg).map(|_| Task::Setup),
            "pr" => match arg {
                None => Ok(Task::Pr(None)),
                Some(number) => number
                    .trim()
                    .trim_start_matches('#')
                    .parse()
                    .map(|n| Task::Pr(Some(n)))
                    .map_err(|_| format!("invalid PR number '{}'", number)),
            },
            // The command is everything after the first colon, commas included
            "sh" => match arg {
                Some(command) if !command.trim().is_empty() => Ok(Task::Sh(command.to_string())),
                _ => Err("sh needs a command, e.g. sh:\"git status\"".to_string()),
            },
            "ls" | "list" => no_arg(name, arg).map(|_| Task::List),
            "config" => no_arg(name, arg).map(|_| Task::Config),
            other => Err(format!("unknown task '{}' (expected one of: {})", other, TASK_NAMES)),
        }
    }
}

fn names(task: &str, arg: Option<&str>) -> Result<Vec<String>, String> {
    let names: Vec<String> = arg
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    if names.is_empty() {
        return Err(format!("{} needs at least one repository, e.g. {}:nginx,redis", task, task));
    }
    Ok(names)
}

fn no_arg(task: &str, arg: Option<&str>) -> Result<(), String> {
    match arg {
        None => Ok(()),
        Some(arg) => Err(format!("{} takes no arguments, got '{}'", task, arg)),
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Task::Use(names) => write!(f, "use:{}", names.join(",")),
            Task::Without(names) => write!(f, "without:{}", names.join(",")),
            Task::Setup => write!(f, "setup"),
            Task::Pr(None) => write!(f, "pr"),
            Task::Pr(Some(number)) => write!(f, "pr:{}", number),
            Task::Sh(command) => write!(f, "sh:{}", command),
            Task::List => write!(f, "ls"),
            Task::Config => write!(f, "config"),
        }
    }
}
