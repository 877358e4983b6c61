//! Text command language: the only place raw user input is turned into keys.

use std::str::FromStr;

use tracing::instrument;

use crate::application::{ApplicationError, ApplicationResult};

/// Help text for the interactive and script modes.
pub const HELP: &str = "\
commands:
  insert <v>...    (i, add, +<v>)          insert values
  delete <v>...    (d, del, remove, rm, -<v>)  delete values
  contains <v>     (find, has)             membership test
  show             (print, tree)           render the tree
  inorder          (list, ls)              print values in order
  clear            (reset)                 remove everything
  check            (validate)              verify tree invariants
  stats                                    size, height, min, max
  help             (?)                     this text
  quit             (exit, q)               leave the session";

/// One parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Insert(Vec<i64>),
    Delete(Vec<i64>),
    Contains(i64),
    Show,
    InOrder,
    Clear,
    Check,
    Stats,
    Help,
    Quit,
}

/// Parses a key strictly as a base-10 `i64` (surrounding whitespace allowed).
pub fn parse_value(raw: &str) -> ApplicationResult<i64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|e| ApplicationError::InvalidValue {
            raw: trimmed.to_string(),
            reason: e.to_string(),
        })
}

/// Parses one line; blank lines and `#` comments yield `None`.
#[instrument(level = "trace")]
pub fn parse_line(line: &str) -> ApplicationResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

impl FromStr for Command {
    type Err = ApplicationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ApplicationError::UnknownCommand(String::new()));
        };
        let args: Vec<&str> = words.collect();

        // `+5` / `-5` shorthands
        if let Some(rest) = shorthand(head, '+') {
            return Ok(Command::Insert(values_with(rest, &args)?));
        }
        if let Some(rest) = shorthand(head, '-') {
            return Ok(Command::Delete(values_with(rest, &args)?));
        }

        let keyword = head.to_ascii_lowercase();
        let command = match keyword.as_str() {
            "insert" | "i" | "add" => Command::Insert(values(&keyword, &args)?),
            "delete" | "d" | "del" | "remove" | "rm" => Command::Delete(values(&keyword, &args)?),
            "contains" | "find" | "has" => match args.as_slice() {
                [] => return Err(ApplicationError::MissingArgument(keyword.clone())),
                [value] => Command::Contains(parse_value(value)?),
                [_, extra @ ..] => {
                    return Err(ApplicationError::UnexpectedArgument {
                        command: keyword.clone(),
                        extra: extra.join(" "),
                    })
                }
            },
            "show" | "print" | "tree" => no_args(Command::Show, &keyword, &args)?,
            "inorder" | "list" | "ls" => no_args(Command::InOrder, &keyword, &args)?,
            "clear" | "reset" => no_args(Command::Clear, &keyword, &args)?,
            "check" | "validate" => no_args(Command::Check, &keyword, &args)?,
            "stats" => no_args(Command::Stats, &keyword, &args)?,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(ApplicationError::UnknownCommand(head.to_string())),
        };
        Ok(command)
    }
}

/// `head` minus its sign prefix, if the remainder looks like a number.
fn shorthand(head: &str, sign: char) -> Option<&str> {
    let rest = head.strip_prefix(sign)?;
    rest.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
        .then_some(rest)
}

fn values(keyword: &str, args: &[&str]) -> ApplicationResult<Vec<i64>> {
    if args.is_empty() {
        return Err(ApplicationError::MissingArgument(keyword.to_string()));
    }
    args.iter().map(|raw| parse_value(raw)).collect()
}

fn values_with(first: &str, rest: &[&str]) -> ApplicationResult<Vec<i64>> {
    std::iter::once(first)
        .chain(rest.iter().copied())
        .map(parse_value)
        .collect()
}

fn no_args(command: Command, keyword: &str, args: &[&str]) -> ApplicationResult<Command> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ApplicationError::UnexpectedArgument {
            command: keyword.to_string(),
            extra: args.join(" "),
        })
    }
}
