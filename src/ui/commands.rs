//! Line commands accepted by the terminal session

use std::{path::PathBuf, str::FromStr};

/// Seconds per adjust unit suffix
const ADJUST_UNITS: [(char, f64); 3] = [('h', 3600.0), ('m', 60.0), ('s', 1.0)];

pub const HELP: &str = "\
Commands (N is the timer's position in the list):
  add [title]           add a timer
  start N | pause N     run or stop a timer
  reset N               zero a timer (keeps running if it was)
  adjust N +1h|-5m|30s  correct a timer by hours, minutes or seconds
  rate N VALUE          set the hourly rate
  title N TEXT          rename a timer
  remove N              delete a timer
  clear                 delete every timer
  list                  show all timers
  export PATH           save the timers to a file
  import PATH           replace the timers with a saved file
  quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Option<String>),
    Start(usize),
    Pause(usize),
    Reset(usize),
    Adjust(usize, f64),
    Rate(usize, f64),
    Title(usize, String),
    Remove(usize),
    Clear,
    List,
    Export(PathBuf),
    Import(PathBuf),
    Help,
    Quit,
}

fn position(arg: Option<&str>) -> Result<usize, String> {
    let arg = arg.ok_or("missing timer number")?;
    arg.parse()
        .map_err(|_| format!("'{}' is not a timer number", arg))
}

fn number(arg: Option<&str>) -> Result<f64, String> {
    let arg = arg.ok_or("missing value")?;
    arg.parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| format!("'{}' is not a number", arg))
}

/// Parse an adjustment such as `+1h`, `-90m` or `15` (seconds)
pub fn parse_adjustment(arg: &str) -> Result<f64, String> {
    let lower = arg.to_ascii_lowercase();
    let (amount, unit) = match lower.chars().last() {
        Some(suffix) if suffix.is_ascii_alphabetic() => {
            let unit = ADJUST_UNITS
                .iter()
                .find(|(c, _)| *c == suffix)
                .map(|(_, seconds)| *seconds)
                .ok_or_else(|| format!("unknown unit '{}', use h, m or s", suffix))?;
            (&lower[..lower.len() - 1], unit)
        }
        _ => (lower.as_str(), 1.0),
    };
    Ok(number(Some(amount))? * unit)
}

/// Everything after the first `skip` words, verbatim
fn rest(line: &str, skip: usize) -> Option<String> {
    let mut remainder = line.trim();
    for _ in 0..skip {
        remainder = remainder
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail.trim_start())
            .unwrap_or("");
    }
    (!remainder.is_empty()).then(|| remainder.to_string())
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or("empty command")?.to_ascii_lowercase();

        let command = match name.as_str() {
            "add" | "new" => Command::Add(rest(line, 1)),
            "start" | "play" => Command::Start(position(words.next())?),
            "pause" | "stop" => Command::Pause(position(words.next())?),
            "reset" => Command::Reset(position(words.next())?),
            "adjust" => {
                let at = position(words.next())?;
                let amount = words.next().ok_or("missing adjustment")?;
                Command::Adjust(at, parse_adjustment(amount)?)
            }
            "rate" => Command::Rate(position(words.next())?, number(words.next())?),
            "title" | "rename" => {
                let at = position(words.next())?;
                Command::Title(at, rest(line, 2).ok_or("missing title")?)
            }
            "remove" | "rm" => Command::Remove(position(words.next())?),
            "clear" => Command::Clear,
            "list" | "ls" => Command::List,
            "export" | "save" => Command::Export(rest(line, 1).ok_or("missing path")?.into()),
            "import" | "load" => Command::Import(rest(line, 1).ok_or("missing path")?.into()),
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(format!("unknown command '{}', try 'help'", other)),
        };
        Ok(command)
    }
}
