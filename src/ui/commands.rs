//! User commands read from the terminal

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Toggle,
    Reset,
    /// Raw minute strings, validated by the timer
    Set {
        work: String,
        short_break: String,
        long_break: String,
    },
    Status,
    Help,
    Quit,
}

/// Why a line could not be turned into a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    Usage(&'static str),
}

pub const HELP_HINT: &str = "Type 'help' for commands.";

pub const HELP: &str = "\
Commands:
  start, s                  start or resume the timer
  pause, p                  pause the timer
  toggle, t                 start/pause
  reset, r                  back to ready, clears completed cycles
  set <work> <short> <long> durations in minutes
  status                    show the current state
  help, h                   show this help
  quit, q                   save settings and exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ParseError::Empty);
        };

        let command = match name.to_lowercase().as_str() {
            "start" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "toggle" | "t" => Command::Toggle,
            "reset" | "r" => Command::Reset,
            "status" => Command::Status,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            "set" | "apply" => {
                let args: Vec<&str> = words.collect();
                let [work, short_break, long_break] = args.as_slice() else {
                    return Err(ParseError::Usage("set <work> <short> <long>"));
                };
                return Ok(Command::Set {
                    work: work.to_string(),
                    short_break: short_break.to_string(),
                    long_break: long_break.to_string(),
                });
            }
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}
