//! Serial command grammar
//!
//! Lines are trimmed and upper-cased before matching. A keyword is separated
//! from its argument by the first space; extra whitespace around the argument
//! is ignored.

use crate::pattern::PatternId;

const KEYWORD_PATTERN: &str = "PATTERN";
const KEYWORD_STOP: &str = "STOP";
const KEYWORD_CLEAR: &str = "CLEAR";
const KEYWORD_SPEED: &str = "SPEED";
const KEYWORD_BRIGHT: &str = "BRIGHT";
const KEYWORD_STATUS: &str = "STATUS";
const KEYWORD_HELP: &str = "HELP";

/// Longest line the parser normalizes; longer input is cut
pub const MAX_COMMAND_LEN: usize = 64;

pub const HELP_TEXT: &str = "COMMANDS: PATTERN <BORED|THINKING|PRINTING|FINISH|REMOVE_FIGURE|ERROR|SELFTEST>, STOP, CLEAR, SPEED <0-10>, BRIGHT <0-15>, STATUS, HELP";

/// Parsed command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Switch to a pattern
    Pattern(PatternId),
    /// `STOP` or `CLEAR`: go back to the blank panel
    Stop,
    /// Raw speed argument, clamped when applied
    Speed(i32),
    /// Raw brightness argument, clamped when applied
    Bright(i32),
    Status,
    Help,
}

/// Why a line was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line, silently ignored
    Empty,
    UnknownCommand,
    UnknownPattern,
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::UnknownCommand => f.write_str("ERR UNKNOWN COMMAND"),
            Self::UnknownPattern => f.write_str("ERR UNKNOWN PATTERN"),
        }
    }
}

impl Command {
    /// Parse one line without its terminator
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let mut normalized = heapless::String::<MAX_COMMAND_LEN>::new();
        for c in line.chars() {
            if normalized.push(c.to_ascii_uppercase()).is_err() {
                break;
            }
        }

        let (keyword, argument) = match normalized.split_once(' ') {
            Some((keyword, argument)) => (keyword, Some(argument.trim())),
            None => (normalized.as_str(), None),
        };

        match (keyword, argument) {
            (KEYWORD_PATTERN, Some(name)) => PatternId::parse_from_str(name)
                .map(Self::Pattern)
                .ok_or(CommandError::UnknownPattern),
            (KEYWORD_STOP | KEYWORD_CLEAR, None) => Ok(Self::Stop),
            (KEYWORD_SPEED, Some(value)) => Ok(Self::Speed(parse_int_lenient(value))),
            (KEYWORD_BRIGHT, Some(value)) => Ok(Self::Bright(parse_int_lenient(value))),
            (KEYWORD_STATUS, None) => Ok(Self::Status),
            (KEYWORD_HELP, None) => Ok(Self::Help),
            _ => Err(CommandError::UnknownCommand),
        }
    }
}

/// Parse a leading integer the way `atoi` does
///
/// Optional sign, then digits up to the first non-digit. No digits yields 0.
/// Values beyond `i32` saturate.
pub fn parse_int_lenient(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i32 = 0;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        let digit = i32::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if negative { value.saturating_neg() } else { value }
}

/// One line written back to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Ok,
    Speed(u8),
    Bright(u8),
    Status {
        pattern: PatternId,
        speed: u8,
        brightness: u8,
    },
    Help,
    Error(CommandError),
    /// Unsolicited: a pattern was started
    PatternStarted(PatternId),
    /// Unsolicited: a one-shot pattern ran to completion
    PatternCompleted(PatternId),
    /// Unsolicited: boot finished
    Ready,
    /// Unsolicited: the display could not be initialized
    DisplayInitFailed,
}

impl core::fmt::Display for Response {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok => f.write_str("OK"),
            Self::Speed(speed) => write!(f, "OK SPEED={speed}"),
            Self::Bright(brightness) => write!(f, "OK BRIGHT={brightness}"),
            Self::Status {
                pattern,
                speed,
                brightness,
            } => write!(f, "OK PATTERN={pattern} SPEED={speed} BRIGHT={brightness}"),
            Self::Help => write!(f, "OK {HELP_TEXT}"),
            Self::Error(error) => write!(f, "{error}"),
            Self::PatternStarted(pattern) => write!(f, "PATTERN={pattern}"),
            Self::PatternCompleted(pattern) => write!(f, "DONE PATTERN={pattern}"),
            Self::Ready => write!(f, "READY {HELP_TEXT}"),
            Self::DisplayInitFailed => f.write_str("ERR DISPLAY INIT"),
        }
    }
}
