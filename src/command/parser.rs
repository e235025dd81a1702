// File: ./src/command/parser.rs
//! Turns one line of user input into a [`Command`].
//!
//! Parsing is pure: nothing here touches the task list or the data file.
use crate::command::{Command, SnoozeBy};
use crate::error::{LictError, Result};
use crate::model::DateType;
use crate::model::date::parse_duration;
use chrono::Duration;
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

const DATE_HINT: &str = "Use yyyy-mm-dd, yyyy-mm-dd HH:mm or d/m/yyyy HHmm.";

/// The closed set of keywords a line may start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CommandType {
    Todo,
    Deadline,
    Event,
    Mark,
    Unmark,
    Delete,
    List,
    Find,
    Hello,
    Bye,
    Snooze,
}

impl CommandType {
    pub fn keyword(&self) -> String {
        self.to_string().to_lowercase()
    }

    /// `[todo, deadline, ...]`, in declaration order.
    pub fn all_keywords() -> String {
        let words: Vec<String> = Self::iter().map(|t| t.keyword()).collect();
        format!("[{}]", words.join(", "))
    }
}

#[derive(Debug, Clone)]
pub struct Parser {
    default_snooze: Duration,
}

impl Default for Parser {
    fn default() -> Self {
        Self {
            default_snooze: Duration::days(1),
        }
    }
}

impl Parser {
    /// `default_snooze` is what a bare `snooze <n>` shifts by.
    pub fn new(default_snooze: Duration) -> Self {
        Self { default_snooze }
    }

    pub fn parse(&self, input: &str) -> Result<Command> {
        let input = input.trim();
        let (word, info) = match input.split_once(char::is_whitespace) {
            Some((w, rest)) => (w, rest.trim()),
            None => (input, ""),
        };

        let kind = CommandType::from_str(&word.to_uppercase()).map_err(|_| {
            LictError::parse(format!(
                "I'm sorry, but I don't know what that means.\n\
                 Please only input tasks which start with these words:\n{}",
                CommandType::all_keywords()
            ))
        })?;

        let command = match kind {
            CommandType::List => Command::List,
            CommandType::Hello => Command::Hello,
            CommandType::Bye => Command::Bye,
            CommandType::Mark => Command::Mark(parse_index(info, kind)?),
            CommandType::Unmark => Command::Unmark(parse_index(info, kind)?),
            CommandType::Delete => Command::Delete(parse_index(info, kind)?),
            CommandType::Todo => Command::Todo {
                description: parse_description(info, kind)?,
            },
            CommandType::Deadline => parse_deadline(info)?,
            CommandType::Event => parse_event(info)?,
            CommandType::Find => Command::Find {
                keyword: info.to_string(),
            },
            CommandType::Snooze => self.parse_snooze(info)?,
        };
        Ok(command)
    }

    fn parse_snooze(&self, info: &str) -> Result<Command> {
        let (index_str, rest) = match info.split_once(char::is_whitespace) {
            Some((i, rest)) => (i, rest.trim()),
            None => (info, ""),
        };
        let index = parse_index(index_str, CommandType::Snooze)?;

        let by = if rest.is_empty() {
            SnoozeBy::Duration(self.default_snooze)
        } else if let Some(date) = DateType::parse(rest) {
            SnoozeBy::Until(date)
        } else if let Some(amount) = parse_duration(rest) {
            SnoozeBy::Duration(amount)
        } else {
            return Err(LictError::parse(format!(
                "I couldn't read '{}' as a date or an amount like 2d or 3h. {}",
                rest, DATE_HINT
            )));
        };
        Ok(Command::Snooze { index, by })
    }
}

/// Shorthand for `Parser::default().parse(input)`.
pub fn parse(input: &str) -> Result<Command> {
    Parser::default().parse(input)
}

fn parse_index(info: &str, kind: CommandType) -> Result<usize> {
    if info.is_empty() {
        return Err(LictError::parse(format!(
            "Please tell me which task to {0}, e.g. `{0} 2`.",
            kind.keyword()
        )));
    }
    info.parse::<usize>().map_err(|_| {
        LictError::parse(format!(
            "'{}' is not a task number. Try `{} 2`.",
            info,
            kind.keyword()
        ))
    })
}

fn parse_description(desc: &str, kind: CommandType) -> Result<String> {
    let desc = desc.trim();
    if desc.is_empty() {
        return Err(LictError::parse(format!(
            "The description of a {} cannot be empty.",
            kind.keyword()
        )));
    }
    Ok(desc.to_string())
}

fn parse_date(s: &str) -> Result<DateType> {
    DateType::parse(s).ok_or_else(|| {
        LictError::parse(format!("I couldn't read the date '{}'. {}", s, DATE_HINT))
    })
}

fn parse_deadline(info: &str) -> Result<Command> {
    let (desc, by) = split_marker(info, "/by").ok_or_else(|| {
        LictError::parse("A deadline needs a due date: deadline <description> /by <date>")
    })?;
    Ok(Command::Deadline {
        description: parse_description(desc, CommandType::Deadline)?,
        by: parse_date(by)?,
    })
}

fn parse_event(info: &str) -> Result<Command> {
    let usage = || {
        LictError::parse("An event needs a start and an end: event <description> /from <date> /to <date>")
    };
    let (desc, span) = split_marker(info, "/from").ok_or_else(usage)?;
    let (from, to) = split_marker(span, "/to").ok_or_else(usage)?;
    Ok(Command::Event {
        description: parse_description(desc, CommandType::Event)?,
        from: parse_date(from)?,
        to: parse_date(to)?,
    })
}

/// Splits `s` around the first occurrence of `marker` that stands as its own
/// word. Both halves come back trimmed.
fn split_marker<'a>(s: &'a str, marker: &str) -> Option<(&'a str, &'a str)> {
    let mut search = 0;
    while let Some(pos) = s[search..].find(marker) {
        let start = search + pos;
        let end = start + marker.len();
        let before_ok = start == 0 || s[..start].ends_with(char::is_whitespace);
        let after_ok = end == s.len() || s[end..].starts_with(char::is_whitespace);
        if before_ok && after_ok {
            return Some((s[..start].trim(), s[end..].trim()));
        }
        search = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> DateType {
        DateType::AllDay(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn parse_err(input: &str) -> String {
        match parse(input) {
            Err(LictError::Parse(msg)) => msg,
            other => panic!("expected parse error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(parse("LIST").unwrap(), Command::List);
        assert_eq!(parse("  hElLo  ").unwrap(), Command::Hello);
        assert_eq!(parse("Mark 3").unwrap(), Command::Mark(3));
    }

    #[test]
    fn test_unknown_keyword_lists_valid_words() {
        let msg = parse_err("frobnicate x");
        assert!(msg.contains(
            "[todo, deadline, event, mark, unmark, delete, list, find, hello, bye, snooze]"
        ));
        parse_err("");
    }

    #[test]
    fn test_zero_argument_commands_ignore_remainder() {
        assert_eq!(parse("list everything now").unwrap(), Command::List);
        assert_eq!(parse("bye bye").unwrap(), Command::Bye);
    }

    #[test]
    fn test_index_validation() {
        assert!(parse_err("mark").contains("which task to mark"));
        assert!(parse_err("unmark two").contains("not a task number"));
        assert!(parse_err("delete -1").contains("not a task number"));
        // Range checks happen at execution time.
        assert_eq!(parse("delete 0").unwrap(), Command::Delete(0));
    }

    #[test]
    fn test_todo_needs_description() {
        assert!(parse_err("todo").contains("cannot be empty"));
        assert_eq!(
            parse("todo   read  book ").unwrap(),
            Command::Todo {
                description: "read  book".to_string()
            }
        );
    }

    #[test]
    fn test_deadline_markers() {
        assert_eq!(
            parse("deadline return book /by 2024-01-01").unwrap(),
            Command::Deadline {
                description: "return book".to_string(),
                by: day(2024, 1, 1),
            }
        );
        assert!(parse_err("deadline return book").contains("/by"));
        assert!(parse_err("deadline return book /by").contains("couldn't read the date"));
        assert!(parse_err("deadline /by 2024-01-01").contains("cannot be empty"));
        assert!(parse_err("deadline x /by next tuesday").contains("couldn't read the date"));
        // A marker glued to other text is part of the description.
        assert!(parse_err("deadline read /byline").contains("/by <date>"));
    }

    #[test]
    fn test_event_markers() {
        assert_eq!(
            parse("event camp /from 1/6/2024 /to 3/6/2024").unwrap(),
            Command::Event {
                description: "camp".to_string(),
                from: day(2024, 6, 1),
                to: day(2024, 6, 3),
            }
        );
        assert!(parse_err("event camp /from 2024-06-01").contains("/to"));
        assert!(parse_err("event camp /to 2024-06-01").contains("/from"));
        assert!(parse_err("event camp /from soon /to later").contains("couldn't read"));
    }

    #[test]
    fn test_event_end_before_start_is_accepted() {
        assert!(parse("event odd /from 2024-06-03 /to 2024-06-01").is_ok());
    }

    #[test]
    fn test_find_keeps_raw_keyword() {
        assert_eq!(
            parse("find Book club").unwrap(),
            Command::Find {
                keyword: "Book club".to_string()
            }
        );
        assert_eq!(
            parse("find").unwrap(),
            Command::Find {
                keyword: String::new()
            }
        );
    }

    #[test]
    fn test_snooze_forms() {
        assert_eq!(
            parse("snooze 2").unwrap(),
            Command::Snooze {
                index: 2,
                by: SnoozeBy::Duration(Duration::days(1))
            }
        );
        assert_eq!(
            Parser::new(Duration::minutes(90)).parse("snooze 2").unwrap(),
            Command::Snooze {
                index: 2,
                by: SnoozeBy::Duration(Duration::minutes(90))
            }
        );
        assert_eq!(
            parse("snooze 1 3 days").unwrap(),
            Command::Snooze {
                index: 1,
                by: SnoozeBy::Duration(Duration::days(3))
            }
        );
        assert_eq!(
            parse("snooze 1 2024-02-01").unwrap(),
            Command::Snooze {
                index: 1,
                by: SnoozeBy::Until(day(2024, 2, 1))
            }
        );
        assert!(parse_err("snooze").contains("which task to snooze"));
        assert!(parse_err("snooze 1 whenever").contains("whenever"));
    }

    #[test]
    fn test_split_marker_needs_word_boundaries() {
        assert_eq!(split_marker("a /by b", "/by"), Some(("a", "b")));
        assert_eq!(split_marker("a/by b", "/by"), None);
        assert_eq!(split_marker("x /byte /by 1", "/by"), Some(("x /byte", "1")));
    }
}
