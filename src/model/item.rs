// File: ./src/model/item.rs
use crate::error::{LictError, Result};
use crate::model::date::DateType;
use std::fmt;

const FIELD_SEPARATOR: &str = " | ";

/// Variant-specific payload of a task.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum TaskKind {
    Todo,
    Deadline { by: DateType },
    Event { from: DateType, to: DateType },
}

impl TaskKind {
    /// One-letter tag used both on screen and in the data file.
    pub fn tag(&self) -> &'static str {
        match self {
            TaskKind::Todo => "T",
            TaskKind::Deadline { .. } => "D",
            TaskKind::Event { .. } => "E",
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    /// Fails when `description` is blank.
    pub fn new(description: &str, kind: TaskKind) -> Result<Self> {
        let description = description.trim();
        if description.is_empty() {
            return Err(LictError::parse("The description of a task cannot be empty."));
        }
        Ok(Self {
            description: description.to_string(),
            done: false,
            kind,
        })
    }

    pub fn todo(description: &str) -> Result<Self> {
        Self::new(description, TaskKind::Todo)
    }

    pub fn deadline(description: &str, by: DateType) -> Result<Self> {
        Self::new(description, TaskKind::Deadline { by })
    }

    pub fn event(description: &str, from: DateType, to: DateType) -> Result<Self> {
        Self::new(description, TaskKind::Event { from, to })
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Replaces the dates of the task. The variant itself never changes.
    pub(crate) fn reschedule(&mut self, kind: TaskKind) {
        debug_assert_eq!(self.kind.tag(), kind.tag());
        self.kind = kind;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    pub fn status_icon(&self) -> &'static str {
        if self.done { "X" } else { " " }
    }

    /// Serializes the task into one line of the data file.
    pub fn to_data(&self) -> String {
        let mut fields = vec![
            self.kind.tag().to_string(),
            if self.done { "1" } else { "0" }.to_string(),
            escape(&self.description),
        ];
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => fields.push(by.to_data()),
            TaskKind::Event { from, to } => {
                fields.push(from.to_data());
                fields.push(to.to_data());
            }
        }
        fields.join(FIELD_SEPARATOR)
    }

    /// Rebuilds a task from a line written by [`Task::to_data`].
    pub fn from_data(line: &str) -> Result<Self> {
        let fields = split_unescaped(line);
        let corrupt = |why: &str| LictError::storage(format!("Corrupt task line '{}': {}", line, why));

        if fields.len() < 3 {
            return Err(corrupt("expected at least 3 fields"));
        }
        let done = match fields[1].trim() {
            "1" => true,
            "0" => false,
            _ => return Err(corrupt("done flag must be 0 or 1")),
        };
        let date_at = |i: usize| -> Result<DateType> {
            fields
                .get(i)
                .and_then(|f| DateType::from_data(f))
                .ok_or_else(|| corrupt("missing or malformed date"))
        };
        let kind = match (fields[0].trim(), fields.len()) {
            ("T", 3) => TaskKind::Todo,
            ("D", 4) => TaskKind::Deadline { by: date_at(3)? },
            ("E", 5) => TaskKind::Event {
                from: date_at(3)?,
                to: date_at(4)?,
            },
            _ => return Err(corrupt("unknown tag or wrong number of fields")),
        };

        let mut task = Task::new(&fields[2], kind).map_err(|_| corrupt("empty description"))?;
        task.done = done;
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.kind.tag(),
            self.status_icon(),
            self.description
        )?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", by),
            TaskKind::Event { from, to } => write!(f, " (from: {} to: {})", from, to),
        }
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('|', "\\|")
}

/// Splits a data line on `|`, honouring `\|` and `\\`, and trims the padding
/// around each separator. Description text keeps its inner whitespace.
fn split_unescaped(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '|' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    // " | " padding: one space each side of the separator.
    let last = fields.len() - 1;
    fields
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            let mut f = raw.as_str();
            if i > 0 {
                f = f.strip_prefix(' ').unwrap_or(f);
            }
            if i < last {
                f = f.strip_suffix(' ').unwrap_or(f);
            }
            f.to_string()
        })
        .collect()
}
