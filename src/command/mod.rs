// File: ./src/command/mod.rs
//! Executable commands.
//!
//! Each user line becomes exactly one [`Command`]. A command runs against the
//! task list and the storage adapter and produces the text shown back to the
//! user. Failed commands leave the list untouched.
pub mod parser;

pub use parser::{CommandType, Parser, parse};

use crate::error::{LictError, Result};
use crate::model::{DateType, Task, TaskKind, TaskList};
use crate::storage::TaskStorage;
use chrono::Duration;
use std::fmt::Write;

/// How far a `snooze` moves a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnoozeBy {
    /// Shift every date of the task forward by this amount.
    Duration(Duration),
    /// Move the (first) date of the task to this value.
    Until(DateType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    Todo {
        description: String,
    },
    Deadline {
        description: String,
        by: DateType,
    },
    Event {
        description: String,
        from: DateType,
        to: DateType,
    },
    Find {
        keyword: String,
    },
    Hello,
    Bye,
    Snooze {
        index: usize,
        by: SnoozeBy,
    },
}

impl Command {
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Bye)
    }

    /// Whether a successful run changes the task list (and therefore saves it).
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Command::List | Command::Find { .. } | Command::Hello | Command::Bye
        )
    }

    pub fn execute(&self, tasks: &mut TaskList, storage: &mut dyn TaskStorage) -> Result<String> {
        let text = match self {
            Command::List => render_list(
                "Here are the tasks in your list:",
                "Your list is empty. Add something with `todo <description>`.",
                tasks.iter().enumerate().map(|(i, t)| (i + 1, t)),
            ),
            Command::Find { keyword } => render_list(
                "Here are the matching tasks in your list:",
                &format!("No tasks contain '{}'.", keyword),
                tasks.find(keyword).into_iter(),
            ),
            Command::Hello => "Hello! I'm Lict\nWhat can I do for you?".to_string(),
            Command::Bye => "Bye. Hope to see you again soon!".to_string(),

            Command::Mark(index) => {
                let task = tasks.get_mut(*index)?;
                task.set_done(true);
                format!("Nice! I've marked this task as done:\n  {}", task)
            }
            Command::Unmark(index) => {
                let task = tasks.get_mut(*index)?;
                task.set_done(false);
                format!("OK, I've marked this task as not done yet:\n  {}", task)
            }
            Command::Delete(index) => {
                let task = tasks.remove(*index)?;
                format!(
                    "Noted. I've removed this task:\n  {}\n{}",
                    task,
                    count_line(tasks)
                )
            }
            Command::Todo { description } => add(tasks, Task::todo(description)?),
            Command::Deadline { description, by } => {
                add(tasks, Task::deadline(description, *by)?)
            }
            Command::Event {
                description,
                from,
                to,
            } => add(tasks, Task::event(description, *from, *to)?),
            Command::Snooze { index, by } => {
                let task = tasks.get_mut(*index)?;
                let kind = snoozed(task.kind(), by)?;
                task.reschedule(kind);
                format!("OK, I've snoozed this task:\n  {}", task)
            }
        };

        if self.is_mutating() {
            Ok(persist(tasks, storage, text))
        } else {
            Ok(text)
        }
    }
}

fn add(tasks: &mut TaskList, task: Task) -> String {
    let added = tasks.add(task).to_string();
    format!(
        "Got it. I've added this task:\n  {}\n{}",
        added,
        count_line(tasks)
    )
}

fn count_line(tasks: &TaskList) -> String {
    match tasks.len() {
        1 => "Now you have 1 task in the list.".to_string(),
        n => format!("Now you have {} tasks in the list.", n),
    }
}

fn render_list<'a>(
    header: &str,
    empty: &str,
    rows: impl Iterator<Item = (usize, &'a Task)>,
) -> String {
    let mut out = header.to_string();
    let mut any = false;
    for (i, task) in rows {
        any = true;
        let _ = write!(out, "\n{}.{}", i, task);
    }
    if any { out } else { empty.to_string() }
}

/// Writes the whole list through. A failed save keeps the in-memory change
/// and turns into a warning under the normal reply.
fn persist(tasks: &TaskList, storage: &mut dyn TaskStorage, text: String) -> String {
    match storage.save(tasks.tasks()) {
        Ok(()) => text,
        Err(e) => {
            log::warn!("Save failed: {}", e);
            format!(
                "{}\nWarning: the change is kept for this session but could not be saved ({}).",
                text, e
            )
        }
    }
}

fn snoozed(kind: &TaskKind, by: &SnoozeBy) -> Result<TaskKind> {
    let shift = |date: &DateType, amount: Duration| {
        date.shift(amount)
            .ok_or_else(|| LictError::execution("That snooze goes past the end of the calendar."))
    };
    let ensure_later = |current: &DateType, target: &DateType| {
        if target <= current {
            Err(LictError::execution(format!(
                "Snoozing only moves a task later: {} is not after {}.",
                target, current
            )))
        } else {
            Ok(())
        }
    };

    match (kind, by) {
        (TaskKind::Todo, _) => Err(LictError::execution(
            "That task is a todo and has no date to snooze.",
        )),
        (TaskKind::Deadline { by: due }, SnoozeBy::Duration(amount)) => Ok(TaskKind::Deadline {
            by: shift(due, *amount)?,
        }),
        (TaskKind::Deadline { by: due }, SnoozeBy::Until(target)) => {
            ensure_later(due, target)?;
            Ok(TaskKind::Deadline { by: *target })
        }
        (TaskKind::Event { from, to }, SnoozeBy::Duration(amount)) => Ok(TaskKind::Event {
            from: shift(from, *amount)?,
            to: shift(to, *amount)?,
        }),
        (TaskKind::Event { from, to }, SnoozeBy::Until(target)) => {
            ensure_later(from, target)?;
            // The end moves by the same amount so the event keeps its length.
            let delta = from.offset_to(target);
            Ok(TaskKind::Event {
                from: *target,
                to: shift(to, delta)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> DateType {
        DateType::AllDay(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateType {
        DateType::Specific(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, 0)
                .unwrap(),
        )
    }

    struct BrokenStorage;

    impl TaskStorage for BrokenStorage {
        fn load(&mut self) -> Result<Vec<Task>> {
            Ok(vec![])
        }

        fn save(&mut self, _tasks: &[Task]) -> Result<()> {
            Err(LictError::storage("disk full"))
        }
    }

    fn run(cmd: &str, tasks: &mut TaskList, storage: &mut MemoryStorage) -> Result<String> {
        parse(cmd)?.execute(tasks, storage)
    }

    #[test]
    fn test_only_bye_exits() {
        assert!(Command::Bye.is_exit());
        assert!(!Command::Hello.is_exit());
        assert!(!Command::List.is_exit());
    }

    #[test]
    fn test_add_persists_each_time() {
        let mut tasks = TaskList::new();
        let mut storage = MemoryStorage::new();

        let reply = run("todo read book", &mut tasks, &mut storage).unwrap();
        assert!(reply.contains("[T][ ] read book"));
        assert!(reply.contains("Now you have 1 task in the list."));
        assert_eq!(storage.lines().len(), 1);

        run("event camp /from 2024-06-01 /to 2024-06-03", &mut tasks, &mut storage).unwrap();
        assert_eq!(storage.lines().len(), 2);
        assert_eq!(
            storage.lines()[1],
            "E | 0 | camp | 2024-06-01 | 2024-06-03"
        );
    }

    #[test]
    fn test_list_and_find_do_not_save() {
        let mut tasks = TaskList::from_tasks(vec![Task::todo("a").unwrap()]);
        let mut storage = MemoryStorage::new();
        run("list", &mut tasks, &mut storage).unwrap();
        run("find a", &mut tasks, &mut storage).unwrap();
        assert!(storage.lines().is_empty());
    }

    #[test]
    fn test_empty_list_message() {
        let mut tasks = TaskList::new();
        let reply = run("list", &mut tasks, &mut MemoryStorage::new()).unwrap();
        assert!(reply.starts_with("Your list is empty."));
    }

    #[test]
    fn test_find_reports_original_indices() {
        let mut tasks = TaskList::from_tasks(vec![
            Task::todo("wash car").unwrap(),
            Task::todo("read book").unwrap(),
        ]);
        let reply = run("find book", &mut tasks, &mut MemoryStorage::new()).unwrap();
        assert_eq!(
            reply,
            "Here are the matching tasks in your list:\n2.[T][ ] read book"
        );
        let none = run("find Book", &mut tasks, &mut MemoryStorage::new()).unwrap();
        assert_eq!(none, "No tasks contain 'Book'.");
    }

    #[test]
    fn test_bad_index_changes_nothing() {
        let mut tasks = TaskList::from_tasks(vec![Task::todo("a").unwrap()]);
        let mut storage = MemoryStorage::new();
        for cmd in ["mark 2", "unmark 0", "delete 5", "snooze 9 1d"] {
            let err = run(cmd, &mut tasks, &mut storage).unwrap_err();
            assert!(matches!(err, LictError::Execution(_)), "{}: {:?}", cmd, err);
        }
        assert_eq!(tasks.len(), 1);
        assert!(!tasks.get(1).unwrap().is_done());
        assert!(storage.lines().is_empty());
    }

    #[test]
    fn test_save_failure_becomes_warning() {
        let mut tasks = TaskList::new();
        let reply = parse("todo a")
            .unwrap()
            .execute(&mut tasks, &mut BrokenStorage)
            .unwrap();
        assert!(reply.starts_with("Got it."));
        assert!(reply.contains("Warning:"));
        assert!(reply.contains("disk full"));
        assert_eq!(tasks.len(), 1);
    }

    #[test]
    fn test_snooze_todo_is_rejected() {
        let mut tasks = TaskList::from_tasks(vec![Task::todo("a").unwrap()]);
        let err = run("snooze 1 2d", &mut tasks, &mut MemoryStorage::new()).unwrap_err();
        assert!(matches!(err, LictError::Execution(_)));
    }

    #[test]
    fn test_snooze_deadline_by_duration_and_date() {
        let mut tasks =
            TaskList::from_tasks(vec![Task::deadline("essay", day(2024, 1, 30)).unwrap()]);
        let mut storage = MemoryStorage::new();

        run("snooze 1 3d", &mut tasks, &mut storage).unwrap();
        assert_eq!(
            tasks.get(1).unwrap().kind(),
            &TaskKind::Deadline { by: day(2024, 2, 2) }
        );
        assert_eq!(storage.lines()[0], "D | 0 | essay | 2024-02-02");

        run("snooze 1 2024-03-01 0900", &mut tasks, &mut storage).unwrap();
        assert_eq!(
            tasks.get(1).unwrap().kind(),
            &TaskKind::Deadline {
                by: at(2024, 3, 1, 9, 0)
            }
        );

        let err = run("snooze 1 2024-01-01", &mut tasks, &mut storage).unwrap_err();
        assert!(matches!(err, LictError::Execution(_)));
    }

    #[test]
    fn test_snooze_event_keeps_length() {
        let mut tasks = TaskList::from_tasks(vec![
            Task::event("talk", at(2024, 5, 1, 14, 0), at(2024, 5, 1, 16, 0)).unwrap(),
        ]);
        let mut storage = MemoryStorage::new();

        run("snooze 1 2h", &mut tasks, &mut storage).unwrap();
        assert_eq!(
            tasks.get(1).unwrap().kind(),
            &TaskKind::Event {
                from: at(2024, 5, 1, 16, 0),
                to: at(2024, 5, 1, 18, 0)
            }
        );

        run("snooze 1 2024-05-03 10:00", &mut tasks, &mut storage).unwrap();
        assert_eq!(
            tasks.get(1).unwrap().kind(),
            &TaskKind::Event {
                from: at(2024, 5, 3, 10, 0),
                to: at(2024, 5, 3, 12, 0)
            }
        );
    }

    #[test]
    fn test_snooze_keeps_done_flag_and_description() {
        let mut task = Task::deadline("essay", day(2024, 1, 1)).unwrap();
        task.set_done(true);
        let mut tasks = TaskList::from_tasks(vec![task]);
        run("snooze 1 1w", &mut tasks, &mut MemoryStorage::new()).unwrap();
        let t = tasks.get(1).unwrap();
        assert!(t.is_done());
        assert_eq!(t.description(), "essay");
        assert_eq!(t.kind(), &TaskKind::Deadline { by: day(2024, 1, 8) });
    }
}
