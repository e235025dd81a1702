// File: ./src/controller.rs
//! Front controller shared by every front-end.
//!
//! `Lict` owns the task list and the storage adapter for the whole session.
//! Front-ends feed it raw lines through [`Lict::get_response`] and decide
//! themselves how to show the reply and when to stop.
use crate::command::{Command, Parser};
use crate::config::Config;
use crate::context::AppContext;
use crate::model::TaskList;
use crate::storage::{FileStorage, TaskStorage};
use chrono::Duration;

/// What a front-end shows after one input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub is_exit: bool,
}

pub struct Lict {
    tasks: TaskList,
    storage: Box<dyn TaskStorage>,
    parser: Parser,
    user_name: Option<String>,
    load_warning: Option<String>,
}

impl Lict {
    /// Loads the task list from `storage`. A failed load starts an empty list
    /// and keeps a warning for the front-end to show.
    pub fn new(mut storage: Box<dyn TaskStorage>, config: &Config) -> Self {
        let (tasks, load_warning) = match storage.load() {
            Ok(tasks) => (TaskList::from_tasks(tasks), None),
            Err(e) => {
                log::warn!("Starting with an empty list: {}", e);
                (
                    TaskList::new(),
                    Some(format!(
                        "Warning: I couldn't load your saved tasks ({}). Starting with an empty list; \
                         the old file will be kept aside on the next save.",
                        e
                    )),
                )
            }
        };

        Self {
            tasks,
            storage,
            parser: Parser::new(Duration::minutes(i64::from(config.default_snooze_mins))),
            user_name: config.user_name.clone(),
            load_warning,
        }
    }

    /// Builds a controller backed by the data file the config points at.
    pub fn from_context(ctx: &dyn AppContext, config: &Config) -> anyhow::Result<Self> {
        let path = config.data_file_path(ctx)?;
        log::info!("Using data file {}", path.display());
        Ok(Self::new(Box::new(FileStorage::new(path)), config))
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    pub fn greeting(&self) -> String {
        match &self.user_name {
            Some(name) => format!("Hello {}! I'm Lict\nWhat can I do for you?", name),
            None => "Hello! I'm Lict\nWhat can I do for you?".to_string(),
        }
    }

    /// Parses and runs one line. Every failure becomes a reply; nothing here
    /// ends the session except a successful `bye`.
    pub fn get_response(&mut self, input: &str) -> Response {
        let command = match self.parser.parse(input) {
            Ok(c) => c,
            Err(e) => {
                log::debug!("Rejected input {:?}: {}", input, e);
                return Response::error(&e);
            }
        };
        log::debug!("Parsed {:?}", command);

        if command == Command::Hello {
            return Response {
                text: self.greeting(),
                is_exit: false,
            };
        }

        match command.execute(&mut self.tasks, self.storage.as_mut()) {
            Ok(text) => Response {
                text,
                is_exit: command.is_exit(),
            },
            Err(e) => {
                log::debug!("{:?} failed: {}", command, e);
                Response::error(&e)
            }
        }
    }
}

impl Response {
    fn error(e: &crate::error::LictError) -> Self {
        Self {
            text: format!("OOPS!!! {}", e),
            is_exit: false,
        }
    }
}
