// File: ./src/model/list.rs
use crate::error::{LictError, Result};
use crate::model::Task;

/// Ordered collection of every task in the session.
///
/// Callers speak in 1-based indices; storage is a plain `Vec`, so removal
/// closes the gap and later tasks shift down by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn add(&mut self, task: Task) -> &Task {
        self.tasks.push(task);
        &self.tasks[self.tasks.len() - 1]
    }

    fn position(&self, index: usize) -> Result<usize> {
        if index == 0 || index > self.tasks.len() {
            return Err(LictError::execution(match self.tasks.len() {
                0 => format!("There is no task {}: your list is empty.", index),
                n => format!(
                    "There is no task {}. Please pick a number from 1 to {}.",
                    index, n
                ),
            }));
        }
        Ok(index - 1)
    }

    pub fn get(&self, index: usize) -> Result<&Task> {
        let pos = self.position(index)?;
        Ok(&self.tasks[pos])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let pos = self.position(index)?;
        Ok(&mut self.tasks[pos])
    }

    pub fn remove(&mut self, index: usize) -> Result<Task> {
        let pos = self.position(index)?;
        Ok(self.tasks.remove(pos))
    }

    /// Tasks whose description contains `keyword`, paired with their 1-based index.
    /// An empty keyword matches everything.
    pub fn find(&self, keyword: &str) -> Vec<(usize, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .filter(|(_, t)| t.description().contains(keyword))
            .map(|(i, t)| (i + 1, t))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(names: &[&str]) -> TaskList {
        TaskList::from_tasks(names.iter().map(|n| Task::todo(n).unwrap()).collect())
    }

    #[test]
    fn test_out_of_range_indices() {
        let mut list = list_of(&["a", "b"]);
        assert!(matches!(list.get(0), Err(LictError::Execution(_))));
        assert!(matches!(list.get(3), Err(LictError::Execution(_))));
        assert!(list.remove(3).is_err());
        assert_eq!(list.len(), 2);
        assert!(TaskList::new().get_mut(1).is_err());
    }

    #[test]
    fn test_remove_keeps_relative_order() {
        let mut list = list_of(&["a", "b", "c", "d"]);
        let removed = list.remove(2).unwrap();
        assert_eq!(removed.description(), "b");
        let names: Vec<_> = list.iter().map(|t| t.description()).collect();
        assert_eq!(names, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_find_is_case_sensitive_and_keeps_indices() {
        let list = list_of(&["read Book", "buy book", "book club"]);
        let hits: Vec<_> = list.find("book").into_iter().map(|(i, _)| i).collect();
        assert_eq!(hits, vec![2, 3]);
        assert_eq!(list.find("").len(), 3);
    }
}
