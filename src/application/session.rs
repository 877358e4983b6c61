//! Session service
//!
//! Owns one tree of `i64` keys and applies parsed commands to it. Rendering is
//! left to whatever observers the caller subscribed.

use itertools::Itertools;
use tracing::{debug, info, instrument};

use crate::application::command::{parse_line, Command};
use crate::application::ApplicationResult;
use crate::domain::{AvlTree, ChangeEvent, TreeObserver, TreeView};

/// Result of one mutation on one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    pub value: i64,
    pub changed: bool,
}

/// Snapshot of tree dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub len: usize,
    pub height: usize,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Inserted(Vec<Change>),
    Deleted(Vec<Change>),
    Contains { value: i64, found: bool },
    Cleared,
    Shown,
    Listed(Vec<i64>),
    Valid,
    Stats(Stats),
    Help,
    Quit,
}

/// One interactive or scripted editing session.
#[derive(Debug, Default)]
pub struct Session {
    tree: AvlTree<i64>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> &AvlTree<i64> {
        &self.tree
    }

    pub fn view(&self) -> TreeView<'_, i64> {
        self.tree.view()
    }

    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver<i64>>) {
        self.tree.subscribe(observer);
    }

    pub fn on_change<F>(&mut self, f: F)
    where
        F: FnMut(&ChangeEvent<i64>, TreeView<'_, i64>) + 'static,
    {
        self.tree.on_change(f);
    }

    /// Inserts initial values; observers subscribed so far see each one.
    #[instrument(level = "debug", skip(self))]
    pub fn seed(&mut self, values: &[i64]) {
        self.tree.extend(values.iter().copied());
        info!("seeded {} value(s), tree size {}", values.len(), self.tree.len());
    }

    #[instrument(level = "debug", skip(self))]
    pub fn execute(&mut self, command: Command) -> ApplicationResult<Outcome> {
        let outcome = match command {
            Command::Insert(values) => Outcome::Inserted(
                values
                    .into_iter()
                    .map(|value| Change {
                        value,
                        changed: self.tree.insert(value),
                    })
                    .collect(),
            ),
            Command::Delete(values) => Outcome::Deleted(
                values
                    .into_iter()
                    .map(|value| Change {
                        value,
                        changed: self.tree.delete(&value),
                    })
                    .collect(),
            ),
            Command::Contains(value) => Outcome::Contains {
                value,
                found: self.tree.contains(&value),
            },
            Command::Clear => {
                self.tree.clear();
                Outcome::Cleared
            }
            Command::Show => Outcome::Shown,
            Command::InOrder => Outcome::Listed(self.tree.to_vec()),
            Command::Check => {
                self.tree.validate()?;
                Outcome::Valid
            }
            Command::Stats => Outcome::Stats(self.stats()),
            Command::Help => Outcome::Help,
            Command::Quit => Outcome::Quit,
        };
        debug!(?outcome, "executed");
        Ok(outcome)
    }

    /// Parses and executes one line; `None` for blank lines and comments.
    pub fn execute_line(&mut self, line: &str) -> ApplicationResult<Option<Outcome>> {
        match parse_line(line)? {
            Some(command) => self.execute(command).map(Some),
            None => Ok(None),
        }
    }

    /// Runs a whole script, handing each outcome and the resulting tree to
    /// `on_outcome` as it happens.
    ///
    /// Stops at the first failing line (reported with its 1-based number) or at
    /// `quit`. Returns the number of commands executed.
    #[instrument(level = "debug", skip(self, source, on_outcome))]
    pub fn run_script<F>(&mut self, source: &str, mut on_outcome: F) -> ApplicationResult<usize>
    where
        F: FnMut(&Outcome, TreeView<'_, i64>),
    {
        let mut executed = 0;
        for (idx, line) in source.lines().enumerate() {
            let outcome = self.execute_line(line).map_err(|e| e.at_line(idx + 1))?;
            if let Some(outcome) = outcome {
                executed += 1;
                on_outcome(&outcome, self.tree.view());
                if outcome == Outcome::Quit {
                    break;
                }
            }
        }
        debug!(executed, "script finished");
        Ok(executed)
    }

    pub fn stats(&self) -> Stats {
        Stats {
            len: self.tree.len(),
            height: self.tree.height(),
            min: self.tree.min().copied(),
            max: self.tree.max().copied(),
        }
    }
}

impl Stats {
    pub fn summary(&self) -> String {
        let bounds = [self.min, self.max]
            .iter()
            .map(|v| v.map_or_else(|| "-".to_string(), |v| v.to_string()))
            .join("..");
        format!("size {}, height {}, range {}", self.len, self.height, bounds)
    }
}
