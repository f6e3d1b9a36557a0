use thiserror::Error;
use tracing::debug;

use crate::person::Person;
use crate::transform::{self, SortKey};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("person list was already loaded")]
    AlreadyPopulated,

    #[error("unknown command '{input}' (try: search <text>, shuffle, first, last, quit)")]
    UnknownCommand { input: String },

    #[error("sort needs a key, expected 'first' or 'last'")]
    MissingSortKey,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Shuffle,
    Sort(SortKey),
    Search(String),
}

impl Action {
    pub fn label(&self) -> String {
        match self {
            Action::Shuffle => "shuffled".to_string(),
            Action::Sort(key) => format!("sorted by {}", key.label()),
            Action::Search(q) if q.is_empty() => "all".to_string(),
            Action::Search(q) => format!("search \"{q}\""),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Apply(Action),
    Quit,
}

impl Command {
    /// Parses one line typed in the interactive session.
    ///
    ///   shuffle | s
    ///   first | f | sort-first
    ///   last | l | sort-last
    ///   sort <first|last>
    ///   search <text> | /<text>
    ///   quit | q | exit
    ///
    /// Search text is kept exactly as typed after the command word and its
    /// single separating space.
    pub fn parse(line: &str) -> Result<Self, RosterError> {
        let line = line.trim_end_matches(['\r', '\n']);
        let lead = line.trim_start();
        if let Some(query) = lead.strip_prefix('/') {
            return Ok(Command::Apply(Action::Search(query.to_string())));
        }

        let trimmed = line.trim();
        let (head, raw_rest) = match lead.split_once(' ') {
            Some((head, rest)) => (head.trim(), rest),
            None => (trimmed, ""),
        };
        let rest = raw_rest.trim();

        match head.to_lowercase().as_str() {
            "shuffle" | "s" => Ok(Command::Apply(Action::Shuffle)),
            "first" | "f" | "sort-first" => Ok(Command::Apply(Action::Sort(SortKey::FirstName))),
            "last" | "l" | "sort-last" => Ok(Command::Apply(Action::Sort(SortKey::LastName))),
            "sort" => {
                if rest.is_empty() {
                    return Err(RosterError::MissingSortKey);
                }
                SortKey::parse(rest)
                    .map(|key| Command::Apply(Action::Sort(key)))
                    .ok_or_else(|| RosterError::UnknownCommand {
                        input: trimmed.to_string(),
                    })
            }
            "search" => Ok(Command::Apply(Action::Search(raw_rest.to_string()))),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(RosterError::UnknownCommand {
                input: trimmed.to_string(),
            }),
        }
    }
}

/// Full list as fetched plus the list currently on screen. Every action
/// derives the visible list from the full list, never from what is already
/// visible.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    full_list: Option<Vec<Person>>,
    visible: Vec<Person>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_populated(&self) -> bool {
        self.full_list.is_some()
    }

    pub fn full_list(&self) -> &[Person] {
        self.full_list.as_deref().unwrap_or(&[])
    }

    pub fn visible(&self) -> &[Person] {
        &self.visible
    }

    pub fn on_fetch_complete(&mut self, list: Vec<Person>) -> Result<(), RosterError> {
        if self.full_list.is_some() {
            return Err(RosterError::AlreadyPopulated);
        }
        debug!(count = list.len(), "roster populated");
        self.visible = list.clone();
        self.full_list = Some(list);
        Ok(())
    }

    pub fn on_shuffle(&mut self) {
        self.derive(transform::shuffle_list);
    }

    pub fn on_sort_first(&mut self) {
        self.derive(transform::sort_by_first_name);
    }

    pub fn on_sort_last(&mut self) {
        self.derive(transform::sort_by_last_name);
    }

    pub fn on_search(&mut self, query: &str) {
        self.derive(|full| transform::filter_by_name(query, full));
    }

    pub fn apply(&mut self, action: &Action) {
        match action {
            Action::Shuffle => self.on_shuffle(),
            Action::Sort(SortKey::FirstName) => self.on_sort_first(),
            Action::Sort(SortKey::LastName) => self.on_sort_last(),
            Action::Search(query) => self.on_search(query),
        }
    }

    fn derive<F>(&mut self, f: F)
    where
        F: FnOnce(&[Person]) -> Vec<Person>,
    {
        // nothing to show until the fetch has succeeded
        if let Some(full) = self.full_list.as_deref() {
            self.visible = f(full);
        }
    }
}
