use crate::users::{UserRecord, filter_users};

/// The three flat UI states. Loading transitions once to Error or
/// Loaded; Loaded stays Loaded across search changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error(String),
    Loaded,
}

#[derive(Debug)]
pub struct DashboardApp {
    pub phase: Phase,
    pub users: Vec<UserRecord>,
    /// None means no filter is active (empty search term); Some holds
    /// the settled filter result, which may be empty.
    pub filtered: Option<Vec<UserRecord>>,
    /// The settled term behind `filtered`, kept so a load that
    /// completes later re-filters against the real record set.
    filter_term: Option<String>,
    pub input: String,
    /// Cursor position in chars, not bytes.
    pub cursor: usize,
}

impl DashboardApp {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            users: Vec::new(),
            filtered: None,
            filter_term: None,
            input: String::new(),
            cursor: 0,
        }
    }

    /// The record set currently driving display.
    pub fn active_set(&self) -> &[UserRecord] {
        match &self.filtered {
            Some(f) => f,
            None => &self.users,
        }
    }

    pub fn finish_load(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.phase = Phase::Loaded;
        // a term that settled while the fetch was still in flight was
        // filtered against the empty pre-load set; redo it now
        if let Some(term) = self.filter_term.clone() {
            self.filtered = Some(filter_users(&self.users, &term));
        }
    }

    pub fn fail_load(&mut self, message: String) {
        self.phase = Phase::Error(message);
    }

    pub fn apply_filter(&mut self, term: &str) {
        self.filter_term = Some(term.to_string());
        self.filtered = Some(filter_users(&self.users, term));
    }

    pub fn clear_filter(&mut self) {
        self.filter_term = None;
        self.filtered = None;
    }

    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert_at_cursor(&mut self, c: char) {
        let at = self.byte_index();
        self.input.insert(at, c);
        self.cursor += 1;
    }

    pub fn backspace_at_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index();
        self.input.remove(at);
        true
    }

    pub fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.input.chars().count() {
            return false;
        }
        let at = self.byte_index();
        self.input.remove(at);
        true
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new()
    }
}
