use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::tui::debounce::Debouncer;
use crate::tui::state::DashboardApp;
use crate::tui::view::enter_terminal;
use crate::users::UserRecord;

/// Outcome of the one-shot background fetch, delivered to the event
/// loop through its inbox.
#[derive(Debug)]
pub enum LoadEvent {
    Loaded(Vec<UserRecord>),
    Failed(String),
}

impl DashboardApp {
    pub async fn run(
        &mut self,
        inbox: mpsc::Receiver<LoadEvent>,
        debounce_delay: Duration,
    ) -> Result<()> {
        let _guard = enter_terminal()?;
        self.event_loop(inbox, debounce_delay).await
    }

    async fn event_loop(
        &mut self,
        mut inbox: mpsc::Receiver<LoadEvent>,
        debounce_delay: Duration,
    ) -> Result<()> {
        let mut events = EventStream::new();
        let mut debouncer = Debouncer::new(debounce_delay);
        let mut inbox_open = true;
        let mut dirty = true;
        loop {
            if dirty {
                self.draw()?;
                dirty = false;
            }
            let armed = debouncer.is_armed();
            tokio::select! {
                maybe_ev = events.next() => {
                    match maybe_ev {
                        Some(Ok(Event::Key(k))) => {
                            if self.handle_key(k, &mut debouncer) {
                                // exiting drops the debouncer: a pending
                                // timer never applies a stale filter
                                return Ok(());
                            }
                            dirty = true;
                        }
                        Some(Ok(Event::Resize(_, _))) => {
                            dirty = true;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!("terminal event error: {e}");
                        }
                        None => return Ok(()),
                    }
                }
                term = debouncer.fired(), if armed => {
                    debug!(%term, "search term settled");
                    self.apply_filter(&term);
                    dirty = true;
                }
                msg = inbox.recv(), if inbox_open => {
                    match msg {
                        Some(LoadEvent::Loaded(users)) => {
                            debug!(count = users.len(), "load finished");
                            self.finish_load(users);
                        }
                        Some(LoadEvent::Failed(message)) => {
                            warn!(%message, "load failed");
                            self.fail_load(message);
                        }
                        None => {}
                    }
                    // the fetch happens exactly once; stop polling the
                    // channel after the first delivery
                    inbox_open = false;
                    dirty = true;
                }
            }
        }
    }

    /// Returns true when the app should exit.
    fn handle_key(&mut self, k: KeyEvent, debouncer: &mut Debouncer) -> bool {
        if k.kind == KeyEventKind::Release {
            return false;
        }
        if k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match k.code {
            KeyCode::Esc => return true,
            KeyCode::Char(c) => {
                self.insert_at_cursor(c);
                self.search_changed(debouncer);
            }
            KeyCode::Backspace => {
                if self.backspace_at_cursor() {
                    self.search_changed(debouncer);
                }
            }
            KeyCode::Delete => {
                if self.delete_at_cursor() {
                    self.search_changed(debouncer);
                }
            }
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => {}
        }
        false
    }

    /// Empty term drops the filter synchronously; anything else
    /// (re)schedules the debounced recomputation.
    fn search_changed(&mut self, debouncer: &mut Debouncer) {
        if self.input.is_empty() {
            debouncer.cancel();
            self.clear_filter();
        } else {
            debouncer.schedule(self.input.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::Department;
    use tokio::time::timeout;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn record(id: u64, first: &str) -> UserRecord {
        UserRecord {
            id,
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            avatar: String::new(),
            department: Department::Hr,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_the_window_filters_once_with_the_final_term() {
        let mut app = DashboardApp::new();
        app.finish_load(vec![record(1, "Anna"), record(2, "Andrew"), record(3, "Ben")]);
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        for c in "an".chars() {
            app.handle_key(key(KeyCode::Char(c)), &mut debouncer);
        }
        // still within the quiet window, keep typing
        tokio::time::advance(Duration::from_millis(100)).await;
        for c in "na".chars() {
            app.handle_key(key(KeyCode::Char(c)), &mut debouncer);
        }

        // nothing applied before the window elapses
        assert!(app.filtered.is_none());

        let term = debouncer.fired().await;
        assert_eq!(term, "anna");
        app.apply_filter(&term);
        let ids: Vec<u64> = app.active_set().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1]);

        // exactly one computation per settled term
        assert!(!debouncer.is_armed());
        let again = timeout(Duration::from_millis(1_000), debouncer.fired()).await;
        assert!(again.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_the_input_cancels_and_restores_the_full_set() {
        let mut app = DashboardApp::new();
        app.finish_load(vec![record(1, "Anna"), record(2, "Ben")]);
        let mut debouncer = Debouncer::new(Duration::from_millis(300));

        app.handle_key(key(KeyCode::Char('x')), &mut debouncer);
        assert!(debouncer.is_armed());
        app.handle_key(key(KeyCode::Backspace), &mut debouncer);

        assert!(!debouncer.is_armed());
        assert!(app.filtered.is_none());
        assert_eq!(app.active_set().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn esc_and_ctrl_c_request_exit() {
        let mut app = DashboardApp::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        assert!(app.handle_key(key(KeyCode::Esc), &mut debouncer));
        assert!(app.handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut debouncer
        ));
        assert!(!app.handle_key(key(KeyCode::Char('c')), &mut debouncer));
    }

    #[test]
    fn cursor_keys_do_not_touch_the_debouncer() {
        let mut app = DashboardApp::new();
        let mut debouncer = Debouncer::new(Duration::from_millis(300));
        app.handle_key(key(KeyCode::Left), &mut debouncer);
        app.handle_key(key(KeyCode::Home), &mut debouncer);
        app.handle_key(key(KeyCode::End), &mut debouncer);
        assert!(!debouncer.is_armed());
    }
}
