//! Console application state
//!
//! Pure data structures for the TUI. No rendering logic here. The session
//! (the data lists) lives inside this state but is a separate type so the
//! append-only invariant is enforced in one place.

use tracing::debug;

use crate::catalog::{Scenario, TEAM};
use crate::session::Session;

/// Interaction mode (modal)
#[derive(Debug, Default)]
pub enum InteractionMode {
    /// Normal navigation mode: action keys drive the console
    #[default]
    Normal,
    /// Task description input in the footer line
    TaskInput(String),
    /// Modal free-text prompt dialog (blocks the main window)
    Prompt(PromptDialog),
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Get the input buffer if in an input mode
    pub fn input_buffer(&self) -> Option<&str> {
        match self {
            Self::TaskInput(s) => Some(s),
            Self::Prompt(dialog) => Some(&dialog.buffer),
            _ => None,
        }
    }

    /// Get mutable input buffer
    pub fn input_buffer_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::TaskInput(s) => Some(s),
            Self::Prompt(dialog) => Some(&mut dialog.buffer),
            _ => None,
        }
    }
}

/// What a resolved prompt dialog feeds back into
#[derive(Debug, Clone, Copy)]
pub enum PromptKind {
    /// Corrective-actions response for a reviewed scenario
    ScenarioResponse { scenario: &'static Scenario },
    /// Free-text evaluation of the canned AI output
    AiEvaluation,
}

/// Modal free-text prompt
///
/// Blocks interaction with the main window until submitted (non-empty text)
/// or abandoned with Esc. An empty submission re-prompts via the warning
/// dialog instead of resolving.
#[derive(Debug)]
pub struct PromptDialog {
    pub title: &'static str,
    pub question: &'static str,
    pub buffer: String,
    pub kind: PromptKind,
}

impl PromptDialog {
    pub fn new(title: &'static str, question: &'static str, kind: PromptKind) -> Self {
        Self {
            title,
            question,
            buffer: String::new(),
            kind,
        }
    }

    pub fn scenario_response(scenario: &'static Scenario) -> Self {
        Self::new(
            "Scenario Response",
            "Describe your corrective actions:",
            PromptKind::ScenarioResponse { scenario },
        )
    }

    pub fn ai_evaluation() -> Self {
        Self::new(
            "AI Output Evaluation",
            "Is this acceptable? Why or why not?",
            PromptKind::AiEvaluation,
        )
    }
}

/// Main console application state
#[derive(Debug)]
pub struct AppState {
    /// Session data lists (append-only)
    pub session: Session,
    /// Visible log entries; one entry per emitted message
    pub log: Vec<String>,
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// Index into [`TEAM`] of the selected operator
    pub operator_idx: usize,
    /// Active "Input Required" warning, layered over any mode
    pub warning: Option<&'static str>,
    /// Should the app quit
    pub should_quit: bool,
    /// Manual log scroll offset (None = auto-scroll to bottom)
    pub log_scroll: Option<usize>,
    /// Cached max scroll offset (updated during render)
    pub log_max_scroll: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            session: Session::new(),
            log: Vec::new(),
            interaction_mode: InteractionMode::default(),
            operator_idx: 0,
            warning: None,
            should_quit: false,
            log_scroll: None, // None = auto-scroll to bottom
            log_max_scroll: 0,
        }
    }
}

impl AppState {
    /// Create new AppState with the welcome entry already logged
    pub fn new(session: Session) -> Self {
        debug!("AppState::new: called");
        let mut state = Self {
            session,
            ..Self::default()
        };
        state.push_log("Welcome to the Shiftboss supervisor training console");
        state
    }

    /// The currently selected operator
    pub fn operator(&self) -> &'static str {
        TEAM[self.operator_idx % TEAM.len()]
    }

    /// Cycle the operator selector to the next roster entry
    pub fn cycle_operator(&mut self) {
        self.operator_idx = (self.operator_idx + 1) % TEAM.len();
        debug!(operator = %self.operator(), "AppState::cycle_operator: selected");
    }

    /// Append one entry to the visible log
    pub fn push_log(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(entry_len = entry.len(), "AppState::push_log: called");
        self.log.push(entry);
    }

    /// Append several entries to the visible log
    pub fn push_log_entries(&mut self, entries: Vec<String>) {
        debug!(count = entries.len(), "AppState::push_log_entries: called");
        self.log.extend(entries);
    }

    /// Clear the visible log only; session data lists are untouched
    pub fn clear_log(&mut self) {
        debug!("AppState::clear_log: called");
        self.log.clear();
        self.log_scroll = None;
        self.push_log("Log cleared.");
    }

    /// Raise the blocking "Input Required" warning
    pub fn set_warning(&mut self, message: &'static str) {
        debug!(%message, "AppState::set_warning: called");
        self.warning = Some(message);
    }

    /// Scroll the log up by the given lines
    ///
    /// max_scroll is the maximum valid offset (content height minus viewport
    /// height), cached from the last render.
    pub fn log_scroll_up(&mut self, lines: usize, max_scroll: usize) {
        debug!(lines, max_scroll, "AppState::log_scroll_up: called");
        // When at auto-scroll (None), current position is the bottom
        let current = self.log_scroll.unwrap_or(max_scroll).min(max_scroll);
        self.log_scroll = Some(current.saturating_sub(lines));
    }

    /// Scroll the log down by the given lines (towards the bottom)
    pub fn log_scroll_down(&mut self, lines: usize, max_scroll: usize) {
        debug!(lines, max_scroll, "AppState::log_scroll_down: called");
        let current = self.log_scroll.unwrap_or(max_scroll).min(max_scroll);
        let new_scroll = current.saturating_add(lines).min(max_scroll);
        // Reaching the bottom re-enables auto-scroll
        if new_scroll >= max_scroll {
            self.log_scroll = None;
        } else {
            self.log_scroll = Some(new_scroll);
        }
    }

    /// Reset log scroll to auto-scroll mode (follow latest)
    pub fn log_scroll_to_bottom(&mut self) {
        debug!("AppState::log_scroll_to_bottom: called");
        self.log_scroll = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_logs_welcome() {
        let state = AppState::new(Session::new());
        assert_eq!(state.log.len(), 1);
        assert!(state.log[0].starts_with("Welcome"));
    }

    #[test]
    fn test_operator_cycles_through_roster() {
        let mut state = AppState::new(Session::new());
        assert_eq!(state.operator(), "Operator A");

        for expected in ["Operator B", "Inspector C", "Assembler D", "Operator A"] {
            state.cycle_operator();
            assert_eq!(state.operator(), expected);
        }
    }

    #[test]
    fn test_clear_log_leaves_session_data() {
        let mut state = AppState::new(Session::new());
        let entry = state.session.assign_task("Operator A", "Paint wall").expect("assign");
        state.push_log(entry);
        state.session.safety_briefing();

        state.clear_log();

        assert_eq!(state.log, vec!["Log cleared.".to_string()]);
        assert_eq!(state.session.tasks().len(), 1);
        assert_eq!(state.session.safety_history().len(), 1);
    }

    #[test]
    fn test_scroll_up_then_back_to_bottom() {
        let mut state = AppState::new(Session::new());

        state.log_scroll_up(3, 10);
        assert_eq!(state.log_scroll, Some(7));

        state.log_scroll_down(2, 10);
        assert_eq!(state.log_scroll, Some(9));

        // Hitting the bottom switches back to auto-scroll
        state.log_scroll_down(1, 10);
        assert_eq!(state.log_scroll, None);
    }

    #[test]
    fn test_scroll_clamps_at_top() {
        let mut state = AppState::new(Session::new());
        state.log_scroll_up(100, 10);
        assert_eq!(state.log_scroll, Some(0));
    }

    #[test]
    fn test_prompt_buffer_access() {
        let mut mode = InteractionMode::Prompt(PromptDialog::ai_evaluation());
        assert_eq!(mode.input_buffer(), Some(""));

        mode.input_buffer_mut().expect("buffer").push_str("no QC step");
        assert_eq!(mode.input_buffer(), Some("no QC step"));

        assert!(InteractionMode::Normal.input_buffer().is_none());
    }
}
