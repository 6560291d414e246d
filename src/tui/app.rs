//! Console application - event handling and state management
//!
//! The App struct owns the AppState and handles all keyboard events.
//! It does not do any rendering - that's delegated to the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, trace};

use super::state::{AppState, InteractionMode, PromptDialog, PromptKind};
use crate::session::{Session, SessionError};

/// Console application
#[derive(Debug)]
pub struct App {
    /// Application state
    state: AppState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new application instance with a fresh session
    pub fn new() -> Self {
        debug!("App::new: called");
        Self::with_session(Session::new())
    }

    /// Create a new application instance around an existing session
    pub fn with_session(session: Session) -> Self {
        debug!("App::with_session: called");
        Self {
            state: AppState::new(session),
        }
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        trace!("App::state: called");
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        trace!("App::state_mut: called");
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_key: called");
        // Ctrl+C always force quits, even under a modal
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            debug!("App::handle_key: Ctrl+C force quit");
            return true;
        }

        // The warning dialog is modal over everything: any key dismisses it
        // and the event goes no further
        if self.state.warning.is_some() {
            debug!("App::handle_key: dismissing warning dialog");
            self.state.warning = None;
            return false;
        }

        // Handle based on interaction mode
        match &self.state.interaction_mode {
            InteractionMode::Normal => {
                debug!("App::handle_key: Normal mode");
                self.handle_normal_key(key)
            }
            InteractionMode::TaskInput(_) => {
                debug!("App::handle_key: TaskInput mode");
                self.handle_task_input_key(key)
            }
            InteractionMode::Prompt(_) => {
                debug!("App::handle_key: Prompt mode");
                self.handle_prompt_key(key)
            }
            InteractionMode::Help => {
                debug!("App::handle_key: Help mode");
                self.handle_help_key(key)
            }
        }
    }

    /// Handle key in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_normal_key: called");
        match key.code {
            // === Quit ===
            KeyCode::Char('q') | KeyCode::Esc => {
                debug!("App::handle_normal_key: quit requested");
                self.state.should_quit = true;
            }

            // === Help ===
            KeyCode::Char('?') | KeyCode::F(1) => {
                debug!("App::handle_normal_key: showing help");
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Task assignment ===
            KeyCode::Char('n') => {
                debug!("App::handle_normal_key: entering task input mode");
                self.state.interaction_mode = InteractionMode::TaskInput(String::new());
            }
            KeyCode::Char('o') => {
                debug!("App::handle_normal_key: cycling operator");
                self.state.cycle_operator();
            }

            // === Console actions ===
            KeyCode::Char('r') => {
                debug!("App::handle_normal_key: review random scenario");
                self.handle_review_scenario();
            }
            KeyCode::Char('b') => {
                debug!("App::handle_normal_key: safety briefing");
                let entry = self.state.session.safety_briefing();
                self.state.push_log(entry);
            }
            KeyCode::Char('e') => {
                debug!("App::handle_normal_key: evaluate AI output");
                self.handle_evaluate_ai_output();
            }
            KeyCode::Char('t') => {
                debug!("App::handle_normal_key: show completed tasks");
                let entries = self.state.session.completed_tasks();
                self.state.push_log_entries(entries);
            }
            KeyCode::Char('c') => {
                debug!("App::handle_normal_key: clear log");
                self.state.clear_log();
            }

            // === Log scrolling ===
            KeyCode::Up | KeyCode::Char('k') => {
                let max = self.state.log_max_scroll;
                self.state.log_scroll_up(1, max);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.state.log_max_scroll;
                self.state.log_scroll_down(1, max);
            }
            KeyCode::PageUp => {
                let max = self.state.log_max_scroll;
                self.state.log_scroll_up(10, max);
            }
            KeyCode::PageDown => {
                let max = self.state.log_max_scroll;
                self.state.log_scroll_down(10, max);
            }
            KeyCode::Char('g') => {
                debug!("App::handle_normal_key: scroll to top");
                self.state.log_scroll = Some(0);
            }
            KeyCode::Char('G') => {
                debug!("App::handle_normal_key: scroll to bottom");
                self.state.log_scroll_to_bottom();
            }

            _ => {
                debug!("App::handle_normal_key: unhandled key");
            }
        }

        false
    }

    /// Review a random scenario: log the intro, then open the modal prompt
    /// for corrective actions. The recommended actions are emitted when the
    /// prompt resolves, submitted or not.
    fn handle_review_scenario(&mut self) {
        debug!("App::handle_review_scenario: called");
        let scenario = self.state.session.review_scenario();
        let intro = self.state.session.scenario_intro(scenario);
        self.state.push_log_entries(intro);
        self.state.interaction_mode = InteractionMode::Prompt(PromptDialog::scenario_response(scenario));
    }

    /// Show the canned AI output and open the modal evaluation prompt
    fn handle_evaluate_ai_output(&mut self) {
        debug!("App::handle_evaluate_ai_output: called");
        let intro = self.state.session.ai_output_intro();
        self.state.push_log_entries(intro);
        self.state.interaction_mode = InteractionMode::Prompt(PromptDialog::ai_evaluation());
    }

    /// Handle key in task input mode
    fn handle_task_input_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_task_input_key: called");
        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_task_input_key: Esc - cancel task input");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            KeyCode::Tab => {
                debug!("App::handle_task_input_key: Tab - cycle operator");
                self.state.cycle_operator();
            }
            KeyCode::Enter => {
                debug!("App::handle_task_input_key: Enter - assign task");
                self.submit_task();
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.push(c);
                }
            }
            _ => {
                debug!("App::handle_task_input_key: unhandled key");
            }
        }

        false
    }

    /// Submit the task input buffer to the session
    ///
    /// An empty description raises the warning dialog and keeps the input
    /// mode (and buffer) active so the user can correct it.
    fn submit_task(&mut self) {
        debug!("App::submit_task: called");
        let description = match self.state.interaction_mode.input_buffer() {
            Some(buf) => buf.to_string(),
            None => return,
        };

        let operator = self.state.operator();
        match self.state.session.assign_task(operator, &description) {
            Ok(entry) => {
                debug!("App::submit_task: task assigned");
                self.state.push_log(entry);
                self.state.interaction_mode = InteractionMode::Normal;
            }
            Err(SessionError::EmptyInput(message)) => {
                debug!("App::submit_task: empty description, warning");
                self.state.set_warning(message);
            }
        }
    }

    /// Handle key in prompt dialog mode
    fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_prompt_key: called");
        match key.code {
            KeyCode::Esc => {
                debug!("App::handle_prompt_key: Esc - abandon prompt");
                self.resolve_prompt(None);
            }
            KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
                debug!("App::handle_prompt_key: Alt+Enter - newline");
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.push('\n');
                }
            }
            KeyCode::Enter => {
                debug!("App::handle_prompt_key: Enter - submit prompt");
                let response = self
                    .state
                    .interaction_mode
                    .input_buffer()
                    .map(|buf| buf.trim().to_string())
                    .unwrap_or_default();
                if response.is_empty() {
                    debug!("App::handle_prompt_key: empty response, re-prompt");
                    self.state.set_warning("Please enter a response before submitting.");
                } else {
                    self.resolve_prompt(Some(response));
                }
            }
            KeyCode::Backspace => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buf) = self.state.interaction_mode.input_buffer_mut() {
                    buf.push(c);
                }
            }
            _ => {
                debug!("App::handle_prompt_key: unhandled key");
            }
        }

        false
    }

    /// Resolve the active prompt dialog
    ///
    /// `response` is None when the dialog was abandoned; no response entry is
    /// logged in that case, but the follow-up emission (recommended actions
    /// or supervisor guidance) happens either way.
    fn resolve_prompt(&mut self, response: Option<String>) {
        debug!(has_response = response.is_some(), "App::resolve_prompt: called");
        let mode = std::mem::replace(&mut self.state.interaction_mode, InteractionMode::Normal);
        let InteractionMode::Prompt(dialog) = mode else {
            debug!("App::resolve_prompt: no prompt active");
            return;
        };

        match dialog.kind {
            PromptKind::ScenarioResponse { scenario } => {
                if let Some(text) = response {
                    self.state.push_log(format!("Your response: {}", text));
                }
                let entries = self.state.session.recommended_actions(scenario);
                self.state.push_log_entries(entries);
            }
            PromptKind::AiEvaluation => {
                if let Some(text) = response {
                    self.state.push_log(format!("Your evaluation: {}", text));
                }
                let guidance = self.state.session.supervisor_guidance();
                self.state.push_log(guidance);
            }
        }
    }

    /// Handle key in help mode
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        debug!(?key, "App::handle_help_key: called");
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                debug!("App::handle_help_key: closing help");
                self.state.interaction_mode = InteractionMode::Normal;
            }
            _ => {
                debug!("App::handle_help_key: unhandled key");
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SCENARIOS;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_assign_task_flow() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Paint wall");
        app.handle_key(key(KeyCode::Enter));

        assert!(matches!(app.state().interaction_mode, InteractionMode::Normal));
        assert_eq!(app.state().session.tasks().len(), 1);
        assert_eq!(
            app.state().log.last().map(String::as_str),
            Some("Task Assigned: Operator A — Paint wall")
        );
    }

    #[test]
    fn test_empty_task_raises_warning_and_keeps_input_mode() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "   ");
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().warning.is_some());
        assert!(matches!(app.state().interaction_mode, InteractionMode::TaskInput(_)));
        assert!(app.state().session.tasks().is_empty());

        // Any key dismisses the warning without reaching the input buffer
        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.state().warning.is_none());
        assert_eq!(app.state().interaction_mode.input_buffer(), Some("   "));
    }

    #[test]
    fn test_tab_cycles_operator_inside_task_input() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('n')));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "Restock fasteners");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.state().session.tasks()[0].operator, "Operator B");
    }

    #[test]
    fn test_scenario_review_prompt_submit() {
        let mut app = App::new();
        let log_before = app.state().log.len();
        app.handle_key(key(KeyCode::Char('r')));

        // Intro logged: header + details, and the modal prompt is up
        assert_eq!(app.state().log.len(), log_before + 2);
        assert!(matches!(app.state().interaction_mode, InteractionMode::Prompt(_)));

        type_text(&mut app, "stop the line");
        app.handle_key(key(KeyCode::Enter));

        let log = &app.state().log;
        assert!(log.contains(&"Your response: stop the line".to_string()));
        assert!(log.contains(&"Recommended Best Practice Actions:".to_string()));
        // The emitted action list is one of the three fixed catalogs
        assert!(
            SCENARIOS
                .iter()
                .any(|s| s.expected_actions.iter().all(|a| log.contains(&format!(" - {}", a))))
        );
    }

    #[test]
    fn test_scenario_prompt_abandoned_still_emits_actions() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Esc));

        let log = &app.state().log;
        assert!(!log.iter().any(|e| e.starts_with("Your response:")));
        assert!(log.contains(&"Recommended Best Practice Actions:".to_string()));
        assert!(matches!(app.state().interaction_mode, InteractionMode::Normal));
    }

    #[test]
    fn test_prompt_empty_submission_re_prompts() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('r')));
        app.handle_key(key(KeyCode::Enter));

        assert!(app.state().warning.is_some());
        assert!(matches!(app.state().interaction_mode, InteractionMode::Prompt(_)));
        // No follow-up emitted yet
        assert!(!app.state().log.contains(&"Recommended Best Practice Actions:".to_string()));
    }

    #[test]
    fn test_evaluate_ai_output_always_same_guidance() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('e')));
        type_text(&mut app, "looks fine to me");
        app.handle_key(key(KeyCode::Enter));

        let log = &app.state().log;
        assert!(log.contains(&"AI-Generated Workflow Sample:".to_string()));
        assert!(log.contains(&"Your evaluation: looks fine to me".to_string()));
        assert!(log.last().expect("guidance").starts_with("Supervisor Guidance:"));
    }

    #[test]
    fn test_safety_briefing_appends_history() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('b')));

        assert_eq!(app.state().session.safety_history().len(), 1);
        assert!(
            app.state()
                .log
                .last()
                .expect("entry")
                .starts_with("Safety Briefing Tip: ")
        );
    }

    #[test]
    fn test_show_tasks_empty_then_populated() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(
            app.state().log.last().map(String::as_str),
            Some("No tasks have been assigned/completed yet.")
        );

        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Paint wall");
        app.handle_key(key(KeyCode::Enter));
        app.handle_key(key(KeyCode::Char('t')));

        assert_eq!(
            app.state().log.last().map(String::as_str),
            Some(" - Operator A: Paint wall")
        );
    }

    #[test]
    fn test_clear_log_keeps_session_lists() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('b')));
        app.handle_key(key(KeyCode::Char('n')));
        type_text(&mut app, "Paint wall");
        app.handle_key(key(KeyCode::Enter));

        app.handle_key(key(KeyCode::Char('c')));

        assert_eq!(app.state().log, vec!["Log cleared.".to_string()]);
        assert_eq!(app.state().session.tasks().len(), 1);
        assert_eq!(app.state().session.safety_history().len(), 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.state().should_quit);

        let mut app = App::new();
        assert!(app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = App::new();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(matches!(app.state().interaction_mode, InteractionMode::Help));

        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.state().interaction_mode, InteractionMode::Normal));
    }
}
