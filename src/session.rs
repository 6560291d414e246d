//! Session controller
//!
//! Pure domain logic for one console run: the append-only task and
//! safety-history lists, plus the formatting of every log entry the UI
//! emits. No rendering and no terminal I/O here, which keeps the whole
//! surface unit-testable.

use rand::seq::IndexedRandom;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{SAFETY_TIPS, SAMPLE_AI_OUTPUT, SCENARIOS, SUPERVISOR_GUIDANCE, Scenario};

/// Default word-wrap column for scenario details
pub const DEFAULT_WRAP_WIDTH: usize = 80;

/// Errors produced by session operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Required text input was empty after trimming
    #[error("input required: {0}")]
    EmptyInput(&'static str),
}

/// A task handed to an operator. Append-only: never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    pub operator: String,
    pub description: String,
}

/// In-memory state of one running console instance
///
/// Owns the data lists; the visible log is owned by the TUI. Clearing the
/// visible log must not touch anything in here.
#[derive(Debug)]
pub struct Session {
    tasks_completed: Vec<TaskAssignment>,
    safety_history: Vec<&'static str>,
    wrap_width: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the default wrap width
    pub fn new() -> Self {
        debug!("Session::new: called");
        Self::with_wrap_width(DEFAULT_WRAP_WIDTH)
    }

    /// Create a session wrapping scenario details at the given column
    pub fn with_wrap_width(wrap_width: usize) -> Self {
        debug!(wrap_width, "Session::with_wrap_width: called");
        Self {
            tasks_completed: Vec::new(),
            safety_history: Vec::new(),
            wrap_width: wrap_width.max(1),
        }
    }

    /// Assigned tasks in insertion order
    pub fn tasks(&self) -> &[TaskAssignment] {
        &self.tasks_completed
    }

    /// Safety tips shown so far, in the order they were drawn
    pub fn safety_history(&self) -> &[&'static str] {
        &self.safety_history
    }

    /// Record a task assignment and return the log entry for it
    ///
    /// The description is trimmed first; an empty description is rejected
    /// without changing any state.
    pub fn assign_task(&mut self, operator: &str, description: &str) -> Result<String, SessionError> {
        debug!(%operator, description_len = description.len(), "Session::assign_task: called");
        let description = description.trim();
        if description.is_empty() {
            debug!("Session::assign_task: empty description rejected");
            return Err(SessionError::EmptyInput(
                "Please enter a task description before assigning.",
            ));
        }

        self.tasks_completed.push(TaskAssignment {
            operator: operator.to_string(),
            description: description.to_string(),
        });
        Ok(format!("Task Assigned: {} — {}", operator, description))
    }

    /// Pick one scenario uniformly at random from the catalog
    ///
    /// Independent draw each call; repeats are expected.
    pub fn review_scenario(&self) -> &'static Scenario {
        debug!("Session::review_scenario: called");
        let mut rng = rand::rng();
        SCENARIOS.choose(&mut rng).unwrap_or(&SCENARIOS[0])
    }

    /// Log entries introducing a scenario: header line plus wrapped details
    pub fn scenario_intro(&self, scenario: &Scenario) -> Vec<String> {
        debug!(title = %scenario.title, "Session::scenario_intro: called");
        vec![
            format!("--- Scenario: {} ---", scenario.title),
            wrap_text(scenario.details, self.wrap_width).join("\n"),
        ]
    }

    /// Log entries listing a scenario's recommended actions
    pub fn recommended_actions(&self, scenario: &Scenario) -> Vec<String> {
        debug!(title = %scenario.title, "Session::recommended_actions: called");
        let mut entries = vec!["Recommended Best Practice Actions:".to_string()];
        for step in scenario.expected_actions {
            entries.push(format!(" - {}", step));
        }
        entries
    }

    /// Draw a random safety tip, append it to the history, return the entry
    pub fn safety_briefing(&mut self) -> String {
        debug!("Session::safety_briefing: called");
        let mut rng = rand::rng();
        let tip = SAFETY_TIPS.choose(&mut rng).copied().unwrap_or(SAFETY_TIPS[0]);
        self.safety_history.push(tip);
        format!("Safety Briefing Tip: {}", tip)
    }

    /// Log entries introducing the canned AI workflow sample
    pub fn ai_output_intro(&self) -> Vec<String> {
        debug!("Session::ai_output_intro: called");
        vec![
            "AI-Generated Workflow Sample:".to_string(),
            format!("  {}", SAMPLE_AI_OUTPUT),
        ]
    }

    /// The fixed evaluation verdict, independent of what the user wrote
    pub fn supervisor_guidance(&self) -> &'static str {
        debug!("Session::supervisor_guidance: called");
        SUPERVISOR_GUIDANCE
    }

    /// Log entries listing completed tasks, or the empty-list message
    pub fn completed_tasks(&self) -> Vec<String> {
        debug!(count = self.tasks_completed.len(), "Session::completed_tasks: called");
        if self.tasks_completed.is_empty() {
            return vec!["No tasks have been assigned/completed yet.".to_string()];
        }

        let mut entries = vec!["Completed Tasks:".to_string()];
        for task in &self.tasks_completed {
            entries.push(format!(" - {}: {}", task.operator, task.description));
        }
        entries
    }
}

/// Greedy word wrap at the given column
///
/// Words longer than the column get a line of their own rather than being
/// split mid-word.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TEAM;

    #[test]
    fn test_assign_task_appends_and_formats() {
        let mut session = Session::new();
        let entry = session.assign_task("Operator A", "Paint wall").expect("non-empty task");

        assert_eq!(entry, "Task Assigned: Operator A — Paint wall");
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.tasks()[0].operator, "Operator A");
        assert_eq!(session.tasks()[0].description, "Paint wall");
    }

    #[test]
    fn test_assign_task_trims_description() {
        let mut session = Session::new();
        session
            .assign_task("Inspector C", "  check torque specs \n")
            .expect("non-empty task");

        assert_eq!(session.tasks()[0].description, "check torque specs");
    }

    #[test]
    fn test_assign_task_rejects_blank_input() {
        let mut session = Session::new();
        for blank in ["", "   ", "\t\n"] {
            let result = session.assign_task("Operator B", blank);
            assert!(matches!(result, Err(SessionError::EmptyInput(_))));
        }
        assert!(session.tasks().is_empty());
    }

    #[test]
    fn test_review_scenario_draws_from_catalog() {
        let session = Session::new();
        for _ in 0..50 {
            let scenario = session.review_scenario();
            assert!(SCENARIOS.iter().any(|s| s.title == scenario.title));
        }
    }

    #[test]
    fn test_scenario_intro_wraps_details() {
        let session = Session::with_wrap_width(30);
        let entries = session.scenario_intro(&SCENARIOS[0]);

        assert_eq!(entries[0], format!("--- Scenario: {} ---", SCENARIOS[0].title));
        for line in entries[1].lines() {
            assert!(line.chars().count() <= 30, "line too long: {:?}", line);
        }
    }

    #[test]
    fn test_recommended_actions_match_catalog() {
        let session = Session::new();
        for scenario in SCENARIOS {
            let entries = session.recommended_actions(scenario);
            assert_eq!(entries[0], "Recommended Best Practice Actions:");
            assert_eq!(entries.len(), scenario.expected_actions.len() + 1);
            for (entry, step) in entries[1..].iter().zip(scenario.expected_actions) {
                assert_eq!(entry, &format!(" - {}", step));
            }
        }
    }

    #[test]
    fn test_safety_briefing_appends_history() {
        let mut session = Session::new();
        for round in 1..=10 {
            let entry = session.safety_briefing();
            assert_eq!(session.safety_history().len(), round);

            let tip = *session.safety_history().last().expect("tip recorded");
            assert!(SAFETY_TIPS.contains(&tip));
            assert_eq!(entry, format!("Safety Briefing Tip: {}", tip));
        }
    }

    #[test]
    fn test_completed_tasks_empty_message() {
        let session = Session::new();
        assert_eq!(
            session.completed_tasks(),
            vec!["No tasks have been assigned/completed yet.".to_string()]
        );
    }

    #[test]
    fn test_completed_tasks_in_insertion_order() {
        let mut session = Session::new();
        session.assign_task(TEAM[0], "Paint wall").expect("assign");
        session.assign_task(TEAM[2], "Audit line 3").expect("assign");

        let entries = session.completed_tasks();
        assert_eq!(entries[0], "Completed Tasks:");
        assert_eq!(entries[1], " - Operator A: Paint wall");
        assert_eq!(entries[2], " - Inspector C: Audit line 3");
    }

    #[test]
    fn test_clearing_log_is_not_sessions_concern() {
        // The session exposes no way to remove entries at all; both lists
        // only ever grow.
        let mut session = Session::new();
        session.assign_task(TEAM[1], "Restock fasteners").expect("assign");
        session.safety_briefing();
        assert_eq!(session.tasks().len(), 1);
        assert_eq!(session.safety_history().len(), 1);
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let wrapped = wrap_text("one two three four five six seven", 10);
        for line in &wrapped {
            assert!(line.chars().count() <= 10);
        }
        assert_eq!(wrapped.join(" "), "one two three four five six seven");
    }

    #[test]
    fn test_wrap_text_keeps_long_words_whole() {
        let wrapped = wrap_text("tiny incomprehensibilities tiny", 8);
        assert!(wrapped.contains(&"incomprehensibilities".to_string()));
    }

    #[test]
    fn test_wrap_text_empty_input() {
        assert!(wrap_text("", 80).is_empty());
        assert!(wrap_text("   ", 80).is_empty());
    }
}
