//! Static lookup tables for the training console
//!
//! Everything the console "knows" lives here: the team roster, the scenario
//! catalog, the safety tips, and the canned AI output used by the evaluation
//! exercise. All of it is immutable static data.

/// A fixed training vignette with expected corrective actions
#[derive(Debug, PartialEq, Eq)]
pub struct Scenario {
    /// Short title shown in the log header line
    pub title: &'static str,
    /// One-paragraph description of what happened
    pub details: &'static str,
    /// Best-practice corrective actions, in recommended order
    pub expected_actions: &'static [&'static str],
}

/// Team roster available in the operator selector
pub const TEAM: &[&str] = &["Operator A", "Operator B", "Inspector C", "Assembler D"];

/// Scenario catalog reviewed at random
pub const SCENARIOS: &[Scenario] = &[
    Scenario {
        title: "Operator Misses Quality Check",
        details: "An operator failed to log a quality inspection during a 12-hour shift.",
        expected_actions: &[
            "Investigate root cause of missed QC",
            "Reinforce importance of Quality Control with operator",
            "Update operator training record",
            "Log corrective action in system",
        ],
    },
    Scenario {
        title: "Machine Downtime",
        details: "Fabrication machine offline for 45 minutes, delaying 50 parts.",
        expected_actions: &[
            "Notify maintenance team immediately",
            "Reassign idle operators to other tasks",
            "Update production schedule to accommodate delay",
            "Log downtime reason for future analysis",
        ],
    },
    Scenario {
        title: "Safety Near-Miss",
        details: "An assembler bypassed a guard on a press, nearly causing injury.",
        expected_actions: &[
            "Immediately stop work in affected area",
            "File a safety incident report",
            "Retrain employee on safety protocols",
            "Reinforce lockout-tagout procedures",
        ],
    },
];

/// Safety briefing tips drawn at random
pub const SAFETY_TIPS: &[&str] = &[
    "Always enforce PPE (gloves, goggles, ear protection).",
    "Ensure machine guards are never bypassed.",
    "Document all incidents, including near-misses.",
    "Rotate staff regularly to avoid fatigue on long shifts.",
];

/// The canned workflow sample shown by the AI-output evaluation exercise
pub const SAMPLE_AI_OUTPUT: &str = "Operator A: Assemble 100 units in 2 hours without QC verification.";

/// Verdict shown after the evaluation exercise. Static on purpose: the
/// exercise trains the supervisor's reasoning, the tool never grades it.
pub const SUPERVISOR_GUIDANCE: &str = "Supervisor Guidance:\n\
    This is NOT acceptable — QC verification cannot be skipped. \
    Feedback must highlight regulatory and safety requirements.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        assert_eq!(TEAM.len(), 4);
        assert_eq!(SCENARIOS.len(), 3);
        assert_eq!(SAFETY_TIPS.len(), 4);
    }

    #[test]
    fn test_every_scenario_has_actions() {
        for scenario in SCENARIOS {
            assert!(!scenario.title.is_empty());
            assert!(!scenario.details.is_empty());
            assert!(
                !scenario.expected_actions.is_empty(),
                "scenario '{}' has no expected actions",
                scenario.title
            );
        }
    }

    #[test]
    fn test_scenario_titles_are_distinct() {
        let titles: Vec<&str> = SCENARIOS.iter().map(|s| s.title).collect();
        let mut deduped = titles.clone();
        deduped.dedup();
        assert_eq!(titles, deduped);
    }
}
