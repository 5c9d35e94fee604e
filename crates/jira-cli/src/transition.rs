//! Resolve a target status name to the transition that reaches it.
//!
//! Jira does not let a client set an issue's status directly; it has to apply
//! one of the workflow transitions currently available on the issue. Users
//! think in status names ("Done"), so [`resolve_transition`] picks the
//! transition whose destination has that name. It does no I/O: the caller
//! fetches the issue and its transitions and applies the result.

use crate::domain::Transition;
use thiserror::Error;

/// The requested status is not the destination of any available transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "no transition found to status '{requested}'. Available statuses: {}",
    quote_list(.available)
)]
pub struct NoSuchTransition {
    /// Status name that was asked for.
    pub requested: String,
    /// Destination status names of every available transition, in service order.
    pub available: Vec<String>,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The issue is already in the requested status; nothing to do.
    AlreadyInStatus,
    /// Apply the transition with this id.
    Apply(&'a str),
}

/// Pick the transition that moves an issue from `current_status` to `requested`.
///
/// Names are compared exactly (case-sensitive). When several transitions lead
/// to a status with the requested name, the first one in `transitions` wins.
///
/// # Errors
///
/// Returns [`NoSuchTransition`] listing every reachable status when none
/// matches.
pub fn resolve_transition<'a>(
    current_status: &str,
    requested: &str,
    transitions: &'a [Transition],
) -> Result<Resolution<'a>, NoSuchTransition> {
    if current_status == requested {
        return Ok(Resolution::AlreadyInStatus);
    }

    transitions
        .iter()
        .find(|t| t.to_status == requested)
        .map(|t| Resolution::Apply(t.id.as_str()))
        .ok_or_else(|| NoSuchTransition {
            requested: requested.to_string(),
            available: transitions.iter().map(|t| t.to_status.clone()).collect(),
        })
}

fn quote_list(names: &[String]) -> String {
    if names.is_empty() {
        return "(none)".to_string();
    }
    names
        .iter()
        .map(|n| format!("\"{n}\""))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn workflow() -> Vec<Transition> {
        vec![
            Transition::new("1", "Start", "In Progress"),
            Transition::new("2", "Finish", "Done"),
        ]
    }

    #[test]
    fn test_match_returns_transition_id() {
        let transitions = workflow();
        assert_eq!(
            resolve_transition("To Do", "Done", &transitions),
            Ok(Resolution::Apply("2"))
        );
    }

    #[test]
    fn test_current_status_is_noop() {
        let transitions = workflow();
        assert_eq!(
            resolve_transition("To Do", "To Do", &transitions),
            Ok(Resolution::AlreadyInStatus)
        );
    }

    #[test]
    fn test_noop_even_without_transitions() {
        assert_eq!(
            resolve_transition("Done", "Done", &[]),
            Ok(Resolution::AlreadyInStatus)
        );
    }

    #[test]
    fn test_unknown_status_lists_available() {
        let transitions = workflow();
        let err = resolve_transition("To Do", "Blocked", &transitions).unwrap_err();

        assert_eq!(err.requested, "Blocked");
        assert_eq!(err.available, vec!["In Progress", "Done"]);
        assert_eq!(
            err.to_string(),
            "no transition found to status 'Blocked'. Available statuses: \"In Progress\", \"Done\""
        );
    }

    #[test]
    fn test_no_transitions_at_all() {
        let err = resolve_transition("Closed", "Reopened", &[]).unwrap_err();
        assert!(err.available.is_empty());
        assert!(err.to_string().ends_with("Available statuses: (none)"));
    }

    #[test]
    fn test_tie_breaks_on_first_occurrence() {
        let transitions = vec![
            Transition::new("1", "Close", "Closed"),
            Transition::new("2", "Close as duplicate", "Closed"),
        ];
        for _ in 0..10 {
            assert_eq!(
                resolve_transition("Open", "Closed", &transitions),
                Ok(Resolution::Apply("1"))
            );
        }
    }

    #[rstest]
    #[case::lowercase("done")]
    #[case::uppercase("DONE")]
    #[case::trailing_space("Done ")]
    fn test_match_is_case_and_byte_exact(#[case] requested: &str) {
        let transitions = workflow();
        assert!(resolve_transition("To Do", requested, &transitions).is_err());
    }

    #[test]
    fn test_matches_destination_not_transition_name() {
        let transitions = workflow();
        assert!(resolve_transition("To Do", "Finish", &transitions).is_err());
    }

    fn transition_strategy() -> impl Strategy<Value = Vec<Transition>> {
        prop::collection::vec(("[0-9]{1,3}", "[A-C]"), 0..8).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(id, to)| Transition::new(id, "t", to))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_match_is_first_with_that_destination(
            transitions in transition_strategy(),
            requested in "[A-D]",
        ) {
            match resolve_transition("Z", &requested, &transitions) {
                Ok(Resolution::Apply(id)) => {
                    let first = transitions.iter().find(|t| t.to_status == requested).unwrap();
                    prop_assert_eq!(id, first.id.as_str());
                }
                Ok(Resolution::AlreadyInStatus) => prop_assert!(false, "current status never matches"),
                Err(err) => {
                    prop_assert!(transitions.iter().all(|t| t.to_status != requested));
                    prop_assert_eq!(err.available.len(), transitions.len());
                }
            }
        }
    }
}
