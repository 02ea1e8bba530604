//! Shared enforcement logic, written once against [`ResourceHandler`].
//!
//! One run is a straight pipeline: list every resource, classify each as
//! whitelisted / managed-and-ignored / violation, then dispatch the
//! configured action over the violation sequence. No state survives
//! between runs.

use tracing::{debug, info, warn};

use super::errors::MonitorError;
use super::traits::ResourceHandler;
use super::types::{ActionMode, ActionOutcome, ActionReport, ReportStatus, ResourceRecord, Violation};

/// Name prefix of resources created by the platform itself.
pub const DATABRICKS_PREFIX: &str = "databricks-";

/// Heuristic: does this resource look like it was created and owned by
/// the platform rather than a user?
///
/// True iff the creator is unknown and the name carries the platform's
/// reserved prefix. Best-effort signal, not authoritative; only
/// consulted on resources that already failed the whitelist check.
pub fn is_managed(record: &ResourceRecord) -> bool {
    record.creator.is_none() && record.name.starts_with(DATABRICKS_PREFIX)
}

/// Check every live resource against the whitelist and filtering rules.
///
/// Always recomputes from scratch: the violation sequence is a pure
/// function of the listing and the handler's config. A whitelisted
/// resource is never a violation, even when it matches the managed
/// heuristic. In dry-run mode the only difference is log severity;
/// no action is taken either way.
pub fn check_resources(
    handler: &dyn ResourceHandler,
    dry_run: bool,
) -> Result<Vec<Violation>, MonitorError> {
    let resource_type = handler.resource_type();
    info!(
        event = "core.monitor.check_started",
        resource_type = %resource_type,
        dry_run = dry_run,
    );

    let resources = handler.list_resources()?;
    info!(
        event = "core.monitor.resources_listed",
        resource_type = %resource_type,
        count = resources.len(),
    );

    let config = handler.config();
    let mut violations = Vec::new();

    for record in &resources {
        if config.is_whitelisted(&record.id) {
            continue;
        }

        if config.ignore_databricks_managed() && is_managed(record) {
            debug!(
                event = "core.monitor.managed_resource_ignored",
                resource_type = %resource_type,
                id = %record.id,
            );
            continue;
        }

        if dry_run {
            info!(
                event = "core.monitor.violation_found",
                resource_type = %resource_type,
                id = %record.id,
                dry_run = true,
            );
        } else {
            warn!(
                event = "core.monitor.violation_found",
                resource_type = %resource_type,
                id = %record.id,
            );
        }

        violations.push(Violation {
            id: record.id.clone(),
            details: handler.resource_details(record),
            action_taken: None,
        });
    }

    info!(
        event = "core.monitor.check_completed",
        resource_type = %resource_type,
        examined = resources.len(),
        violations = violations.len(),
    );

    Ok(violations)
}

/// Dispatch the configured action over a finalized violation sequence.
///
/// Empty input short-circuits to a success report without touching the
/// handler. Delete mode attempts each violation independently and folds
/// the outcomes into an aggregate report; one failure never aborts the
/// rest. Alert mode takes no per-resource action and instead fails the
/// invocation with [`MonitorError::AlertRaised`] enumerating every
/// violation: the failed run is the notification channel.
pub fn handle_violations(
    handler: &dyn ResourceHandler,
    violations: &mut [Violation],
    action_mode: ActionMode,
) -> Result<ActionReport, MonitorError> {
    if violations.is_empty() {
        info!(event = "core.monitor.no_violations");
        return Ok(ActionReport::empty());
    }

    info!(
        event = "core.monitor.dispatch_started",
        resource_type = %handler.resource_type(),
        action_mode = %action_mode,
        violations = violations.len(),
    );

    match action_mode {
        ActionMode::Delete => Ok(delete_violations(handler, violations)),
        ActionMode::Alert => Err(alert_for(violations)),
    }
}

fn delete_violations(handler: &dyn ResourceHandler, violations: &mut [Violation]) -> ActionReport {
    let mut report = ActionReport {
        status: ReportStatus::Success,
        violations: violations.len(),
        actions: Vec::with_capacity(violations.len()),
    };

    for violation in violations.iter_mut() {
        let action = match handler.delete_resource(&violation.id) {
            Ok(true) => {
                violation.action_taken = Some(ActionOutcome::Deleted);
                info!(event = "core.monitor.resource_deleted", id = %violation.id);
                format!("Deleted resource {}", violation.id)
            }
            Ok(false) => {
                violation.action_taken = Some(ActionOutcome::DeleteFailed);
                report.status = ReportStatus::PartialFailure;
                warn!(event = "core.monitor.delete_failed", id = %violation.id);
                format!("Failed to delete resource {}", violation.id)
            }
            Err(e) => {
                violation.action_taken = Some(ActionOutcome::Error);
                report.status = ReportStatus::PartialFailure;
                warn!(
                    event = "core.monitor.delete_errored",
                    id = %violation.id,
                    error = %e,
                );
                format!("Error deleting resource {}: {}", violation.id, e)
            }
        };
        report.actions.push(action);
    }

    report
}

fn alert_for(violations: &[Violation]) -> MonitorError {
    let details = violations
        .iter()
        .map(|v| format!("- {}: {}", v.id, v.details))
        .collect::<Vec<_>>()
        .join("\n");

    warn!(
        event = "core.monitor.alert_raised",
        violations = violations.len(),
    );

    MonitorError::AlertRaised {
        count: violations.len(),
        details,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use warden_config::ResourceConfig;
    use warden_workspace::ApiError;

    use super::*;
    use crate::monitor::types::ResourceType;

    /// What the mock should do when asked to delete a given id.
    #[derive(Clone, Copy)]
    enum DeleteBehavior {
        Succeed,
        Refuse,
        Fail,
    }

    struct MockHandler {
        config: ResourceConfig,
        records: Vec<ResourceRecord>,
        delete_behavior: HashMap<String, DeleteBehavior>,
        deleted: Mutex<Vec<String>>,
        list_calls: Mutex<usize>,
    }

    impl MockHandler {
        fn new(records: Vec<ResourceRecord>, config: ResourceConfig) -> Self {
            Self {
                config,
                records,
                delete_behavior: HashMap::new(),
                deleted: Mutex::new(Vec::new()),
                list_calls: Mutex::new(0),
            }
        }

        fn with_delete_behavior(mut self, id: &str, behavior: DeleteBehavior) -> Self {
            self.delete_behavior.insert(id.to_string(), behavior);
            self
        }

        fn delete_attempts(&self) -> Vec<String> {
            self.deleted.lock().unwrap().clone()
        }

        fn list_calls(&self) -> usize {
            *self.list_calls.lock().unwrap()
        }
    }

    impl ResourceHandler for MockHandler {
        fn resource_type(&self) -> ResourceType {
            ResourceType::Apps
        }

        fn config(&self) -> &ResourceConfig {
            &self.config
        }

        fn list_resources(&self) -> Result<Vec<ResourceRecord>, MonitorError> {
            *self.list_calls.lock().unwrap() += 1;
            Ok(self.records.clone())
        }

        fn delete_resource(&self, resource_id: &str) -> Result<bool, MonitorError> {
            self.deleted.lock().unwrap().push(resource_id.to_string());
            match self
                .delete_behavior
                .get(resource_id)
                .copied()
                .unwrap_or(DeleteBehavior::Succeed)
            {
                DeleteBehavior::Succeed => Ok(true),
                DeleteBehavior::Refuse => Ok(false),
                DeleteBehavior::Fail => Err(MonitorError::DeletionFailed {
                    resource_type: "apps".to_string(),
                    resource_id: resource_id.to_string(),
                    source: ApiError::Decode {
                        message: "connection reset".to_string(),
                    },
                }),
            }
        }
    }

    fn record(id: &str, creator: Option<&str>) -> ResourceRecord {
        ResourceRecord {
            id: id.to_string(),
            name: id.to_string(),
            state: "RUNNING".to_string(),
            creator: creator.map(String::from),
            created_at: None,
            raw: serde_json::Value::Null,
        }
    }

    #[test]
    fn managed_heuristic_requires_prefix_and_unknown_creator() {
        assert!(is_managed(&record("databricks-foo", None)));
        assert!(!is_managed(&record("databricks-foo", Some("alice"))));
        assert!(!is_managed(&record("foo", None)));
    }

    #[test]
    fn violation_iff_not_whitelisted_when_filter_disabled() {
        let handler = MockHandler::new(
            vec![
                record("allowed", Some("alice")),
                record("rogue", Some("bob")),
                record("databricks-internal", None),
            ],
            ResourceConfig::new(["allowed".to_string()], false),
        );

        let violations = check_resources(&handler, false).unwrap();
        let ids: Vec<&str> = violations.iter().map(|v| v.id.as_str()).collect();
        // With the filter disabled, even managed-looking resources violate
        assert_eq!(ids, ["rogue", "databricks-internal"]);
    }

    #[test]
    fn whitelist_wins_over_managed_heuristic() {
        let handler = MockHandler::new(
            vec![record("databricks-whitelisted", None)],
            ResourceConfig::new(["databricks-whitelisted".to_string()], true),
        );

        let violations = check_resources(&handler, false).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn managed_filter_skips_only_managed_resources() {
        let handler = MockHandler::new(
            vec![
                record("databricks-internal", None),
                record("databricks-impostor", Some("mallory")),
                record("user-app", Some("alice")),
            ],
            ResourceConfig::new([], true),
        );

        let violations = check_resources(&handler, false).unwrap();
        let ids: Vec<&str> = violations.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["databricks-impostor", "user-app"]);
    }

    #[test]
    fn check_is_idempotent_without_intervening_mutation() {
        let handler = MockHandler::new(
            vec![record("rogue", Some("bob")), record("other", None)],
            ResourceConfig::new([], false),
        );

        let first = check_resources(&handler, false).unwrap();
        let second = check_resources(&handler, false).unwrap();
        assert_eq!(first, second);
        assert_eq!(handler.list_calls(), 2);
    }

    #[test]
    fn check_never_deletes_regardless_of_dry_run() {
        let handler = MockHandler::new(
            vec![record("rogue", Some("bob"))],
            ResourceConfig::new([], false),
        );

        let dry = check_resources(&handler, true).unwrap();
        let wet = check_resources(&handler, false).unwrap();
        assert_eq!(dry.len(), 1);
        assert_eq!(dry, wet);
        assert!(handler.delete_attempts().is_empty());
    }

    #[test]
    fn empty_violations_return_success_without_handler_calls() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false));

        let report = handle_violations(&handler, &mut [], ActionMode::Delete).unwrap();
        assert_eq!(report.status, ReportStatus::Success);
        assert_eq!(report.violations, 0);
        assert!(report.actions.is_empty());
        assert!(handler.delete_attempts().is_empty());
        assert_eq!(handler.list_calls(), 0);

        // Alert mode on an empty sequence is also a success, not an alert
        let report = handle_violations(&handler, &mut [], ActionMode::Alert).unwrap();
        assert_eq!(report.status, ReportStatus::Success);
    }

    fn violations_for(ids: &[&str]) -> Vec<Violation> {
        ids.iter()
            .map(|id| Violation {
                id: id.to_string(),
                details: format!("Name: {}", id),
                action_taken: None,
            })
            .collect()
    }

    #[test]
    fn delete_mode_all_successes_is_success() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false));
        let mut violations = violations_for(&["a", "b"]);

        let report = handle_violations(&handler, &mut violations, ActionMode::Delete).unwrap();
        assert_eq!(report.status, ReportStatus::Success);
        assert_eq!(report.violations, 2);
        assert_eq!(
            report.actions,
            ["Deleted resource a", "Deleted resource b"]
        );
        assert!(violations
            .iter()
            .all(|v| v.action_taken == Some(ActionOutcome::Deleted)));
        assert_eq!(handler.delete_attempts(), ["a", "b"]);
    }

    #[test]
    fn delete_mode_mixed_outcomes_are_independent_per_violation() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false))
            .with_delete_behavior("refused", DeleteBehavior::Refuse)
            .with_delete_behavior("broken", DeleteBehavior::Fail);
        let mut violations = violations_for(&["ok", "refused", "broken", "ok2"]);

        let report = handle_violations(&handler, &mut violations, ActionMode::Delete).unwrap();
        assert_eq!(report.status, ReportStatus::PartialFailure);

        let outcomes: Vec<Option<ActionOutcome>> =
            violations.iter().map(|v| v.action_taken).collect();
        assert_eq!(
            outcomes,
            [
                Some(ActionOutcome::Deleted),
                Some(ActionOutcome::DeleteFailed),
                Some(ActionOutcome::Error),
                Some(ActionOutcome::Deleted),
            ]
        );

        // One violation's failure never aborts the rest
        assert_eq!(handler.delete_attempts(), ["ok", "refused", "broken", "ok2"]);
        assert_eq!(report.actions.len(), 4);
        assert!(report.actions[2].starts_with("Error deleting resource broken"));
    }

    #[test]
    fn delete_mode_partial_failure_iff_any_non_deleted_outcome() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false))
            .with_delete_behavior("refused", DeleteBehavior::Refuse);
        let mut violations = violations_for(&["refused"]);

        let report = handle_violations(&handler, &mut violations, ActionMode::Delete).unwrap();
        assert_eq!(report.status, ReportStatus::PartialFailure);
        assert_eq!(report.actions, ["Failed to delete resource refused"]);
    }

    #[test]
    fn alert_mode_raises_with_every_violation_in_input_order() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false));
        let mut violations = violations_for(&["z-last", "a-first"]);

        let error = handle_violations(&handler, &mut violations, ActionMode::Alert).unwrap_err();
        match &error {
            MonitorError::AlertRaised { count, details } => {
                assert_eq!(*count, 2);
                // Input order preserved, one line per violation
                assert_eq!(details, "- z-last: Name: z-last\n- a-first: Name: a-first");
            }
            other => panic!("Expected AlertRaised, got {:?}", other),
        }

        // Alert mode never touches the platform
        assert!(handler.delete_attempts().is_empty());
    }

    #[test]
    fn alert_message_contains_each_violation_exactly_once() {
        let handler = MockHandler::new(Vec::new(), ResourceConfig::new([], false));
        let mut violations = violations_for(&["dup-check"]);

        let error = handle_violations(&handler, &mut violations, ActionMode::Alert).unwrap_err();
        let message = error.to_string();
        assert_eq!(message.matches("dup-check").count(), 2); // id + details line
        assert_eq!(message.matches("- dup-check: Name: dup-check").count(), 1);
    }

    #[test]
    fn listing_failure_propagates_unhandled() {
        struct FailingHandler {
            config: ResourceConfig,
        }

        impl ResourceHandler for FailingHandler {
            fn resource_type(&self) -> ResourceType {
                ResourceType::ModelEndpoints
            }

            fn config(&self) -> &ResourceConfig {
                &self.config
            }

            fn list_resources(&self) -> Result<Vec<ResourceRecord>, MonitorError> {
                Err(MonitorError::ListingFailed {
                    resource_type: "model_endpoints".to_string(),
                    source: ApiError::Decode {
                        message: "unexpected EOF".to_string(),
                    },
                })
            }

            fn delete_resource(&self, _resource_id: &str) -> Result<bool, MonitorError> {
                Ok(true)
            }
        }

        let handler = FailingHandler {
            config: ResourceConfig::new([], false),
        };
        let error = check_resources(&handler, false).unwrap_err();
        assert!(matches!(error, MonitorError::ListingFailed { .. }));
    }
}
