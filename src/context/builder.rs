//! Assembles an [`ActionContext`] from inputs, the event snapshot and GitHub.
//!
//! Stages run strictly in order and any failure aborts the build:
//! configuration, event kind, trigger category, pull request, then the
//! process decision. The at-least-one-trigger gate is applied last, after the
//! context has been logged, so a misconfigured run still shows what it saw.

use tracing::{debug, info, instrument};

use crate::config::{Configuration, InputSource};
use crate::effects::GitHubInterpreter;
use crate::error::ActionError;
use crate::event::{EventKind, EventSnapshot, TriggerCategory};
use crate::types::CommentId;

use super::error::ContextError;
use super::pull_request::{resolve_from_comment_event, resolve_from_label_event};
use super::{ActionContext, CommentSubject, EventSubject, PullRequestSubject};

/// Builds the decision record for one run.
///
/// The only GitHub call made is the PR lookup for comments posted on a pull
/// request. Its failure is returned unchanged.
#[instrument(skip_all, fields(event = %event.event_name, run_id = %event.run.run_id))]
pub async fn build_context<I, G>(
    inputs: &I,
    event: &EventSnapshot,
    github: &G,
) -> Result<ActionContext, ActionError<G::Error>>
where
    I: InputSource + ?Sized,
    G: GitHubInterpreter,
{
    debug!(payload = ?event.payload, "Raw event");

    let config = Configuration::load(inputs)?;
    let event_kind = EventKind::classify(&event.event_name, event.payload.action())?;
    let trigger = TriggerCategory::of(event_kind);

    let subject = match trigger {
        TriggerCategory::Comment => {
            let comment = event
                .payload
                .comment
                .as_ref()
                .ok_or(ContextError::MissingPayloadField("comment"))?;
            let pull_request = resolve_from_comment_event(&event.payload, github).await?;
            EventSubject::Comment(CommentSubject {
                comment_id: CommentId(comment.id),
                comment_body: comment.body.clone().unwrap_or_default(),
                pull_request,
            })
        }
        TriggerCategory::Label | TriggerCategory::Other => {
            EventSubject::PullRequest(PullRequestSubject {
                pull_request: resolve_from_label_event(&event.payload)?,
                label: event.payload.label.as_ref().map(|label| label.name.clone()),
            })
        }
    };

    let should_process = should_process_event(&config, trigger, &subject);
    let context = ActionContext {
        config,
        event_kind,
        trigger,
        run: event.run.clone(),
        should_process_event: should_process,
        subject,
    };

    match serde_json::to_string_pretty(&context) {
        Ok(json) => debug!("Context: {json}"),
        Err(e) => debug!(error = %e, "Context could not be serialized"),
    }

    context.config().ensure_trigger_enabled()?;

    info!(
        kind = ?context.event_kind(),
        trigger = ?context.trigger(),
        pr = ?context.pull_request().map(|pr| pr.number),
        should_process,
        "Built action context"
    );
    Ok(context)
}

/// Decides whether a run goes on to evaluate review threads.
///
/// - label: whenever label triggering is enabled, whichever label changed
/// - comment: comment triggering enabled, body exactly equal to the trigger
///   phrase, and the comment is on a pull request
/// - other: always
pub fn should_process_event(
    config: &Configuration,
    trigger: TriggerCategory,
    subject: &EventSubject,
) -> bool {
    match trigger {
        TriggerCategory::Label => config.use_label_trigger,
        TriggerCategory::Other => true,
        TriggerCategory::Comment => match subject {
            EventSubject::Comment(comment) => {
                config.use_comment_trigger
                    && comment.comment_body == config.resolved_comment_trigger
                    && comment.pull_request.is_some()
            }
            EventSubject::PullRequest(_) => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        DELETE_RESOLVED_COMMENT_TRIGGER, RESOLVED_COMMENT_TRIGGER, UNRESOLVED_LABEL,
        USE_COMMENT_TRIGGER, USE_LABEL_TRIGGER,
    };
    use crate::context::GatedInput;
    use crate::effects::GitHubEffect;
    use crate::test_utils::{
        RecordingGitHub, comment_event, inputs, label_event, pull_request, snapshot,
    };
    use crate::types::PrNumber;
    use proptest::prelude::*;

    fn comment_inputs() -> std::collections::HashMap<String, String> {
        inputs(&[(USE_COMMENT_TRIGGER, "true")])
    }

    fn other_event(event_name: &str, action: &str) -> EventSnapshot {
        snapshot(
            event_name,
            serde_json::json!({
                "action": action,
                "pull_request": {
                    "number": 42,
                    "head": { "sha": "a".repeat(40) },
                    "labels": []
                }
            }),
        )
    }

    // ========================================================================
    // Comment trigger
    // ========================================================================

    #[tokio::test]
    async fn matching_comment_on_pr_is_processed() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        let ctx = build_context(&comment_inputs(), &comment_event("LGTM", true), &github)
            .await
            .unwrap();

        assert!(ctx.should_process_event());
        assert_eq!(ctx.trigger(), TriggerCategory::Comment);
        assert_eq!(ctx.event_kind(), EventKind::IssueCommentCreated);
        let comment = ctx.comment().unwrap();
        assert_eq!(comment.comment_id, CommentId(9001));
        assert_eq!(comment.comment_body, "LGTM");
        assert_eq!(ctx.pull_request().unwrap().number, PrNumber(42));
        assert_eq!(
            github.effects(),
            vec![GitHubEffect::GetPullRequest { pr: PrNumber(42) }]
        );
    }

    #[tokio::test]
    async fn comment_body_comparison_is_exact() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        for body in ["lgtm", "LGTM ", " LGTM", "LGTM!"] {
            let ctx = build_context(&comment_inputs(), &comment_event(body, true), &github)
                .await
                .unwrap();
            assert!(!ctx.should_process_event(), "{body:?} must not match");
        }
    }

    #[tokio::test]
    async fn matching_comment_on_plain_issue_is_not_processed() {
        let github = RecordingGitHub::new();
        let ctx = build_context(&comment_inputs(), &comment_event("LGTM", false), &github)
            .await
            .unwrap();

        assert!(!ctx.should_process_event());
        assert!(ctx.pull_request_context().is_none());
        assert!(github.effects().is_empty(), "no lookup for plain issues");
    }

    #[tokio::test]
    async fn comment_with_comment_trigger_disabled_is_not_processed() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        let ctx = build_context(&inputs(&[]), &comment_event("LGTM", true), &github)
            .await
            .unwrap();
        assert!(!ctx.should_process_event());
    }

    #[tokio::test]
    async fn custom_trigger_phrase_is_honoured() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        let inputs = inputs(&[
            (USE_COMMENT_TRIGGER, "true"),
            (RESOLVED_COMMENT_TRIGGER, "/recheck"),
        ]);
        let ctx = build_context(&inputs, &comment_event("/recheck", true), &github)
            .await
            .unwrap();
        assert!(ctx.should_process_event());
    }

    #[tokio::test]
    async fn comment_without_body_reads_as_empty() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        let event = snapshot(
            "issue_comment",
            serde_json::json!({
                "action": "created",
                "comment": { "id": 5 },
                "issue": { "number": 42, "pull_request": {} }
            }),
        );
        let ctx = build_context(&comment_inputs(), &event, &github)
            .await
            .unwrap();
        assert_eq!(ctx.comment().unwrap().comment_body, "");
        assert!(!ctx.should_process_event());
    }

    #[tokio::test]
    async fn comment_event_without_comment_section_fails() {
        let github = RecordingGitHub::new();
        let event = snapshot(
            "issue_comment",
            serde_json::json!({ "action": "created", "issue": { "number": 42 } }),
        );
        let err = build_context(&comment_inputs(), &event, &github)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_context(),
            Some(&ContextError::MissingPayloadField("comment"))
        );
    }

    #[tokio::test]
    async fn comment_payload_without_issue_is_not_processed() {
        let github = RecordingGitHub::new().with_pull_request(pull_request(42, &[]));
        let event = snapshot(
            "issue_comment",
            serde_json::json!({
                "action": "created",
                "comment": { "id": 5, "body": "LGTM" }
            }),
        );
        let ctx = build_context(&comment_inputs(), &event, &github)
            .await
            .unwrap();
        assert!(ctx.pull_request().is_none());
        assert!(!ctx.should_process_event());
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn lookup_failure_aborts_the_build() {
        let github = RecordingGitHub::new().failing_on("get_pull_request");
        let err = build_context(&comment_inputs(), &comment_event("LGTM", true), &github)
            .await
            .unwrap_err();
        match err {
            ActionError::GitHub(message) => assert_eq!(message, "get_pull_request failed"),
            other => panic!("expected GitHub error, got {other:?}"),
        }
    }

    // ========================================================================
    // Label trigger
    // ========================================================================

    #[tokio::test]
    async fn label_event_processed_whenever_label_trigger_enabled() {
        let github = RecordingGitHub::new();
        for changed in ["unresolvedThreads", "bug", "documentation"] {
            let ctx = build_context(
                &inputs(&[]),
                &label_event("labeled", &["bug"], changed),
                &github,
            )
            .await
            .unwrap();
            assert!(ctx.should_process_event(), "label {changed:?}");
            assert_eq!(ctx.trigger(), TriggerCategory::Label);
            match ctx.subject() {
                EventSubject::PullRequest(subject) => {
                    assert_eq!(subject.label.as_deref(), Some(changed));
                    assert!(subject.pull_request.has_label("bug"));
                }
                other => panic!("expected pull request subject, got {other:?}"),
            }
        }
        assert!(github.effects().is_empty());
    }

    #[tokio::test]
    async fn label_event_not_processed_when_label_trigger_disabled() {
        let github = RecordingGitHub::new();
        let inputs = inputs(&[(USE_LABEL_TRIGGER, "false"), (USE_COMMENT_TRIGGER, "true")]);
        let ctx = build_context(&inputs, &label_event("unlabeled", &[], "x"), &github)
            .await
            .unwrap();
        assert!(!ctx.should_process_event());
        assert_eq!(ctx.event_kind(), EventKind::PullRequestUnlabeled);
    }

    #[tokio::test]
    async fn label_event_without_pull_request_fails() {
        let github = RecordingGitHub::new();
        let event = snapshot(
            "pull_request",
            serde_json::json!({ "action": "labeled", "label": { "name": "x" } }),
        );
        let err = build_context(&inputs(&[]), &event, &github)
            .await
            .unwrap_err();
        assert_eq!(err.as_context(), Some(&ContextError::NoAssociatedPullRequest));
    }

    // ========================================================================
    // Other events
    // ========================================================================

    #[tokio::test]
    async fn other_events_are_always_processed() {
        let github = RecordingGitHub::new();
        let configs = [
            inputs(&[]),
            inputs(&[(USE_LABEL_TRIGGER, "false"), (USE_COMMENT_TRIGGER, "true")]),
        ];
        for config in &configs {
            let ctx = build_context(config, &other_event("pull_request_review", "submitted"), &github)
                .await
                .unwrap();
            assert!(ctx.should_process_event());
            assert_eq!(ctx.trigger(), TriggerCategory::Other);
            assert!(ctx.comment().is_none());
        }
    }

    #[tokio::test]
    async fn other_event_without_pull_request_fails() {
        let github = RecordingGitHub::new();
        let event = snapshot("pull_request", serde_json::json!({ "action": "opened" }));
        let err = build_context(&inputs(&[]), &event, &github)
            .await
            .unwrap_err();
        assert_eq!(err.as_context(), Some(&ContextError::NoAssociatedPullRequest));
    }

    // ========================================================================
    // Failures before and after resolution
    // ========================================================================

    #[tokio::test]
    async fn unrecognized_event_fails_with_the_pair() {
        let github = RecordingGitHub::new();
        let err = build_context(&inputs(&[]), &other_event("push", "created"), &github)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_context(),
            Some(&ContextError::InvalidEventKind {
                event_name: "push".to_string(),
                action: "created".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn invalid_configuration_fails_before_classification() {
        let github = RecordingGitHub::new();
        let err = build_context(
            &inputs(&[(DELETE_RESOLVED_COMMENT_TRIGGER, "false")]),
            &other_event("push", "created"),
            &github,
        )
        .await
        .unwrap_err();
        assert_eq!(
            err.as_context(),
            Some(&ContextError::OptionRequiresDisabledFeature(
                GatedInput::DeleteResolvedCommentTrigger
            ))
        );
    }

    #[tokio::test]
    async fn both_triggers_disabled_fails_after_resolution() {
        let github = RecordingGitHub::new();
        let inputs = inputs(&[(USE_LABEL_TRIGGER, "false"), (USE_COMMENT_TRIGGER, "false")]);
        let err = build_context(&inputs, &label_event("labeled", &[], "x"), &github)
            .await
            .unwrap_err();
        assert_eq!(err.as_context(), Some(&ContextError::AtLeastOneTriggerRequired));
    }

    #[tokio::test]
    async fn gated_input_error_names_the_option() {
        let github = RecordingGitHub::new();
        let inputs = inputs(&[
            (USE_LABEL_TRIGGER, "false"),
            (USE_COMMENT_TRIGGER, "true"),
            (UNRESOLVED_LABEL, "blocked"),
        ]);
        let err = build_context(&inputs, &label_event("labeled", &[], "x"), &github)
            .await
            .unwrap_err();
        assert_eq!(
            err.as_context(),
            Some(&ContextError::OptionRequiresDisabledFeature(
                GatedInput::UnresolvedLabel
            ))
        );
    }

    // ========================================================================
    // Property tests
    // ========================================================================

    prop_compose! {
        fn arb_comment_subject()(
            body in prop_oneof![Just("LGTM".to_string()), "[a-zA-Z ]{0,8}"],
            has_pr in any::<bool>(),
        ) -> EventSubject {
            EventSubject::Comment(CommentSubject {
                comment_id: CommentId(1),
                comment_body: body,
                pull_request: has_pr.then(|| pull_request(1, &[])),
            })
        }
    }

    fn config(use_label_trigger: bool, use_comment_trigger: bool) -> Configuration {
        Configuration {
            use_label_trigger,
            use_comment_trigger,
            ..Configuration::default()
        }
    }

    proptest! {
        #[test]
        fn comment_decision_is_the_conjunction(
            subject in arb_comment_subject(),
            use_comment in any::<bool>(),
        ) {
            let config = config(true, use_comment);
            let EventSubject::Comment(comment) = &subject else { unreachable!() };
            let expected = use_comment
                && comment.comment_body == "LGTM"
                && comment.pull_request.is_some();
            prop_assert_eq!(
                should_process_event(&config, TriggerCategory::Comment, &subject),
                expected
            );
        }

        #[test]
        fn label_decision_follows_the_flag(
            use_label in any::<bool>(),
            label in proptest::option::of("[a-z]{1,10}"),
        ) {
            let subject = EventSubject::PullRequest(PullRequestSubject {
                pull_request: pull_request(1, &[]),
                label,
            });
            prop_assert_eq!(
                should_process_event(&config(use_label, true), TriggerCategory::Label, &subject),
                use_label
            );
        }

        #[test]
        fn other_decision_is_always_true(use_label in any::<bool>(), use_comment in any::<bool>()) {
            let subject = EventSubject::PullRequest(PullRequestSubject {
                pull_request: pull_request(1, &[]),
                label: None,
            });
            prop_assert!(should_process_event(
                &config(use_label, use_comment),
                TriggerCategory::Other,
                &subject
            ));
        }
    }
}
