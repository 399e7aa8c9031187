#![no_main]

use libfuzzer_sys::fuzz_target;
use wharf_github_bot::{parse_webhook, plan_dispatch, DispatchAction, WebhookEvent};

fuzz_target!(|data: &[u8]| {
    let Ok(event) = parse_webhook("issue_comment", data) else {
        return;
    };
    let WebhookEvent::IssueComment(comment_event) = &event else {
        panic!("issue_comment must decode to an issue comment event");
    };
    if let DispatchAction::Echo {
        issue_number, text, ..
    } = plan_dispatch(&event)
    {
        assert_eq!(comment_event.action, "created");
        assert_eq!(issue_number, comment_event.issue.number);
        let body = comment_event.comment.body.as_deref().unwrap_or_default();
        assert_eq!(body.strip_prefix("!echo "), Some(text.as_str()));
    }
});
