/// Message id used when a caller does not pick one.
pub const DEFAULT_MESSAGE_ID: &str = "github.com/aluzzardi/daggerverse/github-comment";

pub const MESSAGE_MARKER_PREFIX: &str = "<!-- marker: ";
pub const MESSAGE_MARKER_SUFFIX: &str = " -->";

/// Hidden first line identifying the comment owned by `message_id`.
pub fn marker(message_id: &str) -> String {
    format!("{MESSAGE_MARKER_PREFIX}{message_id}{MESSAGE_MARKER_SUFFIX}")
}

pub fn mark_body(message_id: &str, body: &str) -> String {
    format!("{}\n{}", marker(message_id), body)
}

pub fn is_marked_for(body: &str, message_id: &str) -> bool {
    body.starts_with(&marker(message_id))
}

#[cfg(test)]
mod tests {
    use super::{is_marked_for, mark_body, marker, DEFAULT_MESSAGE_ID};

    #[test]
    fn unit_marker_wraps_message_id_in_html_comment() {
        assert_eq!(marker("build-status"), "<!-- marker: build-status -->");
        assert_eq!(
            marker(DEFAULT_MESSAGE_ID),
            "<!-- marker: github.com/aluzzardi/daggerverse/github-comment -->"
        );
    }

    #[test]
    fn functional_mark_body_prefixes_marker_line() {
        let body = mark_body("X", "hello\nworld");
        assert_eq!(body, "<!-- marker: X -->\nhello\nworld");
        assert!(is_marked_for(&body, "X"));
    }

    #[test]
    fn regression_is_marked_for_requires_leading_marker() {
        assert!(!is_marked_for("hello <!-- marker: X -->", "X"));
        assert!(!is_marked_for("<!-- marker: Y -->\nhello", "X"));
        assert!(!is_marked_for("", "X"));
    }
}
