pub const ECHO_COMMAND_PREFIX: &str = "!echo ";

/// Returns the text after a leading `!echo `, untouched.
///
/// Matching is exact: no leading whitespace is skipped and `!echo` without a
/// trailing space is not a command.
pub fn parse_echo_command(body: &str) -> Option<&str> {
    body.strip_prefix(ECHO_COMMAND_PREFIX)
}
