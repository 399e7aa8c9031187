pub(crate) const ERROR_BODY_MAX_CHARS: usize = 800;

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated = text.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}

pub fn bearer_header_value(token: &str) -> String {
    format!("Bearer {}", token.trim())
}
