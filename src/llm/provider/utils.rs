//! Provider utility functions
//!
//! Contains common functions such as URL processing and log-safe formatting

/// Smart completion API endpoint
///
/// # Behavior
/// 1. Remove trailing slashes
/// 2. If the URL already ends with the suffix, keep it
/// 3. If the URL ends with a leading part of the suffix, complete only the rest
/// 4. Otherwise append the full suffix
///
/// # Example
/// ```
/// use shellmate::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://api.openai.com/v1", "/chat/completions"),
///     "https://api.openai.com/v1/chat/completions"
/// );
///
/// assert_eq!(
///     complete_endpoint("https://api.deepseek.com/v1/chat/completions", "/chat/completions"),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
///
/// assert_eq!(
///     complete_endpoint("https://openrouter.ai/api/v1/", "/chat/completions"),
///     "https://openrouter.ai/api/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    // e.g. url ".../chat", suffix "chat/completions" -> only "completions" is missing
    let suffix_parts: Vec<&str> = suffix.split('/').collect();
    for i in 0..suffix_parts.len().saturating_sub(1) {
        let partial_suffix = suffix_parts[..=i].join("/");
        if url.ends_with(&format!("/{}", partial_suffix)) {
            return format!("{}/{}", url, suffix_parts[i + 1..].join("/"));
        }
    }

    format!("{}/{}", url, suffix)
}

/// Mask API key to prevent log leaks
///
/// # rule
/// - length > 8: display first 4 characters + `...` + last 4 characters
/// - length <= 8: display `****`
///
/// # Example
/// ```
/// use shellmate::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("sk-proj-abcdefgh"), "sk-p...efgh");
/// assert_eq!(mask_api_key("short"), "****");
/// assert_eq!(mask_api_key(""), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        "****".to_string()
    }
}

/// Truncates a response body for error messages, on a char boundary.
pub fn preview_body(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
