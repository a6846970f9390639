//! Best-effort extraction of a JSON payload from free-form model output.
//!
//! Models asked for JSON often wrap it in prose or a fenced code block.
//! Extraction tries, in priority order:
//! 1. the first fenced code block explicitly tagged `json`
//! 2. the first brace-delimited substring (first `{` through last `}`)

/// Find the JSON payload in `content`, if any.
pub fn json_payload(content: &str) -> Option<&str> {
    fenced_json_block(content).or_else(|| brace_delimited(content))
}

fn fenced_json_block(content: &str) -> Option<&str> {
    let start = content.find("```json")? + "```json".len();
    let rest = &content[start..];
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let end = rest.find("```")?;
    Some(rest[..end].trim())
}

fn brace_delimited(content: &str) -> Option<&str> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_block() {
        let content = "Here is your recipe:\n```json\n{\"title\": \"Pasta\"}\n```\nEnjoy!";
        assert_eq!(json_payload(content), Some("{\"title\": \"Pasta\"}"));
    }

    #[test]
    fn test_fenced_block_wins_over_braces() {
        let content = "{\"not\": \"this\"}\n```json\n{\"title\": \"Pasta\"}\n```";
        assert_eq!(json_payload(content), Some("{\"title\": \"Pasta\"}"));
    }

    #[test]
    fn test_bare_json_object() {
        let content = "{\"title\": \"Pasta\"}";
        assert_eq!(json_payload(content), Some("{\"title\": \"Pasta\"}"));
    }

    #[test]
    fn test_braces_span_first_to_last() {
        let content = "Sure! {\"a\": {\"b\": 1}} done";
        assert_eq!(json_payload(content), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_untagged_fence_falls_back_to_braces() {
        let content = "```\n{\"title\": \"Pasta\"}\n```";
        assert_eq!(json_payload(content), Some("{\"title\": \"Pasta\"}"));
    }

    #[test]
    fn test_no_json_anywhere() {
        assert_eq!(json_payload("Sorry, I can't help with that."), None);
    }

    #[test]
    fn test_unterminated_fence_falls_back() {
        let content = "```json\n{\"title\": \"Pasta\"}";
        assert_eq!(json_payload(content), Some("{\"title\": \"Pasta\"}"));
    }
}
