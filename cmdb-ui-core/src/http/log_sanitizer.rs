//! Keeps response bodies and credentials out of debug logs

/// Characters of a body kept in log output
const BODY_LOG_CHARS: usize = 256;

/// Shorten a response body for logging
pub fn truncate_for_log(body: &str) -> String {
    match body.char_indices().nth(BODY_LOG_CHARS) {
        None => body.to_string(),
        Some((cut, _)) => format!("{}... ({} bytes)", &body[..cut], body.len()),
    }
}

/// Show only the last four characters of a bearer token
pub fn mask_token(token: &str) -> String {
    let count = token.chars().count();
    if count <= 8 {
        return "****".to_string();
    }
    let tail: String = token.chars().skip(count - 4).collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_bodies_pass_through() {
        assert_eq!(truncate_for_log("[]"), "[]");
        let exact = "x".repeat(BODY_LOG_CHARS);
        assert_eq!(truncate_for_log(&exact), exact);
    }

    #[test]
    fn long_bodies_are_cut_on_char_boundaries() {
        let body = "é".repeat(BODY_LOG_CHARS + 10);
        let logged = truncate_for_log(&body);
        assert!(logged.starts_with(&"é".repeat(BODY_LOG_CHARS)));
        assert!(logged.ends_with(&format!("... ({} bytes)", body.len())));
    }

    #[test]
    fn tokens_are_masked() {
        assert_eq!(mask_token("short"), "****");
        assert_eq!(mask_token("eyJhbGciOiJIUzI1NiJ9.abcd"), "****abcd");
    }
}
