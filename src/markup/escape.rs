//! Escaping for untrusted text placed into markup.

/// Escapes text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escaped href for a link target. Only http(s) URLs are allowed; anything else becomes `#`.
pub fn safe_href(url: Option<&str>) -> String {
    match url.map(str::trim) {
        Some(url) if is_http_url(url) => escape_html(url),
        _ => "#".to_string(),
    }
}

fn is_http_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_html("Fix login bug"), "Fix login bug");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn href_allows_http_and_https_only() {
        assert_eq!(
            safe_href(Some("https://github.com/acme/web/pull/1?a=1&b=2")),
            "https://github.com/acme/web/pull/1?a=1&amp;b=2"
        );
        assert_eq!(safe_href(Some("javascript:alert(1)")), "#");
        assert_eq!(safe_href(Some("not a url")), "#");
        assert_eq!(safe_href(None), "#");
    }

    #[test]
    fn href_cannot_break_out_of_attribute() {
        let href = safe_href(Some("https://example.com/\"onmouseover=\"x"));
        assert!(!href.contains('"'));
    }
}
