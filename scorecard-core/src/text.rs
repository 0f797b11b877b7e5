//! # Report Text Helpers

/// Line break understood inside HTML `title` tooltips
pub const LINE_BREAK: &str = "&#013;";

/// Escape `input` for embedding in HTML text or attribute values
pub fn escape_html(input: &str) -> String {
  let mut escaped = String::with_capacity(input.len());
  for ch in input.chars() {
    match ch {
      '&' => escaped.push_str("&amp;"),
      '<' => escaped.push_str("&lt;"),
      '>' => escaped.push_str("&gt;"),
      '"' => escaped.push_str("&quot;"),
      '\'' => escaped.push_str("&#39;"),
      _ => escaped.push(ch),
    }
  }
  escaped
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_escape_html() {
    assert_eq!(
      escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
    );
  }

  #[test]
  fn test_escape_html_leaves_plain_text() {
    assert_eq!(escape_html("plain text 123"), "plain text 123");
  }
}
