use colored::Colorize;
use serde_json::Value;
use std::io::{self, Write};

/// A response body ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBody {
    pub text: String,
    pub is_json: bool,
}

/// Pretty-prints JSON bodies; anything else is returned as text, unchanged.
pub fn format_response_body(body: &[u8]) -> FormattedBody {
    match pretty_json(body) {
        Some(text) => FormattedBody { text, is_json: true },
        None => FormattedBody {
            text: String::from_utf8_lossy(body).into_owned(),
            is_json: false,
        },
    }
}

/// Writes the formatted body followed by a newline, JSON in green.
pub fn write_response_body<W: Write>(out: &mut W, body: &[u8]) -> io::Result<()> {
    let formatted = format_response_body(body);
    if formatted.is_json {
        writeln!(out, "{}", formatted.text.green())
    } else {
        writeln!(out, "{}", formatted.text)
    }
}

fn pretty_json(body: &[u8]) -> Option<String> {
    let json = serde_json::from_slice::<Value>(body).ok()?;
    serde_json::to_string_pretty(&json).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(body: &[u8]) -> String {
        let mut out = Vec::new();
        write_response_body(&mut out, body).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn indents_json_objects() {
        let formatted = format_response_body(br#"{"a":1}"#);
        assert_eq!(formatted.text, "{\n  \"a\": 1\n}");
        assert!(formatted.is_json);
    }

    #[test]
    fn indents_nested_json() {
        let formatted =
            format_response_body(br#"{"args":{"include":"posts"},"list":[1,2]}"#).text;
        assert!(formatted.contains("\n  \"args\": {\n    \"include\": \"posts\"\n  }"));
        assert!(formatted.contains("\"list\": [\n    1,\n    2\n  ]"));
    }

    #[test]
    fn echoes_non_json_verbatim() {
        let formatted = format_response_body(b"not json");
        assert_eq!(formatted.text, "not json");
        assert!(!formatted.is_json);
        assert_eq!(format_response_body(b"<html>\n</html>").text, "<html>\n</html>");
    }

    #[test]
    fn empty_body_is_empty_text() {
        assert_eq!(format_response_body(b"").text, "");
    }

    #[test]
    fn writes_pretty_json_line() {
        let out = written(br#"{"a":1}"#);
        assert!(out.contains("{\n  \"a\": 1\n}"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn writes_plain_text_verbatim() {
        assert_eq!(written(b"not json"), "not json\n");
    }
}
