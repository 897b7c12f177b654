//! Line-level text cleanup shared by the resume parsers

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKDOWN_CLEANUP: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"__([^_]+?)__").unwrap(), "${1}"),
        (Regex::new(r"\*\*([^*]+?)\*\*").unwrap(), "${1}"),
        (Regex::new(r"_([^_]+?)_").unwrap(), "${1}"),
        (Regex::new(r"\*([^*]+?)\*").unwrap(), "${1}"),
        (Regex::new(r"`([^`]+?)`").unwrap(), "${1}"),
        (Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap(), "${1}"),
        (Regex::new(r"[\x00-\x1f]").unwrap(), " "),
        (Regex::new(r"[\u{00A0}\u{200B}\u{200C}\u{200D}\u{FEFF}]").unwrap(), " "),
        (Regex::new(r"\\+").unwrap(), " "),
        (Regex::new(r"\s+").unwrap(), " "),
    ]
});

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^*_]+?)__|\*\*([^*_]+?)\*\*").unwrap());
static BULLET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\u{2022}\-·]+\s*").unwrap());
static BULLET_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•·]").unwrap());
static CONTACT_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)@|linkedin|github|gitlab|portfolio|https?://").unwrap());
pub(crate) static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\+?\d[\d\s().-]{6,}\d)").unwrap());

/// Remove inline markdown and collapse whitespace
pub fn strip_markdown(value: &str) -> String {
    let mut text = value.to_string();
    for (pattern, replacement) in MARKDOWN_CLEANUP.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

/// Strip a leading bullet and inline markdown
pub fn sanitize_line(line: &str) -> String {
    strip_markdown(&BULLET_PREFIX.replace(line, ""))
}

pub(crate) fn is_bullet(line: &str) -> bool {
    BULLET_START.is_match(line)
}

pub(crate) fn looks_like_contact(line: &str) -> bool {
    CONTACT_HINT.is_match(line) || PHONE.is_match(line)
}

/// Put every emphasized span (`__x__`, `**x**`) on a line of its own
pub(crate) fn break_out_emphasis(text: &str) -> String {
    EMPHASIS
        .replace_all(text, |caps: &Captures| {
            let inner = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
            format!("\n{inner}\n")
        })
        .into_owned()
}

/// Split a line around emphasized spans, keeping a leading bullet on the
/// first segment
pub(crate) fn split_emphasis_segments(line: &str) -> Vec<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let bullet = BULLET_PREFIX.find(trimmed).map_or("", |m| m.as_str());
    let content = &trimmed[bullet.len()..];

    let mut segments = Vec::new();
    let mut last = 0;
    for caps in EMPHASIS.captures_iter(content) {
        let whole = caps.get(0).map_or(0..0, |m| m.range());
        let before = content[last..whole.start].trim();
        if !before.is_empty() {
            segments.push(before.to_string());
        }
        let heading = caps
            .get(1)
            .or_else(|| caps.get(2))
            .map_or("", |m| m.as_str().trim());
        if !heading.is_empty() {
            segments.push(heading.to_string());
        }
        last = whole.end;
    }

    let after = content[last..].trim();
    if !after.is_empty() {
        segments.push(after.to_string());
    }
    if segments.is_empty() {
        segments.push(content.trim().to_string());
    }
    if !bullet.is_empty() {
        segments[0] = format!("{bullet}{}", segments[0]);
    }

    segments
}

/// Split section lines into entries: a non-bullet line that follows bullet
/// lines starts a new entry
pub(crate) fn group_entries(lines: &[String]) -> Vec<Vec<String>> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut seen_bullet = false;

    for line in lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
        let bullet = is_bullet(line);
        if groups.is_empty() || (!bullet && seen_bullet) {
            groups.push(Vec::new());
            seen_bullet = false;
        }
        seen_bullet |= bullet;
        if let Some(group) = groups.last_mut() {
            group.push(line.to_string());
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markdown() {
        assert_eq!(strip_markdown("__Senior__ *Engineer*"), "Senior Engineer");
        assert_eq!(strip_markdown("[site](https://x.dev)  `code`"), "site code");
        assert_eq!(strip_markdown("C\\# \\.NET"), "C # .NET");
        assert_eq!(strip_markdown("a\u{00A0}b\tc"), "a b c");
    }

    #[test]
    fn test_sanitize_line() {
        assert_eq!(sanitize_line("• Built **fast** APIs"), "Built fast APIs");
        assert_eq!(sanitize_line("-- Shipped"), "Shipped");
        assert_eq!(sanitize_line("Plain"), "Plain");
    }

    #[test]
    fn test_split_emphasis_segments() {
        assert_eq!(
            split_emphasis_segments("- __Acme__ Engineer"),
            vec!["- Acme".to_string(), "Engineer".to_string()]
        );
        assert_eq!(split_emphasis_segments("plain"), vec!["plain".to_string()]);
        assert!(split_emphasis_segments("   ").is_empty());
    }

    #[test]
    fn test_break_out_emphasis() {
        assert_eq!(break_out_emphasis("a **B** c"), "a \nB\n c");
    }

    #[test]
    fn test_contact_detection() {
        assert!(looks_like_contact("jane@example.com"));
        assert!(looks_like_contact("+1 (555) 123-4567"));
        assert!(looks_like_contact("linkedin.com/in/jane"));
        assert!(!looks_like_contact("Platform Engineer"));
    }

    #[test]
    fn test_group_entries() {
        let lines: Vec<String> = ["Acme - Engineer", "- built", "- shipped", "Beta - Lead", "- led"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let groups = group_entries(&lines);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].len(), 3);
        assert_eq!(groups[1][0], "Beta - Lead");
    }
}
