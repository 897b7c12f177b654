//! Contact details from the resume preamble

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::Social;
use super::text::{looks_like_contact, strip_markdown, PHONE};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap());
pub(crate) static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)https?://[^\s]+").unwrap());
static SOCIAL_LABEL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)linkedin|github|gitlab|behance|dribbble|twitter|x\.com|medium|substack")
        .unwrap()
});
static LOCATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+,\s*[A-Za-z]+").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Contacts {
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) website: String,
    pub(crate) socials: Vec<Social>,
    pub(crate) location: String,
}

pub(crate) fn extract_contacts(lines: &[String]) -> Contacts {
    let joined = lines.join(" • ");

    let email = EMAIL.find(&joined).map(|m| m.as_str().to_string()).unwrap_or_default();
    let phone = PHONE
        .find(&joined)
        .map(|m| WHITESPACE.replace_all(m.as_str(), " ").into_owned())
        .unwrap_or_default();
    let website = URL.find(&joined).map(|m| m.as_str().to_string()).unwrap_or_default();

    let location = lines
        .iter()
        .find(|line| LOCATION.is_match(&strip_markdown(line)) && !looks_like_contact(line))
        .map(|line| strip_markdown(line))
        .unwrap_or_default();

    let socials = parse_socials(&joined)
        .into_iter()
        .filter(|social| social.url != website)
        .collect();

    Contacts {
        email,
        phone,
        website,
        socials,
        location,
    }
}

/// Every URL in the text, labelled by the network it points at
pub(crate) fn parse_socials(text: &str) -> Vec<Social> {
    URL.find_iter(text)
        .map(|m| {
            let url = m.as_str();
            let label = SOCIAL_LABEL.find(url).map_or("Website", |l| l.as_str());
            Social {
                label: format_label(label),
                url: url.to_string(),
            }
        })
        .collect()
}

fn format_label(label: &str) -> String {
    label
        .replace(['_', '.', '-'], " ")
        .split(' ')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
