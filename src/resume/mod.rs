//! Resume extraction
//!
//! Turns resume text (usually the markdown preview of the .docx) into a
//! normalized `Resume` record. The text is split into lines, the preamble
//! before the first section heading yields name, title and contacts, and
//! each recognised section has its own parser.

mod contacts;
pub mod models;
pub mod sections;
pub mod source;
pub mod text;

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use crate::error::ResumeKitError;
use contacts::extract_contacts;
use sections::*;
use text::{break_out_emphasis, looks_like_contact, sanitize_line, split_emphasis_segments, strip_markdown};

pub use models::*;
pub use source::{extract_resume, read_resume_source, write_resume_json, ResumeSource, SourceContent};

/// Preamble lines kept for contact extraction after the title
const MAX_PREAMBLE_LINES: usize = 7;

static HEADING_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+").unwrap());
static CORE_SKILLS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)CORE SKILLS").unwrap());
static SUMMARY_CLEANUP: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\s+([,.;])").unwrap(), "${1}"),
        (Regex::new(r"\(\s+").unwrap(), "("),
        (Regex::new(r"\s+\)").unwrap(), ")"),
        (Regex::new(r"\s+\+").unwrap(), "+"),
        (Regex::new(r"\+\s+").unwrap(), "+"),
        (Regex::new(r"\s+").unwrap(), " "),
    ]
});

/// Parse resume text into an unvalidated `Resume`
pub fn parse_resume_text(raw_text: &str) -> Result<Resume, ResumeKitError> {
    let cleaned = break_out_emphasis(raw_text).replace('\r', "\n");
    let raw_lines: Vec<String> = cleaned
        .split('\n')
        .map(|line| HEADING_MARKER.replace(line.trim(), "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if raw_lines.is_empty() {
        return Err(ResumeKitError::EmptyResumeText);
    }

    let mut lines = raw_lines
        .iter()
        .flat_map(|line| split_emphasis_segments(line))
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .into_iter()
        .peekable();

    let name = lines.next().map(|line| strip_markdown(&line)).unwrap_or_default();
    let mut title = String::new();
    let mut preamble = Vec::new();

    while let Some(peek) = lines.peek() {
        if detect_section_key(peek).is_some() {
            break;
        }
        if title.is_empty() && !looks_like_contact(peek) {
            title = strip_markdown(peek);
            lines.next();
            continue;
        }
        preamble.extend(lines.next());
        if preamble.len() >= MAX_PREAMBLE_LINES {
            break;
        }
    }

    let contacts = extract_contacts(&preamble);

    let mut sections: HashMap<SectionKey, Vec<String>> = HashMap::new();
    let mut current = SectionKey::Summary;
    for line in lines {
        match detect_section_key(&line) {
            Some(key) => current = key,
            None => sections.entry(current).or_default().push(line),
        }
    }
    let section = |key: SectionKey| sections.get(&key).map(Vec::as_slice).unwrap_or(&[]);

    let summary_lines = section(SectionKey::Summary);
    let composite = if summary_lines.is_empty() {
        strip_markdown(&preamble.join(" "))
    } else {
        summary_lines
            .iter()
            .map(|line| sanitize_line(line))
            .collect::<Vec<_>>()
            .join(" ")
    };

    let (summary, summary_tail) = match CORE_SKILLS.find(&composite) {
        Some(marker) => (
            composite[..marker.start()].trim().to_string(),
            CORE_SKILLS
                .split(&composite[marker.start()..])
                .skip(1)
                .collect::<Vec<_>>()
                .join(" CORE SKILLS "),
        ),
        None => (composite.clone(), String::new()),
    };

    let mut skills = parse_skills(section(SectionKey::Skills));
    if skills.is_empty() {
        skills = extract_skills_from_summary(&summary_tail);
    }

    Ok(Resume {
        name,
        title,
        summary: tidy_summary(&summary),
        location: contacts.location,
        email: contacts.email,
        phone: contacts.phone,
        website: contacts.website,
        socials: contacts.socials,
        skills,
        projects: parse_projects(section(SectionKey::Projects)),
        experience: parse_experience(section(SectionKey::Experience)),
        education: parse_education(section(SectionKey::Education)),
        testimonials: parse_testimonials(section(SectionKey::Testimonials)),
    })
}

/// Parse and validate in one step
pub fn normalize_resume_text(raw_text: &str) -> Result<Resume, ResumeKitError> {
    parse_resume_text(raw_text)?.normalize()
}

fn tidy_summary(summary: &str) -> String {
    let mut text = summary.to_string();
    for (pattern, replacement) in SUMMARY_CLEANUP.iter() {
        text = pattern.replace_all(&text, *replacement).into_owned();
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "# Jane Doe

Senior Platform Engineer

Lagos, Nigeria

jane@example.com | +234 801 234 5678 | https://jane.dev | https://github.com/jane

## Summary

Engineer building reliable data systems ( Rust , Python ) .

CORE SKILLS Languages & Libraries: Rust, Python Methods: TDD

## Experience

__Acme Corp – Staff Engineer__ Jan 2021 – Present

- Scaled ingest to 2M events/s

## Projects

Atlas (Rust) — 2023

- Realtime map tiles

## Education

University of Lagos

B.Sc Computer Science

2012 – 2016
";

    #[test]
    fn test_parse_sample_resume() {
        let resume = normalize_resume_text(SAMPLE).unwrap();

        assert_eq!(resume.name, "Jane Doe");
        assert_eq!(resume.title, "Senior Platform Engineer");
        assert_eq!(resume.location, "Lagos, Nigeria");
        assert_eq!(resume.email, "jane@example.com");
        assert_eq!(resume.website, "https://jane.dev");
        assert_eq!(resume.socials.len(), 1);
        assert_eq!(resume.socials[0].label, "Github");
        assert_eq!(
            resume.summary,
            "Engineer building reliable data systems (Rust, Python)."
        );
        assert_eq!(resume.skills, vec!["Rust", "Python", "TDD"]);

        assert_eq!(resume.experience.len(), 1);
        assert_eq!(resume.experience[0].company, "Acme Corp");
        assert_eq!(resume.experience[0].role, "Staff Engineer");
        assert_eq!(resume.experience[0].start, "2021-01");
        assert_eq!(resume.experience[0].end, "Present");
        assert_eq!(resume.experience[0].bullets, vec!["Scaled ingest to 2M events/s"]);

        assert_eq!(resume.projects[0].name, "Atlas");
        assert_eq!(resume.projects[0].tags, vec!["Rust"]);
        assert_eq!(resume.education[0].degree, "B.Sc Computer Science");
        assert!(resume.testimonials.is_empty());
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(matches!(
            parse_resume_text(" \n\r\n "),
            Err(ResumeKitError::EmptyResumeText)
        ));
    }

    #[test]
    fn test_summary_falls_back_to_preamble() {
        let resume = parse_resume_text("Jane Doe\nEngineer\nLagos, Nigeria\nSkills\nRust, Go").unwrap();
        assert_eq!(resume.summary, "Lagos, Nigeria");
        assert_eq!(resume.skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_single_character_name_is_rejected() {
        assert!(matches!(
            normalize_resume_text("J\nExperience"),
            Err(ResumeKitError::InvalidResume(_))
        ));
    }
}
