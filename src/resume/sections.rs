//! Section detection and per-section parsers

use once_cell::sync::Lazy;
use regex::Regex;

use super::contacts::URL;
use super::models::{Education, Experience, Project, ProjectLinks, Testimonial};
use super::text::{group_entries, is_bullet, sanitize_line, strip_markdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Summary,
    Experience,
    Projects,
    Skills,
    Education,
    Testimonials,
    Certifications,
    Publications,
    Awards,
    Volunteering,
    Blog,
}

impl SectionKey {
    /// Detection order matters: "articles" belongs to publications first
    pub const ALL: [SectionKey; 11] = [
        SectionKey::Summary,
        SectionKey::Experience,
        SectionKey::Projects,
        SectionKey::Skills,
        SectionKey::Education,
        SectionKey::Testimonials,
        SectionKey::Certifications,
        SectionKey::Publications,
        SectionKey::Awards,
        SectionKey::Volunteering,
        SectionKey::Blog,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SectionKey::Summary => &["summary", "profile", "professional summary", "objective"],
            SectionKey::Experience => &[
                "experience",
                "professional experience",
                "work experience",
                "employment history",
            ],
            SectionKey::Projects => &["projects", "case studies", "selected projects"],
            SectionKey::Skills => &[
                "skills",
                "technical skills",
                "skills & tools",
                "skills & technologies",
                "stack",
            ],
            SectionKey::Education => &["education", "academic background"],
            SectionKey::Testimonials => &["testimonials", "recommendations", "references"],
            SectionKey::Certifications => &["certifications", "licenses"],
            SectionKey::Publications => &["publications", "articles"],
            SectionKey::Awards => &["awards", "honors"],
            SectionKey::Volunteering => &["volunteering", "community"],
            SectionKey::Blog => &["blog", "articles", "writing"],
        }
    }
}

/// Longest line still treated as a section heading, in words
const MAX_HEADING_WORDS: usize = 4;

static NON_LETTERS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z&\s]").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const MONTH: &str = "(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)";
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)({MONTH}[a-z]*?\s+\d{{4}}|\d{{4}})\s*[–-]\s*((?:present|current)|{MONTH}[a-z]*?\s+\d{{4}}|\d{{4}})"
    ))
    .unwrap()
});
static MONTH_MENTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec").unwrap());
static HEADER_DATES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)[^|]+(?:Present|\d{4})")
        .unwrap()
});
static HEADER_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[–\-|@]\s*").unwrap());
static AT_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+").unwrap());
static REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)Remote|USA|United|India|Europe|Asia|Africa|America|Australia|Canada|UK|United Kingdom",
    )
    .unwrap()
});
static SKILL_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,|•·\-]").unwrap());
static PAREN_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(([^)]+)\)").unwrap());
static LAZY_PAREN_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\((.*?)\)").unwrap());
static TAG_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\/|,]").unwrap());
static YEAR_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[—–-]\s*\d{4}").unwrap());
static PAREN_START: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(").unwrap());
static DEMO_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)demo|live|app|case|preview").unwrap());
static CODE_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)code|repo|github|gitlab").unwrap());
static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Bachelor|Master|B\.Sc|M\.Sc|Bachelors|Masters|Diploma|Associate").unwrap()
});
static YEAR_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d{4})\s*[–-]\s*(\d{4}|Present)").unwrap());
static ATTRIBUTION_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[–-]\s*").unwrap());
static SKILL_CATEGORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(Languages & Libraries|MLOps & Cloud|Data & Storage|LLM/RAG|Methods|Practices):",
    )
    .unwrap()
});
static SKILL_ITEM_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)[,;•]| and ").unwrap());
static INNER_DIVIDER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,/]").unwrap());

/// Match a line against the section keywords
///
/// The normalized line must equal a keyword or start with one at a word
/// boundary, and be short enough to read as a heading.
pub fn detect_section_key(line: &str) -> Option<SectionKey> {
    if line.trim().is_empty() {
        return None;
    }

    let lowered = strip_markdown(line).to_lowercase();
    let letters_only = NON_LETTERS.replace_all(&lowered, " ");
    let normalized = WHITESPACE.replace_all(&letters_only, " ");
    let normalized = normalized.trim();

    if normalized.split(' ').count() > MAX_HEADING_WORDS {
        return None;
    }

    SectionKey::ALL.into_iter().find(|key| {
        key.keywords().iter().any(|keyword| {
            normalized == *keyword
                || normalized
                    .strip_prefix(*keyword)
                    .is_some_and(|rest| rest.starts_with(' '))
        })
    })
}

/// Start and end of the first date range, as `YYYY-MM` or `Present`
pub fn parse_date_range(text: &str) -> (String, String) {
    match DATE_RANGE.captures(text) {
        Some(caps) => (
            normalize_date_token(caps.get(1).map_or("", |m| m.as_str())),
            normalize_date_token(caps.get(2).map_or("", |m| m.as_str())),
        ),
        None => (String::new(), String::new()),
    }
}

pub fn normalize_date_token(token: &str) -> String {
    let lower = token.trim().to_lowercase();

    if lower == "present" || lower == "current" {
        return "Present".to_string();
    }
    if is_year(&lower) {
        return format!("{lower}-01");
    }

    let mut parts = lower.split_whitespace();
    match (parts.next().and_then(month_number), parts.next()) {
        (Some(month), Some(year)) if is_year(year) => format!("{year}-{month}"),
        _ => String::new(),
    }
}

fn is_year(text: &str) -> bool {
    text.len() == 4 && text.chars().all(|c| c.is_ascii_digit())
}

fn month_number(name: &str) -> Option<&'static str> {
    let month = match name {
        "jan" | "january" => "01",
        "feb" | "february" => "02",
        "mar" | "march" => "03",
        "apr" | "april" => "04",
        "may" => "05",
        "jun" | "june" => "06",
        "jul" | "july" => "07",
        "aug" | "august" => "08",
        "sep" | "sept" | "september" => "09",
        "oct" | "october" => "10",
        "nov" | "november" => "11",
        "dec" | "december" => "12",
        _ => return None,
    };
    Some(month)
}

fn dedupe(items: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

pub fn parse_skills(lines: &[String]) -> Vec<String> {
    if lines.is_empty() {
        return Vec::new();
    }

    let joined = lines.join(", ");
    dedupe(
        SKILL_DIVIDER
            .split(&joined)
            .map(sanitize_line)
            .filter(|skill| skill.chars().count() > 1),
    )
}

/// Mine "Category: a, b (c/d)" lists that follow a CORE SKILLS marker
pub fn extract_skills_from_summary(summary_tail: &str) -> Vec<String> {
    let labels: Vec<_> = SKILL_CATEGORY.find_iter(summary_tail).collect();
    let mut collected = Vec::new();

    for (index, label) in labels.iter().enumerate() {
        let end = labels
            .get(index + 1)
            .map_or(summary_tail.len(), |next| next.start());
        let base = sanitize_line(&summary_tail[label.end()..end]);

        for item in SKILL_ITEM_DIVIDER.split(&base) {
            let cleaned = sanitize_line(item);
            let without_parens = LAZY_PAREN_GROUP.replace_all(&cleaned, "").trim().to_string();
            collected.push(without_parens);

            for inner in LAZY_PAREN_GROUP.captures_iter(&cleaned) {
                let inner = inner.get(1).map_or("", |m| m.as_str());
                collected.extend(
                    INNER_DIVIDER
                        .split(inner)
                        .map(sanitize_line)
                        .filter(|token| !token.is_empty()),
                );
            }
        }
    }

    dedupe(
        collected
            .into_iter()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty()),
    )
}

pub fn parse_experience(lines: &[String]) -> Vec<Experience> {
    group_entries(lines)
        .into_iter()
        .filter_map(|group| {
            let (header, details) = group.split_first()?;
            let (company, role, location) = parse_role_company(header, details);
            let (start, end) = parse_date_range(&group.join(" "));

            let mut bullets = Vec::new();
            let mut summary_parts = Vec::new();
            for line in details {
                if is_bullet(line) {
                    bullets.push(sanitize_line(line));
                } else if !MONTH_MENTION.is_match(line) {
                    summary_parts.push(sanitize_line(line));
                }
            }

            Some(Experience {
                company: sanitize_line(&company),
                role: sanitize_line(&role),
                start,
                end,
                location: sanitize_line(&location),
                summary: strip_markdown(&summary_parts.join(" ")),
                bullets,
            })
        })
        .collect()
}

/// Split "Company – Role | Jan 2020 – Present" style headers
fn parse_role_company(header: &str, rest: &[String]) -> (String, String, String) {
    let cleaned = strip_markdown(&header.replace('\u{2022}', ""));
    let date_less = HEADER_DATES.replace_all(&cleaned, "");
    let date_less = date_less.trim();

    let parts: Vec<&str> = HEADER_DIVIDER.split(date_less).collect();
    let (company, role) = if parts.len() >= 2 {
        (parts[0].to_string(), parts[1..].join(" - "))
    } else if date_less.contains(" at ") {
        let mut split = AT_DIVIDER.splitn(date_less, 2);
        let role = split.next().unwrap_or_default().to_string();
        let company = split.next().unwrap_or_default().to_string();
        (company, role)
    } else {
        (String::new(), date_less.to_string())
    };

    let location = rest
        .iter()
        .find(|line| REGION.is_match(line))
        .map(|line| strip_markdown(line))
        .unwrap_or_default();

    (company, role, location)
}

/// First URL in `line` when the line mentions `hint`
fn hinted_url(line: &str, hint: &Regex) -> Option<String> {
    hint.is_match(line)
        .then(|| URL.find(line))
        .flatten()
        .map(|m| m.as_str().to_string())
}

/// Hinted URL of a project heading, else its first URL at all
fn heading_url(line: &str, hint: &Regex) -> String {
    hinted_url(line, hint)
        .or_else(|| URL.find(line).map(|m| m.as_str().to_string()))
        .unwrap_or_default()
}

fn project_from_heading(raw: &str) -> Project {
    let cleaned = sanitize_line(raw);

    let tags = PAREN_GROUP
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|inner| {
            TAG_DIVIDER
                .split(inner.as_str())
                .map(sanitize_line)
                .filter(|tag| !tag.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let before_year = YEAR_SUFFIX.split(&cleaned).next().unwrap_or_default();
    let name = PAREN_START
        .split(before_year)
        .next()
        .unwrap_or_default()
        .trim();

    Project {
        name: if name.is_empty() { cleaned.clone() } else { name.to_string() },
        summary: String::new(),
        tags,
        highlights: Vec::new(),
        links: ProjectLinks {
            demo: heading_url(raw, &DEMO_HINT),
            code: heading_url(raw, &CODE_HINT),
        },
    }
}

fn finalize_project(mut project: Project) -> Project {
    if project.summary.is_empty() && !project.highlights.is_empty() {
        project.summary = project.highlights.remove(0);
    }
    project.tags = dedupe(project.tags);
    project
}

/// A non-bullet line opens a project; its bullets fill summary then highlights
pub fn parse_projects(lines: &[String]) -> Vec<Project> {
    let mut entries = Vec::new();
    let mut current: Option<Project> = None;

    for line in lines {
        let raw = line.trim();
        if raw.is_empty() {
            continue;
        }

        if !is_bullet(raw) {
            entries.extend(current.take().map(finalize_project));
            current = Some(project_from_heading(raw));
            continue;
        }

        let Some(project) = current.as_mut() else {
            continue;
        };
        let cleaned = sanitize_line(raw);
        if cleaned.is_empty() {
            continue;
        }

        if project.summary.is_empty() {
            project.summary = cleaned;
        } else {
            project.highlights.push(cleaned);
        }

        // Bullet links only count when the bullet says what they are
        if project.links.demo.is_empty() {
            project.links.demo = hinted_url(raw, &DEMO_HINT).unwrap_or_default();
        }
        if project.links.code.is_empty() {
            project.links.code = hinted_url(raw, &CODE_HINT).unwrap_or_default();
        }
    }

    entries.extend(current.map(finalize_project));
    entries
}

pub fn parse_education(lines: &[String]) -> Vec<Education> {
    group_entries(lines)
        .into_iter()
        .map(|group| {
            let school = sanitize_line(&group[0]);
            let rest: Vec<String> = group[1..].iter().map(|line| sanitize_line(line)).collect();
            let degree = rest
                .iter()
                .find(|line| DEGREE.is_match(line))
                .or_else(|| rest.first())
                .cloned()
                .unwrap_or_default();
            let year = YEAR_RANGE
                .find(&group.join(" "))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            Education {
                school,
                degree,
                year,
            }
        })
        .collect()
}

/// Quote lines followed by a "Name – Role" attribution line
pub fn parse_testimonials(lines: &[String]) -> Vec<Testimonial> {
    group_entries(lines)
        .into_iter()
        .filter(|group| group.len() >= 2)
        .filter_map(|group| {
            let (attribution, quote_lines) = group.split_last()?;
            let quote = quote_lines
                .iter()
                .map(|line| sanitize_line(line))
                .collect::<Vec<_>>()
                .join(" ");
            let attribution = sanitize_line(attribution);
            let mut parts = ATTRIBUTION_DIVIDER.split(&attribution);

            Some(Testimonial {
                name: parts.next().unwrap_or_default().trim().to_string(),
                role: parts.next().unwrap_or_default().trim().to_string(),
                quote,
            })
        })
        .collect()
}
