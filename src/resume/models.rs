//! Normalized resume record and its validation rules

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ResumeKitError;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resume {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    pub socials: Vec<Social>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub testimonials: Vec<Testimonial>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Social {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub name: String,
    pub summary: String,
    pub tags: Vec<String>,
    pub highlights: Vec<String>,
    pub links: ProjectLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLinks {
    pub demo: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub start: String,
    pub end: String,
    pub location: String,
    pub summary: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub quote: String,
}

impl Resume {
    /// Validate the record, blanking optional fields that fail their format
    ///
    /// Only a missing name (fewer than two characters) is fatal. A malformed
    /// email or website becomes empty; socials or skills containing a single
    /// bad entry are dropped as a whole.
    pub fn normalize(mut self) -> Result<Self, ResumeKitError> {
        if self.name.chars().count() < 2 {
            return Err(ResumeKitError::InvalidResume("Name is required".to_string()));
        }

        if !self.email.is_empty() && !EMAIL_PATTERN.is_match(&self.email) {
            self.email.clear();
        }

        if !self.website.is_empty() && Url::parse(&self.website).is_err() {
            self.website.clear();
        }

        if self.socials.iter().any(|social| Url::parse(&social.url).is_err()) {
            self.socials.clear();
        }

        if self.skills.iter().any(|skill| skill.is_empty()) {
            self.skills.clear();
        }

        Ok(self)
    }
}
