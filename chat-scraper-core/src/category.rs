// Hostname based link categories

use crate::error::{Result, ScrapeError};
use serde::Serialize;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Linkedin,
    Instagram,
    Youtube,
    General,
    All,
}

impl Category {
    /// Buckets a link can actually land in, in display order.
    pub const CONCRETE: [Category; 4] = [
        Category::Linkedin,
        Category::Instagram,
        Category::Youtube,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Linkedin => "linkedin",
            Category::Instagram => "instagram",
            Category::Youtube => "youtube",
            Category::General => "general",
            Category::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "linkedin" => Some(Category::Linkedin),
            "instagram" => Some(Category::Instagram),
            "youtube" => Some(Category::Youtube),
            "general" => Some(Category::General),
            "all" => Some(Category::All),
            _ => None,
        }
    }

    /// Section heading used by grouped reports, e.g. `LINKEDIN`.
    pub fn heading(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a rule pattern is compared against a hostname.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Host contains the pattern anywhere. Also matches hosts such as
    /// `notlinkedin.example.com`.
    #[default]
    Substring,
    /// Host equals the pattern or is a subdomain of it.
    DomainSuffix,
}

impl MatchMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "substring" | "contains" => Some(MatchMode::Substring),
            "domain-suffix" | "suffix" => Some(MatchMode::DomainSuffix),
            _ => None,
        }
    }

    fn matches(&self, host: &str, pattern: &str) -> bool {
        match self {
            MatchMode::Substring => host.contains(pattern),
            MatchMode::DomainSuffix => {
                host == pattern
                    || host
                        .strip_suffix(pattern)
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRule {
    pub category: Category,
    pub patterns: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: Category, patterns: &[&str]) -> Self {
        Self {
            category,
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Ordered category rules. The first rule whose pattern matches a host wins,
/// hosts matching nothing are `General`.
#[derive(Debug, Clone)]
pub struct CategoryDomainMap {
    rules: Vec<CategoryRule>,
    mode: MatchMode,
}

impl Default for CategoryDomainMap {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

impl CategoryDomainMap {
    /// Built-in rules for linkedin, instagram and youtube, in that priority.
    pub fn new(mode: MatchMode) -> Self {
        let rules = match mode {
            MatchMode::Substring => vec![
                CategoryRule::new(Category::Linkedin, &["linkedin"]),
                CategoryRule::new(Category::Instagram, &["instagram"]),
                CategoryRule::new(Category::Youtube, &["youtube"]),
            ],
            MatchMode::DomainSuffix => vec![
                CategoryRule::new(Category::Linkedin, &["linkedin.com", "lnkd.in"]),
                CategoryRule::new(Category::Instagram, &["instagram.com", "instagr.am"]),
                CategoryRule::new(Category::Youtube, &["youtube.com", "youtu.be"]),
            ],
        };
        Self { rules, mode }
    }

    pub fn with_rules(rules: Vec<CategoryRule>, mode: MatchMode) -> Result<Self> {
        let mut normalized = Vec::with_capacity(rules.len());
        for rule in rules {
            if matches!(rule.category, Category::General | Category::All) {
                return Err(ScrapeError::InvalidRule(format!(
                    "'{}' cannot have matching patterns",
                    rule.category
                )));
            }
            if rule.patterns.is_empty() {
                return Err(ScrapeError::InvalidRule(format!(
                    "'{}' has no patterns",
                    rule.category
                )));
            }
            if rule.patterns.iter().any(|p| p.trim().is_empty()) {
                return Err(ScrapeError::InvalidRule(format!(
                    "'{}' has an empty pattern",
                    rule.category
                )));
            }
            normalized.push(CategoryRule {
                category: rule.category,
                patterns: rule
                    .patterns
                    .iter()
                    .map(|p| p.trim().to_lowercase())
                    .collect(),
            });
        }
        Ok(Self {
            rules: normalized,
            mode,
        })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }

    pub fn categorize(&self, url: &Url) -> Category {
        match url.host_str() {
            Some(host) => self.categorize_host(host),
            None => Category::General,
        }
    }

    pub fn categorize_host(&self, host: &str) -> Category {
        let host = host.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| self.mode.matches(&host, p)))
            .map(|rule| rule.category)
            .unwrap_or(Category::General)
    }

    /// Whether a filter may select `category`. `All` and `General` always can,
    /// concrete categories only when a rule exists for them.
    pub fn is_filterable(&self, category: Category) -> bool {
        match category {
            Category::All | Category::General => true,
            other => self.rules.iter().any(|rule| rule.category == other),
        }
    }
}
