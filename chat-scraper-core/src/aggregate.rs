// Accumulated link state for one run: ingest, filter, group

use crate::category::{Category, CategoryDomainMap};
use crate::error::{Result, ScrapeError};
use crate::extract::{extract_urls, find_candidates, parse_candidate};
use crate::normalize::{normalize, normalize_all};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::io::{self, BufRead};
use tracing::{debug, info, warn};
use url::Url;

/// What to do when a candidate on a line is not a valid URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseErrorPolicy {
    /// Stop the run at the first invalid candidate.
    #[default]
    Abort,
    /// Log the candidate, count it as skipped and keep going.
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    Ingested,
    Filtered,
    Grouped,
}

/// Per-category buckets produced by [`AggregationState::group`].
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroups {
    buckets: BTreeMap<Category, Vec<Url>>,
}

impl CategoryGroups {
    fn empty() -> Self {
        Self {
            buckets: Category::CONCRETE
                .iter()
                .map(|&category| (category, Vec::new()))
                .collect(),
        }
    }

    /// Split `urls` into fresh buckets, keeping their relative order.
    pub fn partition(urls: &[Url], map: &CategoryDomainMap) -> Self {
        let mut groups = Self::empty();
        for url in urls {
            groups
                .buckets
                .entry(map.categorize(url))
                .or_default()
                .push(url.clone());
        }
        groups
    }

    pub fn get(&self, category: Category) -> &[Url] {
        self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Buckets in display order: linkedin, instagram, youtube, general.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Url])> {
        self.buckets
            .iter()
            .map(|(category, urls)| (*category, urls.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrapeSummary {
    pub lines_read: usize,
    pub discovered: usize,
    pub shown: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct AggregationState {
    discovered: Vec<Url>,
    all: Vec<Url>,
    groups: Option<CategoryGroups>,
    lines_read: usize,
    skipped: usize,
    phase: Phase,
}

impl Default for AggregationState {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregationState {
    pub fn new() -> Self {
        Self {
            discovered: Vec::new(),
            all: Vec::new(),
            groups: None,
            lines_read: 0,
            skipped: 0,
            phase: Phase::Empty,
        }
    }

    /// Scan every line, appending normalized URLs in line order.
    ///
    /// Errors are returned as soon as they happen; whatever was accumulated
    /// before the failing line stays in place and the state is `Ingested`
    /// either way.
    pub fn ingest<I>(&mut self, lines: I, policy: ParseErrorPolicy) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let result = self.ingest_lines(lines, policy);

        self.groups = None;
        self.phase = Phase::Ingested;
        result?;

        info!(
            "Ingested {} lines, discovered {} links ({} skipped)",
            self.lines_read,
            self.discovered.len(),
            self.skipped
        );
        Ok(())
    }

    fn ingest_lines<I>(&mut self, lines: I, policy: ParseErrorPolicy) -> Result<()>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        for line in lines {
            let line_number = self.lines_read + 1;
            let line = line.map_err(|source| ScrapeError::LineRead {
                line_number,
                source,
            })?;

            let urls = match policy {
                ParseErrorPolicy::Abort => {
                    let mut urls = extract_urls(&line).map_err(|source| {
                        ScrapeError::UrlParse {
                            line_number,
                            source,
                        }
                    })?;
                    normalize_all(&mut urls);
                    urls
                }
                ParseErrorPolicy::Skip => self.extract_lenient(&line, line_number),
            };

            self.discovered.extend(urls.iter().cloned());
            self.all.extend(urls);
            self.lines_read += 1;
        }
        Ok(())
    }

    pub fn ingest_reader<R: BufRead>(&mut self, reader: R, policy: ParseErrorPolicy) -> Result<()> {
        self.ingest(reader.lines(), policy)
    }

    fn extract_lenient(&mut self, line: &str, line_number: usize) -> Vec<Url> {
        let mut urls = Vec::new();
        for candidate in find_candidates(line) {
            match parse_candidate(candidate, line) {
                Ok(url) => urls.push(normalize(url)),
                Err(e) => {
                    warn!("Skipping invalid link on line {}: {}", line_number, e);
                    self.skipped += 1;
                }
            }
        }
        urls
    }

    /// Narrow the working collection to the requested categories.
    ///
    /// Unknown names are ignored. Requesting `all` restores every discovered link.
    pub fn filter<S: AsRef<str>>(&mut self, requested: &[S], map: &CategoryDomainMap) {
        let mut wanted = HashSet::new();
        for name in requested {
            match Category::from_str(name.as_ref()) {
                Some(category) if map.is_filterable(category) => {
                    wanted.insert(category);
                }
                _ => debug!("Ignoring unknown category '{}'", name.as_ref()),
            }
        }

        self.all = if wanted.contains(&Category::All) {
            self.discovered.clone()
        } else {
            self.discovered
                .iter()
                .filter(|url| wanted.contains(&map.categorize(url)))
                .cloned()
                .collect()
        };

        self.groups = None;
        self.phase = Phase::Filtered;
        debug!(
            "Filter kept {} of {} links",
            self.all.len(),
            self.discovered.len()
        );
    }

    /// Partition the working collection into per-category buckets.
    ///
    /// Buckets are rebuilt from scratch on every call.
    pub fn group(&mut self, map: &CategoryDomainMap) -> &CategoryGroups {
        self.phase = Phase::Grouped;
        self.groups.insert(CategoryGroups::partition(&self.all, map))
    }

    pub fn all(&self) -> &[Url] {
        &self.all
    }

    pub fn discovered(&self) -> &[Url] {
        &self.discovered
    }

    pub fn groups(&self) -> Option<&CategoryGroups> {
        self.groups.as_ref()
    }

    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn summary(&self) -> ScrapeSummary {
        ScrapeSummary {
            lines_read: self.lines_read,
            discovered: self.discovered.len(),
            shown: self.all.len(),
            skipped: self.skipped,
        }
    }
}

/// Split a comma separated category list, dropping blanks.
pub fn parse_category_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
