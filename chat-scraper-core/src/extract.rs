// Link extraction from a single line of chat text

use crate::error::{ExtractError, UrlRejection};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;
use url::Url;

/// Anything starting with `http://` or `https://` up to the next whitespace.
///
/// No trimming is done, so a period ending a sentence stays part of the match.
/// A bare `https://` is still a candidate and fails parsing.
static URL_CANDIDATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S*").unwrap());

/// Candidate URL substrings in the order they appear in `line`.
pub fn find_candidates(line: &str) -> impl Iterator<Item = &str> {
    URL_CANDIDATE_RE.find_iter(line).map(|m| m.as_str())
}

/// Strictly parse one candidate as an absolute URL.
pub fn parse_candidate(candidate: &str, line: &str) -> Result<Url, ExtractError> {
    let reject = |reason| ExtractError {
        candidate: candidate.to_string(),
        line: line.to_string(),
        reason,
    };

    if !has_valid_percent_encoding(candidate) {
        return Err(reject(UrlRejection::BadPercentEncoding));
    }

    let url = Url::parse(candidate).map_err(|e| reject(UrlRejection::Malformed(e)))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(reject(UrlRejection::MissingHost)),
    }

    trace!("Parsed candidate {} -> {}", candidate, url);
    Ok(url)
}

/// Extract every URL on a line.
///
/// The first candidate that fails to parse fails the whole line.
pub fn extract_urls(line: &str) -> Result<Vec<Url>, ExtractError> {
    find_candidates(line)
        .map(|candidate| parse_candidate(candidate, line))
        .collect()
}

// `url` silently accepts stray '%' signs, so check them ourselves.
fn has_valid_percent_encoding(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}
