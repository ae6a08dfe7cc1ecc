//! Ordered pattern lists for directory and file names
//!
//! Each list is tried top to bottom and the first structural match wins.
//! Patterns are compiled once per process.

use once_cell::sync::Lazy;
use regex::Regex;

/// Rules that yield a season number from a directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectoryRule {
    /// `01. Description`, `2-Description`, `003 Description`
    LeadingNumber,
    /// `Season 01`, `Chapter 2`, `Ignored 100`
    TrailingNumber,
    /// `Specials`
    Specials,
    /// `Season 01: Description`, `Part-3 Ignored`
    Keyword,
}

/// Rules that yield episode fields from a file base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRule {
    /// `1x01. Title`, `2x15 - Title`, `3.15 Title`
    SeasonByEpisode,
    /// `01. Title`, `02 - Title`
    EpisodeOnly,
    /// `Name.S01E02.Title`, `Name - s01e02 - Title`
    SeasonEpisodeMarker,
}

pub(crate) static DIRECTORY_PATTERNS: Lazy<Vec<(DirectoryRule, Regex)>> = Lazy::new(|| {
    vec![
        (DirectoryRule::LeadingNumber, compile(r"^(?P<season>[0-9]+)")),
        (
            DirectoryRule::TrailingNumber,
            compile(r"\W*\s+(?P<season>[0-9]+)$"),
        ),
        (DirectoryRule::Specials, compile(r"^specials")),
        (
            DirectoryRule::Keyword,
            compile(r"^(?:season|lesson|chapter|part)\W*\s*(?P<season>[0-9]+)"),
        ),
    ]
});

pub(crate) static FILE_PATTERNS: Lazy<Vec<(FileRule, Regex)>> = Lazy::new(|| {
    vec![
        (
            FileRule::SeasonByEpisode,
            compile(r"^(?P<season>[0-9]+)[-.x](?P<episode>[0-9]{2,})\W*\s*(?P<title>.+)$"),
        ),
        (
            FileRule::EpisodeOnly,
            compile(r"^(?P<episode>[0-9]{2,})\W*\s*(?P<title>.+)$"),
        ),
        (
            FileRule::SeasonEpisodeMarker,
            compile(r"s(?P<season>[0-9]{2,})e(?P<episode>[0-9]{2,})\s?\W*\s*(?P<title>.+)$"),
        ),
    ]
});

fn compile(pattern: &str) -> Regex {
    // Patterns are fixed literals; a failure here is a programming error.
    Regex::new(&format!("(?i){pattern}"))
        .unwrap_or_else(|e| panic!("Invalid built-in pattern {pattern:?}: {e}"))
}
