//! Name classification
//!
//! Infers season, episode and title from bare directory and file names using
//! the ordered pattern lists in [`patterns`]. The first pattern that matches
//! wins and the remaining ones are not tried. Classification performs no I/O.

pub mod patterns;

pub use patterns::{DirectoryRule, FileRule};

use crate::episode::{EpisodeRecord, parse_number};
use crate::error::Result;
use log::trace;
use patterns::{DIRECTORY_PATTERNS, FILE_PATTERNS};
use regex::Regex;

/// Outcome of classifying a directory name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryMatch<'a> {
    /// No pattern matched
    Unmatched,
    /// A pattern captured a season number
    Numbered { rule: DirectoryRule, season: &'a str },
    /// The directory holds specials (season 0)
    Specials,
}

/// Outcome of classifying a file base name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileMatch<'a> {
    /// No pattern matched
    Unmatched,
    /// A pattern captured episode fields
    Matched {
        rule: FileRule,
        season: Option<&'a str>,
        episode: &'a str,
        title: &'a str,
    },
}

/// Classifier over the compiled directory and file pattern lists
#[derive(Debug, Clone, Copy)]
pub struct NameClassifier {
    directory_patterns: &'static [(DirectoryRule, Regex)],
    file_patterns: &'static [(FileRule, Regex)],
}

impl Default for NameClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NameClassifier {
    /// Create a classifier; patterns are compiled on first use
    pub fn new() -> Self {
        Self {
            directory_patterns: DIRECTORY_PATTERNS.as_slice(),
            file_patterns: FILE_PATTERNS.as_slice(),
        }
    }

    /// Classify a bare directory name
    pub fn classify_directory<'a>(&self, name: &'a str) -> DirectoryMatch<'a> {
        for (rule, regex) in self.directory_patterns {
            if let Some(captures) = regex.captures(name) {
                trace!("Directory {name:?} matched {rule:?}");
                return match captures.name("season") {
                    Some(season) => DirectoryMatch::Numbered {
                        rule: *rule,
                        season: season.as_str(),
                    },
                    None => DirectoryMatch::Specials,
                };
            }
        }

        trace!("Directory {name:?} matched no pattern");
        DirectoryMatch::Unmatched
    }

    /// Classify a file base name (extension already stripped)
    pub fn classify_file<'a>(&self, name: &'a str) -> FileMatch<'a> {
        for (rule, regex) in self.file_patterns {
            let Some(captures) = regex.captures(name) else {
                continue;
            };

            // Every file pattern captures an episode and a title.
            let (Some(episode), Some(title)) = (captures.name("episode"), captures.name("title"))
            else {
                continue;
            };

            trace!("File {name:?} matched {rule:?}");
            return FileMatch::Matched {
                rule: *rule,
                season: captures.name("season").map(|m| m.as_str()),
                episode: episode.as_str(),
                title: title.as_str(),
            };
        }

        trace!("File {name:?} matched no pattern");
        FileMatch::Unmatched
    }

    /// Resolve the season number implied by a directory name
    pub fn season_for_directory(&self, name: &str) -> Result<Option<u32>> {
        match self.classify_directory(name) {
            DirectoryMatch::Unmatched => Ok(None),
            DirectoryMatch::Specials => Ok(Some(0)),
            DirectoryMatch::Numbered { season, .. } => Ok(Some(parse_number("season", season)?)),
        }
    }

    /// Resolve a file base name into an episode record
    ///
    /// The file name decides episode and title. Its season wins when the
    /// matching pattern captures one, otherwise `default_season` (normally the
    /// directory season) is kept. Unmatched names keep both defaults.
    pub fn resolve_episode(
        &self,
        name: &str,
        default_season: Option<u32>,
        default_title: Option<&str>,
    ) -> Result<EpisodeRecord> {
        match self.classify_file(name) {
            FileMatch::Unmatched => Ok(EpisodeRecord::new(default_title, None, default_season)),
            FileMatch::Matched {
                season,
                episode,
                title,
                ..
            } => Ok(EpisodeRecord::from_text(Some(title), Some(episode), season)?
                .or_season(default_season)),
        }
    }
}
