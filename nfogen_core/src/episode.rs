//! Episode metadata record
//!
//! An [`EpisodeRecord`] is assembled once per video file from the classifier
//! output and never changes afterwards. Normalisation happens at
//! construction: titles are trimmed, numeric text is parsed and rejected when
//! it cannot be represented.

use crate::error::{Result, ValidationError};

/// Metadata for a single episode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EpisodeRecord {
    title: Option<String>,
    episode_number: Option<u32>,
    season_number: Option<u32>,
}

impl EpisodeRecord {
    /// Create a record from already-typed values
    pub fn new(title: Option<&str>, episode_number: Option<u32>, season_number: Option<u32>) -> Self {
        Self {
            title: title.map(|t| t.trim().to_string()),
            episode_number,
            season_number,
        }
    }

    /// Create a record from raw captured text
    ///
    /// Numeric fields must be plain decimal digit runs that fit in a `u32`;
    /// anything else is a [`ValidationError::InvalidNumber`].
    pub fn from_text(
        title: Option<&str>,
        episode_number: Option<&str>,
        season_number: Option<&str>,
    ) -> Result<Self> {
        let episode_number = episode_number
            .map(|text| parse_number("episode", text))
            .transpose()?;
        let season_number = season_number
            .map(|text| parse_number("season", text))
            .transpose()?;

        Ok(Self::new(title, episode_number, season_number))
    }

    /// Fill in the season when the record has none
    pub fn or_season(mut self, season_number: Option<u32>) -> Self {
        self.season_number = self.season_number.or(season_number);
        self
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn episode_number(&self) -> Option<u32> {
        self.episode_number
    }

    /// Season number; `Some(0)` denotes specials
    pub fn season_number(&self) -> Option<u32> {
        self.season_number
    }
}

/// Parse a decimal digit run captured from a name
pub fn parse_number(field: &str, text: &str) -> std::result::Result<u32, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_number(
            field,
            text,
            "expected decimal digits",
        ));
    }

    trimmed
        .parse::<u32>()
        .map_err(|e| ValidationError::invalid_number(field, text, &e.to_string()))
}
