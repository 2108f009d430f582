use std::collections::BTreeMap;

use crate::{
    error::AppResult,
    fetcher::PageFetcher,
    model::{ReadingMode, ReadingModePayload, ReadingTimeResponse},
    util::{html::count_words, url_norm::target_from_path},
};

#[derive(Debug, Clone, Copy)]
pub struct ReadingModel {
    pub mode: ReadingMode,
    pub words_per_minute: u64,
}

pub const READING_MODELS: [ReadingModel; 3] = [
    ReadingModel {
        mode: ReadingMode::Skimming,
        words_per_minute: 500,
    },
    ReadingModel {
        mode: ReadingMode::SpeedReading,
        words_per_minute: 441,
    },
    ReadingModel {
        mode: ReadingMode::Standard,
        words_per_minute: 238,
    },
];

impl ReadingModel {
    pub fn minutes(&self, word_count: u64) -> u64 {
        word_count.div_ceil(self.words_per_minute)
    }

    pub fn estimate(&self, word_count: u64) -> ReadingModePayload {
        ReadingModePayload {
            minutes: self.minutes(word_count),
            // The mode name, not a High/Moderate/Low level: no model ever
            // carried a distinct level, so the mode is the only label emitted.
            comprehension_level: self.mode.as_str().to_string(),
        }
    }
}

pub fn reading_modes(word_count: u64) -> BTreeMap<ReadingMode, ReadingModePayload> {
    READING_MODELS
        .iter()
        .map(|model| (model.mode, model.estimate(word_count)))
        .collect()
}

/// Full request pipeline: validate the path, fetch, count, estimate.
pub async fn analyze(fetcher: &PageFetcher, path: &str) -> AppResult<ReadingTimeResponse> {
    let url = target_from_path(path)?;
    let html = fetcher.fetch_text(&url).await?;
    let word_count = count_words(&html) as u64;

    tracing::info!(url = %url, word_count, "reading time estimated");

    Ok(ReadingTimeResponse {
        url: url.to_string(),
        word_count,
        reading_modes: reading_modes(word_count),
    })
}
