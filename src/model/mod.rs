use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingMode {
    Standard,
    SpeedReading,
    Skimming,
}

impl ReadingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingMode::Standard => "standard",
            ReadingMode::SpeedReading => "speedreading",
            ReadingMode::Skimming => "skimming",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingModePayload {
    pub minutes: u64,
    pub comprehension_level: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingTimeResponse {
    pub url: String,
    pub word_count: u64,
    pub reading_modes: BTreeMap<ReadingMode, ReadingModePayload>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_matches_serialized_name() {
        for mode in [
            ReadingMode::Standard,
            ReadingMode::SpeedReading,
            ReadingMode::Skimming,
        ] {
            assert_eq!(serde_json::to_value(mode).unwrap(), mode.as_str());
        }
    }
}
