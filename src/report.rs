//! The benchmark result record.
//!
//! Serialized as a single JSON object at the end of a run. Field names
//! follow the camelCase convention of the downstream report tooling:
//! `decodeTimes`/`encodeTimes` are seconds per repetition, `imageSize` is
//! the nominal uncompressed size in bytes and `codestreamSize` counts the
//! payload plus any side-channel data.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Result of one benchmark run: one codec, one image, N repetitions.
///
/// Immutable after assembly; a failed run never produces one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkResult {
    /// Wall-clock decode duration per repetition, in seconds.
    #[serde(with = "durations_secs")]
    pub decode_times: Vec<Duration>,

    /// Wall-clock encode duration per repetition, in seconds.
    #[serde(with = "durations_secs")]
    pub encode_times: Vec<Duration>,

    /// Nominal uncompressed image size in bytes.
    pub image_size: u64,

    /// Compressed size in bytes: payload plus side-channel data.
    pub codestream_size: u64,

    /// Image width in pixels.
    pub image_width: u32,

    /// Image height in pixels.
    pub image_height: u32,

    /// Codec identifier the run was executed against.
    pub codec: String,

    /// Lowercase-hex content digest of the source image.
    pub source_digest: String,

    /// Where the first repetition's payload was persisted, if configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codestream_path: Option<PathBuf>,

    /// When this result was generated.
    #[serde(with = "rfc3339")]
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl BenchmarkResult {
    /// Compression ratio (uncompressed / compressed), 0 when nothing was
    /// encoded.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.codestream_size == 0 {
            0.0
        } else {
            self.image_size as f64 / self.codestream_size as f64
        }
    }

    /// Mean encode duration across repetitions.
    #[must_use]
    pub fn mean_encode_time(&self) -> Option<Duration> {
        mean(&self.encode_times)
    }

    /// Mean decode duration across repetitions.
    #[must_use]
    pub fn mean_decode_time(&self) -> Option<Duration> {
        mean(&self.decode_times)
    }

    /// Render the record as pretty-printed JSON, the harness's output format.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn mean(samples: &[Duration]) -> Option<Duration> {
    if samples.is_empty() {
        return None;
    }
    let total: Duration = samples.iter().sum();
    Some(total / samples.len() as u32)
}

// Custom serialization for duration arrays as seconds
mod durations_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        durations
            .iter()
            .map(Duration::as_secs_f64)
            .collect::<Vec<f64>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs: Vec<f64> = Vec::deserialize(deserializer)?;
        Ok(secs.into_iter().map(Duration::from_secs_f64).collect())
    }
}

mod rfc3339 {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(dt: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        dt.to_rfc3339().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
