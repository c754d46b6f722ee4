use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{avoid_list::entities::AvoidListItem, common::generate_timestamp};

/// Scan input, decided by the caller. The image variant is used only when
/// text recognition produced no text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanInput {
    Text(String),
    Image(Bytes),
}

/// Image container type, sniffed from magic bytes before upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Unknown,
}

impl ImageFormat {
    pub fn sniff(data: &[u8]) -> Self {
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            ImageFormat::Jpeg
        } else if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            ImageFormat::Png
        } else if data.starts_with(&[0x47, 0x49, 0x46, 0x38]) {
            ImageFormat::Gif
        } else {
            ImageFormat::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Unknown => "unknown",
        }
    }
}

/// A detected match between scanned tokens and an avoid-list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub item: AvoidListItem,
    /// The canonical name or the alias that matched.
    pub matched_term: String,
}

/// Which profile category flagged an ingredient in the heuristic path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagCategory {
    Allergy,
    Blacklist,
}

impl FlagCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlagCategory::Allergy => "allergy",
            FlagCategory::Blacklist => "blacklist",
        }
    }
}

/// Server-style verdict: a status word and a human-readable summary. Also
/// synthesized locally for the cache-backed offline path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVerdict {
    pub status: String,
    pub summary: String,
}

/// Offline-style verdict produced by the heuristic scorer (or by a legacy
/// server response shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalVerdict {
    pub is_safe: bool,
    /// 1..=10, higher is healthier.
    pub health_score: i32,
    pub warnings: Vec<String>,
    pub flagged_ingredients: Vec<String>,
}

/// The two verdict shapes are modeled explicitly; consumers must handle
/// both and must not assume the other shape's fields exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Verdict {
    Remote(RemoteVerdict),
    Local(LocalVerdict),
}

/// Immutable result of one scan, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanVerdict {
    pub id: Uuid,
    pub scanned_at: DateTime<Utc>,
    pub verdict: Verdict,
}

impl ScanVerdict {
    pub fn new(verdict: Verdict) -> Self {
        let (now, timestamp) = generate_timestamp();
        Self {
            id: Uuid::new_v7(timestamp),
            scanned_at: now,
            verdict,
        }
    }

    /// Status line shown on the results screen.
    pub fn display_status(&self) -> String {
        match &self.verdict {
            Verdict::Remote(remote) => format!("Taro says {}", remote.status),
            Verdict::Local(local) => {
                if local.is_safe {
                    "Taro says okay".to_string()
                } else {
                    "Taro says warning".to_string()
                }
            }
        }
    }

    pub fn formatted_date(&self) -> String {
        self.scanned_at.format("%b %e, %Y %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_known_magic_bytes() {
        assert_eq!(ImageFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageFormat::Jpeg);
        assert_eq!(
            ImageFormat::sniff(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A]),
            ImageFormat::Png
        );
        assert_eq!(ImageFormat::sniff(b"GIF89a"), ImageFormat::Gif);
        assert_eq!(ImageFormat::sniff(b"BM12345"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::sniff(&[]), ImageFormat::Unknown);
    }

    #[test]
    fn display_status_covers_both_shapes() {
        let remote = ScanVerdict::new(Verdict::Remote(RemoteVerdict {
            status: "proceed".to_string(),
            summary: "Nothing concerning found.".to_string(),
        }));
        assert_eq!(remote.display_status(), "Taro says proceed");

        let local = ScanVerdict::new(Verdict::Local(LocalVerdict {
            is_safe: false,
            health_score: 3,
            warnings: vec![],
            flagged_ingredients: vec![],
        }));
        assert_eq!(local.display_status(), "Taro says warning");
    }
}
