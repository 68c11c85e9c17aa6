use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::stream_item::StreamItem;

/// Creation timestamps arrive in the feed's legacy format,
/// e.g. `Wed Aug 27 13:08:45 +0000 2008`.
pub const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("could not parse creation time {value:?}")]
    CreatedAt {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// The persisted shape of one stream item.
///
/// Field names are kept in the store's historical casing so existing
/// collections stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Record {
    pub screen_name: String,
    pub text: String,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Project a decoded stream item down to the persisted fields.
    ///
    /// A present but malformed creation time is an error; an absent one
    /// is simply not recorded.
    pub fn from_item(item: &StreamItem) -> Result<Self, DecodeError> {
        let created_at = match &item.created_at {
            Some(raw) => {
                let parsed = DateTime::parse_from_str(raw, CREATED_AT_FORMAT).map_err(|source| {
                    DecodeError::CreatedAt {
                        value: raw.clone(),
                        source,
                    }
                })?;
                Some(parsed.with_timezone(&Utc))
            }
            None => None,
        };
        Ok(Self {
            screen_name: item.user.screen_name.clone(),
            text: item.text.clone(),
            id: item.id,
            created_at,
        })
    }

    /// Canonical web address of the item, e.g.
    /// `https://twitter.com/alice/status/42`.
    pub fn permalink(&self, domain: &str) -> String {
        format!("https://{}/{}/status/{}", domain, self.screen_name, self.id)
    }
}
