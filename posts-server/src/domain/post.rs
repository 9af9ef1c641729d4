use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
    pub(crate) created_at: Option<String>,
}

/// Fields a client may set on create and update. Anything missing is stored as NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct PostInput {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    pub(crate) author: Option<String>,
}

impl Post {
    pub(crate) fn from_input(id: i64, input: PostInput, created_at: Option<String>) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
            author: input.author,
            created_at,
        }
    }
}

/// Current UTC time as ISO-8601 with millisecond precision, e.g. `2026-01-02T03:04:05.678Z`.
pub(crate) fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
