//! Per-stream topic lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{MessageId, StreamId};

/// A topic as returned by the server's topic list endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Topic name.
    pub name: String,
    /// Id of the newest message in the topic.
    pub max_id: MessageId,
}

impl TopicRecord {
    /// Topic record.
    pub fn new(name: impl Into<String>, max_id: MessageId) -> Self {
        Self { name: name.into(), max_id }
    }
}

/// Fetched topic lists, keyed by stream.
///
/// A stream with no entry has not been fetched yet; an entry with an empty
/// list has been fetched and has no topics.
pub type TopicsState = BTreeMap<StreamId, Vec<TopicRecord>>;
