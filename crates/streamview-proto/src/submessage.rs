//! Widget submessages.
//!
//! Interactive widgets (polls) are driven by submessages attached to a
//! message. Each submessage's `content` is a JSON document. The first widget
//! submessage describes the widget ([`WidgetData`]); every later one is an
//! event against it ([`PollEvent`]).
//!
//! Payload shapes are owned by the server. Decoding here is strict: anything
//! that does not match is reported as a [`ProtocolError`] so the caller can
//! log it and skip the submessage.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{MessageId, ProtocolError, Result, SubmessageId, UserId};

/// `msg_type` of submessages that drive widgets.
pub const WIDGET_MSG_TYPE: &str = "widget";

/// An auxiliary event attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submessage {
    /// Submessage id; defines event order.
    pub id: SubmessageId,
    /// Message this submessage belongs to.
    #[serde(default)]
    pub message_id: MessageId,
    /// User who produced the event.
    pub sender_id: UserId,
    /// Submessage kind; widgets use [`WIDGET_MSG_TYPE`].
    pub msg_type: String,
    /// JSON-encoded payload.
    pub content: String,
}

impl Submessage {
    /// Widget submessage with the given JSON content.
    pub fn widget(id: SubmessageId, sender_id: UserId, content: impl Into<String>) -> Self {
        Self {
            id,
            message_id: 0,
            sender_id,
            msg_type: WIDGET_MSG_TYPE.to_owned(),
            content: content.into(),
        }
    }

    /// Whether this submessage drives a widget.
    pub fn is_widget(&self) -> bool {
        self.msg_type == WIDGET_MSG_TYPE
    }

    /// Decode the content as a widget description.
    pub fn decode_widget_data(&self) -> Result<WidgetData> {
        serde_json::from_str(&self.content).map_err(|err| ProtocolError::MalformedSubmessage {
            id: self.id,
            reason: err.to_string(),
        })
    }

    /// Decode the content as a poll event.
    ///
    /// An unrecognized `type` is reported separately from a malformed body so
    /// logs distinguish "newer server" from "corrupt payload".
    pub fn decode_poll_event(&self) -> Result<PollEvent> {
        let value: Value = serde_json::from_str(&self.content).map_err(|err| {
            ProtocolError::MalformedSubmessage { id: self.id, reason: err.to_string() }
        })?;

        let kind = value.get("type").and_then(Value::as_str).unwrap_or_default();
        if !PollEvent::KNOWN_TYPES.iter().any(|known| *known == kind) {
            return Err(ProtocolError::UnknownEventType { id: self.id, kind: kind.to_owned() });
        }

        serde_json::from_value(value).map_err(|err| ProtocolError::MalformedSubmessage {
            id: self.id,
            reason: err.to_string(),
        })
    }
}

/// Widget description carried by the first widget submessage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetData {
    /// Widget kind; only `"poll"` is rendered.
    pub widget_type: String,
    /// Widget-specific setup. Absent on some malformed historical messages.
    #[serde(default)]
    pub extra_data: Option<PollExtraData>,
}

/// Poll setup from the widget description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollExtraData {
    /// Poll question.
    #[serde(default)]
    pub question: Option<String>,
    /// Options created together with the poll.
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Event applied to a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PollEvent {
    /// A user added an option
    NewOption {
        /// Sender-local option index; the option key is `<sender>,<idx>`
        idx: u32,
        /// Option text
        option: String,
    },
    /// A user voted for or retracted a vote on an option
    Vote {
        /// Option key
        key: String,
        /// `1` to vote, `-1` to retract
        vote: i8,
    },
    /// The poll owner changed the question
    Question {
        /// New question text
        question: String,
    },
}

impl PollEvent {
    /// Event `type` tags this client understands.
    pub const KNOWN_TYPES: [&'static str; 3] = ["new_option", "vote", "question"];

    /// Encode as submessage content.
    pub fn to_content(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
