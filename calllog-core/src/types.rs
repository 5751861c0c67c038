//! Core domain types for calllog-export
//!
//! A [`CallRecord`] is one historical call event as read from the device
//! call log. Records are produced by a [`RecordSource`](crate::source::RecordSource)
//! and are never mutated afterwards.

use serde::{Deserialize, Serialize};

// ============================================
// Call Type
// ============================================

/// Direction/disposition of a call.
///
/// Maps the integer codes used by the platform call-log store. Codes that
/// are not recognised are kept in [`CallType::Unknown`] because the set of
/// codes differs between platform versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum CallType {
    Incoming,
    Outgoing,
    Missed,
    Voicemail,
    Rejected,
    Blocked,
    AnsweredExternally,
    /// Unrecognised platform code
    Unknown(i32),
}

impl CallType {
    pub const INCOMING_CODE: i32 = 1;
    pub const OUTGOING_CODE: i32 = 2;
    pub const MISSED_CODE: i32 = 3;
    pub const VOICEMAIL_CODE: i32 = 4;
    pub const REJECTED_CODE: i32 = 5;
    pub const BLOCKED_CODE: i32 = 6;
    pub const ANSWERED_EXTERNALLY_CODE: i32 = 7;

    /// Map a platform call-type code
    pub fn from_code(code: i32) -> Self {
        match code {
            Self::INCOMING_CODE => CallType::Incoming,
            Self::OUTGOING_CODE => CallType::Outgoing,
            Self::MISSED_CODE => CallType::Missed,
            Self::VOICEMAIL_CODE => CallType::Voicemail,
            Self::REJECTED_CODE => CallType::Rejected,
            Self::BLOCKED_CODE => CallType::Blocked,
            Self::ANSWERED_EXTERNALLY_CODE => CallType::AnsweredExternally,
            other => CallType::Unknown(other),
        }
    }

    /// Platform code for this call type
    pub fn code(&self) -> i32 {
        match self {
            CallType::Incoming => Self::INCOMING_CODE,
            CallType::Outgoing => Self::OUTGOING_CODE,
            CallType::Missed => Self::MISSED_CODE,
            CallType::Voicemail => Self::VOICEMAIL_CODE,
            CallType::Rejected => Self::REJECTED_CODE,
            CallType::Blocked => Self::BLOCKED_CODE,
            CallType::AnsweredExternally => Self::ANSWERED_EXTERNALLY_CODE,
            CallType::Unknown(code) => *code,
        }
    }

    /// Canonical uppercase name used in the export
    pub fn as_str(&self) -> &'static str {
        match self {
            CallType::Incoming => "INCOMING",
            CallType::Outgoing => "OUTGOING",
            CallType::Missed => "MISSED",
            CallType::Voicemail => "VOICEMAIL",
            CallType::Rejected => "REJECTED",
            CallType::Blocked => "BLOCKED",
            CallType::AnsweredExternally => "ANSWERED_EXTERNALLY",
            CallType::Unknown(_) => "UNKNOWN",
        }
    }
}

impl From<i32> for CallType {
    fn from(code: i32) -> Self {
        CallType::from_code(code)
    }
}

impl From<CallType> for i32 {
    fn from(call_type: CallType) -> Self {
        call_type.code()
    }
}

impl std::fmt::Display for CallType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================
// Call Record
// ============================================

/// A single call-log entry.
///
/// Field names on the wire follow the platform call-log columns
/// (`number`, `type`, `date`, `duration`, `name`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    /// Dialed or received number (may be empty)
    #[serde(default)]
    pub number: String,
    /// Call direction/disposition
    #[serde(rename = "type")]
    pub call_type: CallType,
    /// When the call happened, epoch milliseconds
    #[serde(rename = "date")]
    pub timestamp: i64,
    /// Call length in seconds
    #[serde(rename = "duration", default)]
    pub duration_secs: u64,
    /// Cached contact name (may be empty)
    #[serde(default)]
    pub name: String,
}
