//! Terminal result of one upload attempt

/// The only status treated as delivered. Other 2xx answers are rejections.
pub const DELIVERED_STATUS: u16 = 200;

/// How an upload attempt ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Collector accepted the payload
    Delivered(u16),
    /// Collector answered with a non-success status
    Rejected(u16),
    /// No response was received (connect, write, or read failed)
    TransportError(String),
}

impl UploadOutcome {
    /// Classify a received HTTP status
    pub fn from_status(status: u16) -> Self {
        if status == DELIVERED_STATUS {
            UploadOutcome::Delivered(status)
        } else {
            UploadOutcome::Rejected(status)
        }
    }

    /// Build a transport failure from an error and its source chain
    pub fn transport(error: &(dyn std::error::Error + 'static)) -> Self {
        UploadOutcome::TransportError(error_chain(error))
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, UploadOutcome::Delivered(_))
    }

    /// HTTP status, if the collector answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            UploadOutcome::Delivered(code) | UploadOutcome::Rejected(code) => Some(*code),
            UploadOutcome::TransportError(_) => None,
        }
    }

    /// Short label for logs
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadOutcome::Delivered(_) => "delivered",
            UploadOutcome::Rejected(_) => "rejected",
            UploadOutcome::TransportError(_) => "transport_error",
        }
    }
}

impl std::fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadOutcome::Delivered(code) => write!(f, "data delivered (HTTP {})", code),
            UploadOutcome::Rejected(code) => {
                write!(f, "collector rejected the upload (HTTP {})", code)
            }
            UploadOutcome::TransportError(reason) => write!(f, "error sending data: {}", reason),
        }
    }
}

/// Join an error with its sources: `outer: middle: root`
fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // reqwest/hyper often repeat the inner message in the outer one
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
