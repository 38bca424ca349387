use chrono::{DateTime, Duration, Utc};

/// A user-visible message that clears itself after a fixed interval or is
/// superseded by a newer message. Used for authoring validation feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransientNotice {
    pub message: String,
    pub expires_at: DateTime<Utc>,
}

/// Holds at most one live notice. Raising a new notice replaces the
/// current one; reading past the expiry yields nothing.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<TransientNotice>,
}

impl NoticeBoard {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_seconds),
            current: None,
        }
    }

    pub fn raise(&mut self, message: impl Into<String>) {
        self.current = Some(TransientNotice {
            message: message.into(),
            expires_at: Utc::now() + self.ttl,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// The live message as of `now`, if any.
    pub fn current(&self, now: DateTime<Utc>) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|notice| notice.expires_at > now)
            .map(|notice| notice.message.as_str())
    }
}
