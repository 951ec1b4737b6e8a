//! Retry policy for transient transport faults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::transport::{FaultKind, TransportFault};

/// Error-chain substrings that identify an abrupt TLS termination.
pub const DEFAULT_TLS_EOF_MARKERS: &[&str] = &[
    "UNEXPECTED_EOF_WHILE_READING",
    "peer closed connection without sending TLS close_notify",
];

const DEFAULT_DELAY: Duration = Duration::from_secs(60);

/// The two fault categories worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransientFault {
    Timeout,
    TlsEof,
}

impl std::fmt::Display for TransientFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "Request timed out"),
            Self::TlsEof => write!(f, "Connection closed mid-stream"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum Backoff {
    Fixed,
    Exponential {
        factor: f64,
        #[serde(rename = "max_delay_secs", with = "secs")]
        max_delay: Duration,
    },
}

/// How long to wait between attempts, and for how many attempts.
///
/// `max_attempts = None` retries forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    pub max_attempts: Option<u32>,
    #[serde(rename = "delay_secs", with = "secs")]
    pub delay: Duration,
    pub backoff: Backoff,
    pub tls_eof_markers: Vec<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: None,
            delay: DEFAULT_DELAY,
            backoff: Backoff::Fixed,
            tls_eof_markers: DEFAULT_TLS_EOF_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl RetryPolicy {
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// `None` means the fault is not retryable. Connect timeouts are not
    /// read timeouts and fall through to the marker check.
    pub fn classify(&self, fault: &TransportFault) -> Option<TransientFault> {
        if fault.kind == FaultKind::Timeout {
            return Some(TransientFault::Timeout);
        }
        self.tls_eof_markers
            .iter()
            .filter(|m| !m.is_empty())
            .any(|m| fault.message.contains(m.as_str()))
            .then_some(TransientFault::TlsEof)
    }

    /// Whether another attempt may follow `attempts` failed ones.
    pub fn allows_retry(&self, attempts: u32) -> bool {
        self.max_attempts.is_none_or(|max| attempts < max)
    }

    /// Delay before the attempt following `attempts` failed ones (1-based).
    pub fn delay_for(&self, attempts: u32) -> Duration {
        match &self.backoff {
            Backoff::Fixed => self.delay,
            Backoff::Exponential { factor, max_delay } => {
                let exponent = attempts.saturating_sub(1).min(i32::MAX as u32) as i32;
                let secs = self.delay.as_secs_f64() * factor.powi(exponent);
                let capped = secs.min(max_delay.as_secs_f64()).max(0.0);
                Duration::from_secs_f64(capped)
            }
        }
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded_fixed_minute() {
        let policy = RetryPolicy::default();
        assert!(policy.allows_retry(u32::MAX - 1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(60));
        assert_eq!(policy.delay_for(50), Duration::from_secs(60));
    }

    #[test]
    fn test_classify() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.classify(&TransportFault::timeout("operation timed out")),
            Some(TransientFault::Timeout)
        );
        assert_eq!(
            policy.classify(&TransportFault::other(
                "error sending request: peer closed connection without sending TLS close_notify"
            )),
            Some(TransientFault::TlsEof)
        );
        assert_eq!(
            policy.classify(&TransportFault::other("dns error: no such host")),
            None
        );
    }

    #[test]
    fn test_connect_timeouts_and_plain_eof_are_not_transient() {
        let policy = RetryPolicy::default();
        assert_eq!(
            policy.classify(&TransportFault::connect(
                "error sending request: operation timed out"
            )),
            None
        );
        assert_eq!(
            policy.classify(&TransportFault::other(
                "error decoding response body: unexpected EOF during chunk size line"
            )),
            None
        );
        assert_eq!(
            policy.classify(&TransportFault::other(
                "error sending request: [SSL: UNEXPECTED_EOF_WHILE_READING] EOF occurred"
            )),
            Some(TransientFault::TlsEof)
        );
    }

    #[test]
    fn test_bounded_attempts() {
        let policy = RetryPolicy::default().with_max_attempts(3);
        assert!(policy.allows_retry(1));
        assert!(policy.allows_retry(2));
        assert!(!policy.allows_retry(3));
    }

    #[test]
    fn test_exponential_backoff_caps() {
        let policy = RetryPolicy::default()
            .with_delay(Duration::from_secs(2))
            .with_backoff(Backoff::Exponential {
                factor: 2.0,
                max_delay: Duration::from_secs(10),
            });
        assert_eq!(policy.delay_for(1), Duration::from_secs(2));
        assert_eq!(policy.delay_for(2), Duration::from_secs(4));
        assert_eq!(policy.delay_for(3), Duration::from_secs(8));
        assert_eq!(policy.delay_for(4), Duration::from_secs(10));
    }
}
