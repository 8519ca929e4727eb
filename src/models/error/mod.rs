// Error module
// Recoverable conditions raised by the scheduler core

use thiserror::Error;

/// Every condition the core can report. None of them is fatal: callers log
/// the error and skip the offending entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("index out of range: from={from}, to={to}, len={len}")]
    OutOfRange { from: usize, to: usize, len: usize },

    #[error("malformed persisted data: {0}")]
    MalformedPersistedData(String),

    #[error("malformed URL parameter {key}={value}")]
    MalformedUrlParameter { key: String, value: String },

    #[error("unknown timezone identifier '{0}'")]
    UnknownTimezoneIdentifier(String),

    #[error("display name and timezone identifier must not be empty")]
    EmptyIdentifier,

    #[error("invalid work hours {start}..{end}; expected 0 <= start < end <= 24")]
    InvalidWorkHours { start: u32, end: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offending_input() {
        let err = SchedulerError::UnknownTimezoneIdentifier("Mars/Olympus".to_string());
        assert!(err.to_string().contains("Mars/Olympus"));

        let err = SchedulerError::OutOfRange { from: 4, to: 0, len: 2 };
        assert_eq!(err.to_string(), "index out of range: from=4, to=0, len=2");
    }
}
