//! Command error taxonomy
//!
//! Every error here is a rejected command: reported synchronously to the
//! caller and never leaving the timer state partially updated.

use thiserror::Error;

use crate::state::session::SessionPhase;

/// Why a timer command was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Configure input did not parse as a positive whole number of minutes
    #[error("invalid session length {input:?}: enter a positive whole number of minutes")]
    InvalidInput { input: String },

    /// Configure input parsed but exceeds the allowed maximum
    #[error("session length {minutes} exceeds the maximum of {maximum} minutes")]
    ExceedsMaximum { minutes: u32, maximum: u32 },

    /// Start was called without a valid prior configuration
    #[error("no session length configured")]
    NoConfig,

    /// The command is not valid in the current phase
    #[error("cannot {command} while the timer is {}", .phase.label())]
    InvalidTransition {
        command: &'static str,
        phase: SessionPhase,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = CommandError::InvalidInput {
            input: "abc".to_string(),
        };
        assert!(err.to_string().contains("abc"));

        let err = CommandError::ExceedsMaximum {
            minutes: 481,
            maximum: 480,
        };
        assert!(err.to_string().contains("481"));
        assert!(err.to_string().contains("480"));
    }

    #[test]
    fn transition_message_names_command_and_phase() {
        let err = CommandError::InvalidTransition {
            command: "configure",
            phase: SessionPhase::Running,
        };
        assert_eq!(
            err.to_string(),
            "cannot configure while the timer is working"
        );
    }
}
