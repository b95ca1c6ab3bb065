// SPDX-License-Identifier: Apache-2.0 OR MIT
//! Error types for channel construction and lookup.

use thiserror::Error;

/// A configuration entry could not be turned into an instance
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Not a locator key and not invokable
    #[error("Could not resolve \"{0}\"")]
    Unresolvable(String),

    #[error("\"{reference}\" resolved to a {found}, expected a {expected}")]
    WrongKind {
        reference: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown handler type \"{0}\"")]
    UnknownHandler(String),

    #[error("invalid parameter \"{param}\" for handler \"{handler}\": {reason}")]
    InvalidParam {
        handler: String,
        param: String,
        reason: String,
    },
}

/// Failure to produce a channel's logger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChannelError {
    #[error("Channel \"{0}\" is not defined")]
    Undefined(String),

    #[error("No default channel has been set")]
    NoDefault,

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The emergency channel failed to build while falling back from `cause`
    #[error("emergency channel unavailable ({emergency}) after: {cause}")]
    EmergencyUnavailable {
        #[source]
        cause: Box<ChannelError>,
        emergency: Box<ChannelError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ResolutionError::Unresolvable("handler.audit".to_string()).to_string(),
            "Could not resolve \"handler.audit\""
        );
        assert_eq!(
            ChannelError::Undefined("foo".to_string()).to_string(),
            "Channel \"foo\" is not defined"
        );
        assert_eq!(
            ChannelError::NoDefault.to_string(),
            "No default channel has been set"
        );
    }

    #[test]
    fn test_resolution_error_is_transparent() {
        let err: ChannelError = ResolutionError::UnknownHandler("syslog".to_string()).into();
        assert_eq!(err.to_string(), "unknown handler type \"syslog\"");
        assert!(matches!(err, ChannelError::Resolution(_)));
    }
}
