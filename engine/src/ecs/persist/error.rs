use std::{io, path::PathBuf};

use crate::ecs::persist::MAX_NAME_LEN;

/// Errors raised while saving or restoring a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("save file '{0}' not found")]
    NotFound(PathBuf),

    #[error("snapshot ended before the end marker")]
    Truncated,

    #[error("component name length {0} exceeds the limit of {MAX_NAME_LEN}")]
    NameTooLong(u32),

    #[error("malformed component name: {0}")]
    CorruptName(String),

    #[error("no persistent component registered as '{0}'")]
    UnknownComponent(String),

    #[error("restoring '{name}' needs {needed} new entities but only {free} are free")]
    EntityCapacity {
        name: &'static str,
        needed: usize,
        free: usize,
    },

    #[error("snapshot i/o failed: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for PersistError {
    /// A short read always means the stream stopped early, so it is reported as truncation.
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => Self::Truncated,
            _ => Self::Io(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_reads_become_truncation() {
        // Given
        let eof = io::Error::from(io::ErrorKind::UnexpectedEof);
        let denied = io::Error::from(io::ErrorKind::PermissionDenied);

        // Then
        assert!(matches!(PersistError::from(eof), PersistError::Truncated));
        assert!(matches!(PersistError::from(denied), PersistError::Io(_)));
    }

    #[test]
    fn messages_name_the_problem() {
        let error = PersistError::UnknownComponent("Ghost".into());
        assert_eq!(error.to_string(), "no persistent component registered as 'Ghost'");

        let error = PersistError::NameTooLong(5000);
        assert_eq!(
            error.to_string(),
            "component name length 5000 exceeds the limit of 1024"
        );
    }
}
