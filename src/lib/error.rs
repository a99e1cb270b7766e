// SPDX-License-Identifier: Apache-2.0

use std::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    InvalidArgument,
    Bug,
}

impl Default for ErrorKind {
    fn default() -> Self {
        Self::Bug
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::fmt::Display for NetplanStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl Error for NetplanStateError {}

/// Error raised while loading a system or netplan snapshot.
///
/// The diff engine itself never fails: unmatched interfaces, malformed
/// routing table names and absent attributes are all reported as data.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct NetplanStateError {
    kind: ErrorKind,
    msg: String,
}

impl NetplanStateError {
    pub fn new(kind: ErrorKind, msg: String) -> Self {
        Self { kind, msg }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn msg(&self) -> &str {
        self.msg.as_str()
    }
}

impl From<serde_json::Error> for NetplanStateError {
    fn from(e: serde_json::Error) -> Self {
        NetplanStateError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid JSON state: {e}"),
        )
    }
}

impl From<serde_yaml::Error> for NetplanStateError {
    fn from(e: serde_yaml::Error) -> Self {
        NetplanStateError::new(
            ErrorKind::InvalidArgument,
            format!("Invalid YAML state: {e}"),
        )
    }
}
