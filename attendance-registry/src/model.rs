// Copyright 2025 Kore Ledger, SL
// SPDX-License-Identifier: AGPL-3.0-or-later

//! # Model module.
//!
//! The `model` module provides the `Subject` entity and its typed
//! identifier.
//!

use std::{fmt, str::FromStr};

use mongodb::bson::oid::ObjectId;

use crate::error::Error;

/// Store-assigned subject identifier.
///
/// Wraps the BSON ObjectId generated when a subject is created. Caller
/// supplied strings go through `from_str`, which rejects anything that is
/// not a well-formed identifier instead of trusting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubjectId(ObjectId);

impl SubjectId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    pub(crate) fn to_object_id(self) -> ObjectId {
        self.0
    }
}

impl Default for SubjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for SubjectId {
    fn from(value: ObjectId) -> Self {
        Self(value)
    }
}

impl FromStr for SubjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self).map_err(|e| {
            Error::InvalidInput(format!("Invalid subject id: {}", e))
        })
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A tracked subject with its attendance counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    /// The subject's identifier, assigned at creation.
    pub id: SubjectId,
    /// The subject's name, immutable after creation.
    pub name: String,
    /// Times the subject was marked present.
    pub attended: u64,
    /// Times the subject was marked absent.
    pub absent: u64,
}

impl Subject {
    /// A new subject with zeroed counters and a fresh identifier.
    pub fn new(name: &str) -> Self {
        Self {
            id: SubjectId::new(),
            name: name.to_owned(),
            attended: 0,
            absent: 0,
        }
    }
}

/// Counter targeted by a marking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Attended,
    Absent,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_id_roundtrip() {
        let id = SubjectId::new();
        let parsed = SubjectId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_subject_id_rejects_malformed_input() {
        for input in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "12345"] {
            let result = SubjectId::from_str(input);
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }
    }

    #[test]
    fn test_new_subject_starts_with_zeroed_counters() {
        let subject = Subject::new("Math");
        assert_eq!(subject.name, "Math");
        assert_eq!(subject.attended, 0);
        assert_eq!(subject.absent, 0);
    }
}
