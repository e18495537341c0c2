mod field_value;
pub use field_value::FieldValue;

use crate::errors::ConvertError;
use std::{fmt::Display, str::FromStr};

/// The role a record plays in a changelog stream.
///
/// This is a closed set: kinds that cannot be decoded into one of these variants are rejected
/// with [`ConvertError::UnsupportedChangeKind`] at the decode boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Insert,
    UpdateBefore,
    UpdateAfter,
    Delete,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 4] = [
        Self::Insert,
        Self::UpdateBefore,
        Self::UpdateAfter,
        Self::Delete,
    ];

    pub fn short_string(&self) -> &'static str {
        match self {
            Self::Insert => "+I",
            Self::UpdateBefore => "-U",
            Self::UpdateAfter => "+U",
            Self::Delete => "-D",
        }
    }

    pub fn to_byte_value(&self) -> u8 {
        match self {
            Self::Insert => 0,
            Self::UpdateBefore => 1,
            Self::UpdateAfter => 2,
            Self::Delete => 3,
        }
    }
}

impl Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.short_string())
    }
}

impl TryFrom<u8> for ChangeKind {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.to_byte_value() == value)
            .ok_or_else(|| ConvertError::UnsupportedChangeKind(format!("byte value {value}")))
    }
}

impl FromStr for ChangeKind {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.short_string() == s)
            .ok_or_else(|| ConvertError::UnsupportedChangeKind(s.to_string()))
    }
}

/// A single changelog record: positional field values, ordered as the fields of the
/// [`PhysicalSchema`](crate::schema::PhysicalSchema) they conform to, tagged with a [`ChangeKind`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeRecord {
    kind: ChangeKind,
    values: Vec<FieldValue>,
}

impl ChangeRecord {
    pub fn new(kind: ChangeKind, values: Vec<FieldValue>) -> Self {
        Self { kind, values }
    }

    pub fn insert(values: Vec<FieldValue>) -> Self {
        Self::new(ChangeKind::Insert, values)
    }

    pub fn update_before(values: Vec<FieldValue>) -> Self {
        Self::new(ChangeKind::UpdateBefore, values)
    }

    pub fn update_after(values: Vec<FieldValue>) -> Self {
        Self::new(ChangeKind::UpdateAfter, values)
    }

    pub fn delete(values: Vec<FieldValue>) -> Self {
        Self::new(ChangeKind::Delete, values)
    }

    pub fn kind(&self) -> ChangeKind {
        self.kind
    }

    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    pub fn arity(&self) -> usize {
        self.values.len()
    }

    /// Return the same values re-tagged with `kind`.
    pub fn with_kind(self, kind: ChangeKind) -> Self {
        Self { kind, ..self }
    }

    pub fn into_values(self) -> Vec<FieldValue> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_string_round_trip() {
        for kind in ChangeKind::ALL {
            assert_eq!(kind.short_string().parse::<ChangeKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_byte_value_round_trip() {
        for kind in ChangeKind::ALL {
            assert_eq!(ChangeKind::try_from(kind.to_byte_value()).unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_byte_value() {
        let err = ChangeKind::try_from(4).unwrap_err();

        assert_eq!(
            err,
            ConvertError::UnsupportedChangeKind("byte value 4".to_string())
        );
    }

    #[test]
    fn test_unknown_short_string() {
        let err = "~X".parse::<ChangeKind>().unwrap_err();

        assert_eq!(err.to_string(), "Unsupported change kind: ~X");
    }

    #[test]
    fn test_with_kind() {
        let record = ChangeRecord::insert(vec!["u1".into(), 30.into()]);
        let record = record.with_kind(ChangeKind::Delete);

        assert_eq!(record.kind(), ChangeKind::Delete);
        assert_eq!(record.arity(), 2);
        assert_eq!(record.values()[0], FieldValue::String("u1".to_string()));
    }
}
