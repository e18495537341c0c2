use std::collections::{BTreeMap, HashMap};

/// A single typed value held by a [`ChangeRecord`](super::ChangeRecord).
#[derive(Clone, PartialEq, Debug)]
pub enum FieldValue {
    String(String),
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Int(i32),
    BigInt(i64),
    Float(f32),
    Double(f64),
    /// Arbitrary precision number, kept in its textual form.
    Decimal(String),
    Binary(Vec<u8>),

    Array(Vec<FieldValue>),
    Map(BTreeMap<String, FieldValue>),

    Null,
}

impl FieldValue {
    pub fn decimal(value: impl Into<String>) -> Self {
        Self::Decimal(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "STRING",
            Self::Boolean(_) => "BOOLEAN",
            Self::TinyInt(_) => "TINYINT",
            Self::SmallInt(_) => "SMALLINT",
            Self::Int(_) => "INT",
            Self::BigInt(_) => "BIGINT",
            Self::Float(_) => "FLOAT",
            Self::Double(_) => "DOUBLE",
            Self::Decimal(_) => "DECIMAL",
            Self::Binary(_) => "BINARY",
            Self::Array(_) => "ARRAY",
            Self::Map(_) => "MAP",
            Self::Null => "NULL",
        }
    }
}

macro_rules! impl_from_field_value {
    () => {};
    (, $($tail:tt)*) => {
        impl_from_field_value!($($tail)*);
    };
    ($ty:ty => $variant:ident $($tail:tt)*) => {
        impl From<$ty> for FieldValue {
            fn from(value: $ty) -> Self {
                FieldValue::$variant(value)
            }
        }

        impl_from_field_value!($($tail)*);
    };
}

// Vec<T> for any other T is covered by the blanket implementation below
impl_from_field_value!(
    String => String,
    bool => Boolean,
    i8 => TinyInt,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Binary
);

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl<T> From<Option<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => FieldValue::Null,
        }
    }
}

impl<T> From<Vec<T>> for FieldValue
where
    T: Into<FieldValue>,
{
    fn from(value: Vec<T>) -> Self {
        FieldValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<K, V> From<HashMap<K, V>> for FieldValue
where
    K: ToString,
    V: Into<FieldValue>,
{
    fn from(map: HashMap<K, V>) -> Self {
        FieldValue::Map(
            map.into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

impl<K, V> From<BTreeMap<K, V>> for FieldValue
where
    K: ToString,
    V: Into<FieldValue>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        FieldValue::Map(
            map.into_iter()
                .map(|(k, v)| (k.to_string(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bytes_are_binary() {
        let value = FieldValue::from(b"101010".to_vec());

        assert_eq!(value, FieldValue::Binary(b"101010".to_vec()));
    }

    #[test]
    fn test_vec_is_array() {
        let value = FieldValue::from(vec!["a", "b"]);

        assert_eq!(
            value,
            FieldValue::Array(vec![
                FieldValue::String("a".to_string()),
                FieldValue::String("b".to_string())
            ])
        );
    }

    #[test]
    fn test_option() {
        assert_eq!(FieldValue::from(None::<i32>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some(7_i64)), FieldValue::BigInt(7));
    }

    #[test]
    fn test_hashmap() {
        let map = [("a", 1_i32), ("b", 2_i32)]
            .into_iter()
            .collect::<HashMap<_, _>>();

        let FieldValue::Map(value) = FieldValue::from(map) else {
            panic!("expected a map");
        };

        assert_eq!(value.len(), 2);
        assert_eq!(value.get("b"), Some(&FieldValue::Int(2)));
    }
}
