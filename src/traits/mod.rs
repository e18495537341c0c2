use crate::{
    errors::SchemaError,
    record::{ChangeKind, ChangeRecord, FieldValue},
    schema::{FieldType, PhysicalSchema},
};
use std::collections::{BTreeMap, HashMap};

/// A Rust type whose values are the rows of a changelog stream.
///
/// Usually derived:
///
/// ```
/// use dynamodb_change_sink::{ChangeKind, ChangeRow};
///
/// #[derive(ChangeRow)]
/// struct User {
///     #[partition_key]
///     #[change_sink(rename = "userId")]
///     user_id: String,
///     name: Option<String>,
///     age: i32,
/// }
///
/// let schema = User::physical_schema().unwrap();
/// assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["userId", "name", "age"]);
///
/// let record = User { user_id: "u1".into(), name: None, age: 30 }
///     .into_change_record(ChangeKind::Insert);
/// assert_eq!(record.arity(), 3);
/// ```
pub trait ChangeRow: Sized {
    fn physical_schema() -> Result<PhysicalSchema, SchemaError>;

    /// Field values in the same order as the fields of [`ChangeRow::physical_schema`].
    fn into_values(self) -> Vec<FieldValue>;

    fn into_change_record(self, kind: ChangeKind) -> ChangeRecord {
        ChangeRecord::new(kind, self.into_values())
    }
}

/// Static [`FieldType`] of a Rust type used as a [`ChangeRow`] field.
pub trait FieldTyped {
    fn field_type() -> FieldType;

    fn nullable() -> bool {
        false
    }
}

macro_rules! impl_field_typed {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FieldTyped for $ty {
                fn field_type() -> FieldType {
                    FieldType::$variant
                }
            }
        )*
    };
}

impl_field_typed!(
    String => String,
    bool => Boolean,
    i8 => TinyInt,
    i16 => SmallInt,
    i32 => Int,
    i64 => BigInt,
    f32 => Float,
    f64 => Double,
    Vec<u8> => Binary,
);

impl<T> FieldTyped for Option<T>
where
    T: FieldTyped,
{
    fn field_type() -> FieldType {
        T::field_type()
    }

    fn nullable() -> bool {
        true
    }
}

impl<T> FieldTyped for Vec<T>
where
    T: FieldTyped,
{
    fn field_type() -> FieldType {
        FieldType::array(T::field_type())
    }
}

impl<T> FieldTyped for HashMap<String, T>
where
    T: FieldTyped,
{
    fn field_type() -> FieldType {
        FieldType::map(T::field_type())
    }
}

impl<T> FieldTyped for BTreeMap<String, T>
where
    T: FieldTyped,
{
    fn field_type() -> FieldType {
        FieldType::map(T::field_type())
    }
}
