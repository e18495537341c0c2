use dynamodb_change_sink::{
    schema::{Field, FieldType},
    ChangeKind, ChangeRecord, FieldValue, PhysicalSchema,
};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn users_schema() -> PhysicalSchema {
    PhysicalSchema::builder()
        .field(Field::new("userId", FieldType::String))
        .field(Field::new("name", FieldType::String))
        .field(Field::new("age", FieldType::Int))
        .partition_key("userId")
        .build()
        .expect("Failed to build users schema")
}

#[allow(dead_code)]
pub fn user(kind: ChangeKind, user_id: &str, name: &str, age: i32) -> ChangeRecord {
    ChangeRecord::new(
        kind,
        vec![
            FieldValue::from(user_id),
            FieldValue::from(name),
            FieldValue::from(age),
        ],
    )
}

#[macro_export]
macro_rules! assert_err {
    ($cond:expr,) => {
        $crate::assert_err!($cond);
    };
    ($cond:expr) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?})", t);
            },
            Err(e) => e,
        }
    };
    ($cond:expr, $($arg:tt)+) => {
        match $cond {
            Ok(t) => {
                panic!("assertion failed, expected Err(..), got Ok({:?}): {}", t, format_args!($($arg)+));
            },
            Err(e) => e,
        }
    };
}
