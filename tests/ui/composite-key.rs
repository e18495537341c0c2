use dynamodb_change_sink::{ChangeKind, ChangeRow};
use std::collections::BTreeMap;

#[derive(ChangeRow)]
struct Reading {
    #[partition_key]
    #[change_sink(rename = "sensorId")]
    sensor_id: String,
    #[sort_key]
    at: i64,
    labels: BTreeMap<String, String>,
    #[change_sink(skip)]
    _scratch: Vec<f32>,
}

fn main() {
    let record = Reading {
        sensor_id: "s1".to_string(),
        at: 1_700_000_000,
        labels: BTreeMap::new(),
        _scratch: vec![],
    }
    .into_change_record(ChangeKind::UpdateAfter);

    assert_eq!(record.arity(), 3);
}
