use dynamodb_change_sink::ChangeRow;

#[derive(Debug, ChangeRow)]
struct User {
    #[partition_key]
    email: String,
    name: Option<String>,
}

fn main() {
    let schema = User::physical_schema().unwrap();
    assert_eq!(schema.len(), 2);
}
