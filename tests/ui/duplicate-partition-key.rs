#![allow(dead_code)]

use dynamodb_change_sink::ChangeRow;

#[derive(ChangeRow)]
struct User {
    #[partition_key] email: String,
    #[partition_key] name: String,
}

fn main() {}
