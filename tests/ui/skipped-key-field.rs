#![allow(dead_code)]

use dynamodb_change_sink::ChangeRow;

#[derive(ChangeRow)]
struct User {
    #[partition_key] #[change_sink(skip)] email: String,
    name: String,
}

fn main() {}
