#![allow(dead_code)]

use dynamodb_change_sink::ChangeRow;

#[derive(ChangeRow)]
struct User {
    email: String,
    name: String,
}

fn main() {}
