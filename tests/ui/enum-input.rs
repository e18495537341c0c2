#![allow(dead_code)]

use dynamodb_change_sink::ChangeRow;

#[derive(ChangeRow)]
enum Kind {
    Insert,
    Delete,
}

fn main() {}
