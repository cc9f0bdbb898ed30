//! Basic usage example for nebula-schema

use nebula_schema::prelude::*;
use serde_json::json;

fn main() {
    let signup = object! {
        "username" => string().trim().min(3).max(20),
        "email" => string().email(),
        "age" => coerced_int().gte(13).optional(),
        "plan" => enum_of(["free", "pro"].map(String::from)).default(String::from("free")),
    };

    // Valid input: the age string is coerced, the plan filled in
    let input = json!({ "username": "  ada ", "email": "ada@example.com", "age": "36" });
    match signup.parse(input) {
        Ok(user) => println!("✓ parsed: {}", Value::from(user).to_json()),
        Err(e) => println!("✗ Error: {e}"),
    }

    // Invalid input: every failing field is reported
    let input = json!({ "username": "a", "email": "nope", "plan": "enterprise" });
    match signup.parse(input) {
        Ok(_) => println!("✓ unexpectedly valid"),
        Err(e) => {
            println!("✗ {} issues:", e.len());
            print!("{}", e.prettify());
            println!("{:#}", json!(e.flatten()));
        }
    }

    println!("\nnebula-schema is working correctly!");
}
