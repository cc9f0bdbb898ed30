//! Parse throughput for leaf, container and failing inputs.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nebula_schema::prelude::*;

fn user_schema() -> ObjectSchema {
    object! {
        "id" => string().uuid(),
        "name" => string().trim().min(1).max(64),
        "email" => string().email(),
        "age" => int().non_negative().optional(),
        "tags" => slice(string()).max(8),
    }
}

fn user_input() -> Value {
    Value::object([
        ("id", Value::from("123e4567-e89b-12d3-a456-426614174000")),
        ("name", Value::from("  Ada Lovelace ")),
        ("email", Value::from("ada@example.com")),
        ("age", Value::from(36_i64)),
        ("tags", Value::array(["math", "engines"])),
    ])
}

// ============================================================================
// Leaf schemas
// ============================================================================

fn bench_leaf(c: &mut Criterion) {
    let name = string().min(1).max(64);
    c.bench_function("string_bounded_ok", |b| {
        b.iter(|| black_box(name.parse(black_box("ada"))))
    });

    let port = coerced_uint16();
    c.bench_function("uint16_coerced", |b| {
        b.iter(|| black_box(port.parse(black_box("8080"))))
    });

    let email = string().email();
    c.bench_function("string_email", |b| {
        b.iter(|| black_box(email.parse(black_box("ada@example.com"))))
    });
}

// ============================================================================
// Containers
// ============================================================================

fn bench_object(c: &mut Criterion) {
    let schema = user_schema();
    let input = user_input();
    c.bench_function("object_user_ok", |b| {
        b.iter(|| black_box(schema.parse(black_box(input.clone()))))
    });

    let bad = Value::object([
        ("id", Value::from("x")),
        ("name", Value::from("")),
        ("email", Value::from("nope")),
        ("tags", Value::from(1_i64)),
    ]);
    c.bench_function("object_user_four_issues", |b| {
        b.iter(|| black_box(schema.parse(black_box(bad.clone()))))
    });
}

fn bench_union(c: &mut Criterion) {
    let id = union![string().uuid(), int().positive(), literal(String::from("self"))];
    c.bench_function("union_last_option", |b| {
        b.iter(|| black_box(id.parse(black_box("self"))))
    });

    let event = discriminated_union(
        "type",
        vec![
            object! { "type" => literal(String::from("click")), "x" => int(), "y" => int() },
            object! { "type" => literal(String::from("key")), "code" => string() },
        ],
    );
    let input = Value::object([("type", "key"), ("code", "Enter")]);
    c.bench_function("discriminated_dispatch", |b| {
        b.iter(|| black_box(event.parse(black_box(input.clone()))))
    });
}

fn bench_errors(c: &mut Criterion) {
    let err = user_schema()
        .parse(Value::object([("id", 1_i64)]))
        .unwrap_err();
    c.bench_function("error_flatten", |b| b.iter(|| black_box(err.flatten())));
    c.bench_function("error_prettify", |b| b.iter(|| black_box(err.prettify())));
}

criterion_group!(benches, bench_leaf, bench_object, bench_union, bench_errors);
criterion_main!(benches);
