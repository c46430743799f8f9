//! Basic usage example for shapeguard

use serde_json::json;
use shapeguard::prelude::*;

fn main() {
    let comment = with_recursion(|comment| {
        object_of([
            ("author", string()),
            ("body", string()),
            ("replies", maybe(array_of(comment))),
        ])
    });
    println!("comment type: {}", comment.describe());

    let thread = Value::from(json!({
        "author": "ada",
        "body": "first",
        "replies": [
            { "author": "lin", "body": "second" },
            { "author": "kay", "body": 3 },
        ],
    }));

    match comment.collect(&thread) {
        Ok(()) => println!("✓ thread is valid"),
        Err(rejections) => {
            println!("✗ thread is invalid:");
            for rejection in &rejections {
                println!("  {rejection}");
            }
        }
    }

    let strict_comment = comment.strict();
    let extra = Value::from(json!({ "author": "ada", "body": "hi", "likes": 3 }));
    println!(
        "with an extra key: lenient = {}, strict = {}",
        comment.validate(&extra),
        strict_comment.validate(&extra)
    );
}
