use std::hint::black_box;
use std::time::{Duration, Instant};

use nested_qs::{Object, Value};

fn address() -> Object {
    [
        ("city", "Carrot City"),
        ("street", "Main Street"),
        ("postcode", "12345"),
    ]
    .into_iter()
    .collect()
}

fn query_params() -> Value {
    let params: Object = [
        ("id", Value::from(42)),
        ("name", Value::from("Acme")),
        ("phone", Value::from(12345)),
        ("address", Value::from(address())),
        ("user_ids", Value::from(vec![1, 2, 3, 4])),
    ]
    .into_iter()
    .collect();
    params.into()
}

const QUERY: &str = "id=42&name=Acme&phone=12345&address[city]=Carrot%20City&\
                     address[street]=Main%20Street&address[postcode]=12345&\
                     user_ids[]=1&user_ids[]=2&user_ids[]=3&user_ids[]=4";

fn main() {
    let profile_duration = Duration::from_secs(30);
    println!("Profiling for {:?}...", profile_duration);

    match std::env::args().nth(1).as_deref() {
        Some("stringify") => profile_stringify(profile_duration),
        Some("parse") => profile_parse(profile_duration),
        Some("mixed") => profile_mixed(profile_duration),
        _ => {
            println!("Usage: cargo run --release --example profile [stringify|parse|mixed]");
            println!("Defaulting to mixed workload...");
            profile_mixed(profile_duration);
        }
    }
}

fn report(label: &str, count: u64, start: Instant) {
    let elapsed = start.elapsed();
    println!(
        "{label}: {count} iterations in {elapsed:?} ({:.0} ops/sec)",
        count as f64 / elapsed.as_secs_f64()
    );
}

fn profile_stringify(duration: Duration) {
    let data = query_params();
    let start = Instant::now();
    let mut count = 0u64;

    while start.elapsed() < duration {
        // Run in batches to reduce timing overhead
        for _ in 0..1000 {
            let _ = nested_qs::stringify(black_box(&data)).unwrap();
            count += 1;
        }
    }
    report("stringify", count, start);
}

fn profile_parse(duration: Duration) {
    let start = Instant::now();
    let mut count = 0u64;

    while start.elapsed() < duration {
        for _ in 0..1000 {
            let _ = nested_qs::parse(black_box(QUERY));
            count += 1;
        }
    }
    report("parse", count, start);
}

fn profile_mixed(duration: Duration) {
    let data = query_params();
    let start = Instant::now();
    let mut count = 0u64;

    while start.elapsed() < duration {
        for _ in 0..1000 {
            let qs = nested_qs::stringify(black_box(&data)).unwrap();
            let _ = nested_qs::parse(black_box(&qs));
            count += 1;
        }
    }
    report("stringify + parse", count, start);
}
