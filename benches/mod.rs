#![cfg(unstable)]
#![feature(test)]
extern crate test;

use findkey::{compile, find_keys, Algorithm, KeySet, Match, Partition};

use std::str;

const EVENT_KEYS: &[&str] = &["@t", "@mt", "@l", "StatusCode", "RequestId", "id", "name"];

fn events(count: usize) -> Vec<u8> {
    let event = include_bytes!("../cases/log_event.json");

    let mut input = Vec::with_capacity((event.len() + 1) * count);
    for _ in 0..count {
        input.extend_from_slice(event.trim_ascii_end());
        input.push(b'\n');
    }

    input
}

fn bench_find(b: &mut test::Bencher, input: &[u8], keys: &[&str], algorithm: Algorithm) {
    if !algorithm.is_supported() {
        return;
    }

    let mut out = vec![Match::default(); 1024 * 1024];

    b.bytes = input.len() as u64;
    b.iter(|| find_keys(input, keys, algorithm, &mut out).unwrap())
}

#[bench]
fn find_log_event_scalar(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    bench_find(b, input, EVENT_KEYS, Algorithm::Scalar)
}

#[bench]
fn find_log_event_teddy(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    bench_find(b, input, EVENT_KEYS, Algorithm::Teddy)
}

#[bench]
fn find_log_event_baseline(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    bench_find(b, input, EVENT_KEYS, Algorithm::TeddyBaseline)
}

#[bench]
fn find_1k_log_events_scalar(b: &mut test::Bencher) {
    let input = events(1000);

    bench_find(b, &input, EVENT_KEYS, Algorithm::Scalar)
}

#[bench]
fn find_1k_log_events_teddy(b: &mut test::Bencher) {
    let input = events(1000);

    bench_find(b, &input, EVENT_KEYS, Algorithm::Teddy)
}

#[bench]
fn find_1k_log_events_baseline(b: &mut test::Bencher) {
    let input = events(1000);

    bench_find(b, &input, EVENT_KEYS, Algorithm::TeddyBaseline)
}

#[bench]
fn find_1k_log_events_single_long_key_teddy(b: &mut test::Bencher) {
    let input = events(1000);

    bench_find(b, &input, &["SourceContext"], Algorithm::Teddy)
}

#[bench]
fn find_pretty_orders_teddy(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/pretty_orders.json");

    bench_find(
        b,
        input,
        &["id", "user_id", "name", "created_at", "tags"],
        Algorithm::Teddy,
    )
}

#[bench]
fn compile_500_keys_merge(b: &mut test::Bencher) {
    let keys: Vec<String> = (0..500).map(|i| format!("field_{}", i)).collect();
    let keys = KeySet::new(&keys).unwrap();

    b.iter(|| compile(&keys, Partition::Merge))
}

#[bench]
fn compile_500_keys_bucket(b: &mut test::Bencher) {
    let keys: Vec<String> = (0..500).map(|i| format!("field_{}", i)).collect();
    let keys = KeySet::new(&keys).unwrap();

    b.iter(|| compile(&keys, Partition::Bucket))
}

#[bench]
fn read_log_event_value_serde_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: serde_json::Value = serde_json::from_slice(input).unwrap();
        v
    })
}

#[bench]
fn read_log_event_value_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let v: json::JsonValue = json::parse(str::from_utf8(input).unwrap()).unwrap();
        v
    })
}

#[bench]
fn read_log_event_value_simd_json(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| {
        let mut input = input.to_vec();
        let v = simd_json::to_borrowed_value(&mut input).unwrap();
        test::black_box(v);
    })
}

#[bench]
fn read_log_event_validate_utf8(b: &mut test::Bencher) {
    let input = include_bytes!("../cases/log_event.json");

    b.bytes = input.len() as u64;
    b.iter(|| str::from_utf8(input).is_ok())
}
