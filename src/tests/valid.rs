use super::*;

use crate::{find_key_positions, find_keys, Bounded, Error, Sink};

fn m(position: usize, key_id: u32) -> Match {
    Match::new(position, key_id)
}

#[test]
fn find_cases() {
    for (input, keys) in [
        (
            include_bytes!("../../cases/log_event.json") as &[u8],
            &[
                "@t",
                "@mt",
                "@l",
                "@x",
                "StatusCode",
                "Elapsed",
                "RequestId",
                "id",
                "name",
                "tags",
            ] as &[&str],
        ),
        (
            include_bytes!("../../cases/pretty_orders.json") as &[u8],
            &["id", "user_id", "name", "created_at", "tags", "qty", "count"] as &[&str],
        ),
        (
            include_bytes!("../../cases/escapes.json") as &[u8],
            &["a", "b", "c", "été", "path", "quote", "a b"] as &[&str],
        ),
    ] {
        let expected: Value = serde_json::from_slice(input).unwrap();

        let matches = find_all(input, keys);

        assert_counts(&expected, keys, &matches);
        assert_spans(input, keys, &matches);

        test_alignment(input, 16, |shifted, shift| {
            let shifted_matches: Vec<Match> = find_all(shifted, keys)
                .into_iter()
                .map(|m| Match::new(m.position - shift, m.key_id))
                .collect();

            assert_eq!(matches, shifted_matches);
        });
    }
}

#[test]
fn find_generated() {
    // debug builds are slow, so just run a handful of cases
    let iterations = {
        #[cfg(debug)]
        {
            200
        }

        #[cfg(not(debug))]
        {
            2000
        }
    };

    for _ in 0..iterations {
        // Random documents use keys from a small vocabulary in objects and
        // in string values, with whitespace and escapes sprinkled around.
        // The parsed document tells us how many times each key is really used
        let input = some::json_document();
        let keys = some::key_list();

        let expected: Value = serde_json::from_str(&input)
            .unwrap_or_else(|e| panic!("generated invalid JSON ({}): {:?}", e, input));

        let matches = find_all(input.as_bytes(), &keys);

        assert_counts(&expected, &keys, &matches);
        assert_spans(input.as_bytes(), &keys, &matches);

        // the same document printed differently finds the same number of keys
        let pretty = serde_json::to_string_pretty(&expected).unwrap();
        let pretty_matches = find_all(pretty.as_bytes(), &keys);

        assert_counts(&expected, &keys, &pretty_matches);
    }
}

#[test]
fn find_repeated_keys_in_order() {
    let input = b"{\"a\":1,\"bb\":2,\"a\":3}";

    assert_eq!(
        vec![m(2, 0), m(8, 1), m(15, 0)],
        find_all(input, &["a", "bb"])
    );
}

#[test]
fn find_ignores_keys_inside_strings() {
    let input = br#"{"x":"not:a:key\"y\":1"}"#;

    assert!(find_all(input, &["y"]).is_empty());
    assert_eq!(vec![m(2, 0)], find_all(input, &["x", "y"]));
}

#[test]
fn find_requires_colon() {
    let input = br#"{"a":"a","b":["a","b"],"c":{"a" : "b"}}"#;

    assert_eq!(vec![m(2, 0), m(29, 0)], find_all(input, &["a"]));
    assert_eq!(vec![m(10, 0)], find_all(input, &["b"]));
}

#[test]
fn find_whitespace_before_colon() {
    let input = b"{\"a\" \t\r\n\x0b\x0c: 1}";

    assert_eq!(vec![m(2, 0)], find_all(input, &["a"]));
}

#[test]
fn find_duplicate_keys_report_first_id() {
    let input = br#"{"a":1,"b":2}"#;

    assert_eq!(
        vec![m(2, 0), m(8, 1)],
        find_all(input, &["a", "b", "a", "b"])
    );
}

#[test]
fn find_key_after_escaped_backslash() {
    // the key is `a\\`, so the quote that follows it isn't escaped
    let input = br#"{"a\\":1,"b\"":2}"#;

    assert_eq!(vec![m(2, 0)], find_all(input, &[r"a\\"]));
    assert_eq!(vec![m(10, 0)], find_all(input, &[r#"b\""#]));
}

#[test]
fn find_short_and_long_keys() {
    let long = "k".repeat(40);
    let input = format!(r#"{{"a":1,"{}":2,"ab":[{{"a":3}}]}}"#, long);

    assert_eq!(
        vec![m(2, 0), m(8, 1), m(53, 2), m(60, 0)],
        find_all(input.as_bytes(), &["a", long.as_str(), "ab"])
    );
}

#[test]
fn find_long_key_reports_first_key_byte() {
    for len in [15, 16, 17, 31, 32, 40, 100] {
        let long = "k".repeat(len);
        let input = format!(r#"{{"a":1,"{}":2}}"#, long);

        let quote = input.find(&format!("\"{}", long)).unwrap();

        assert_eq!(
            vec![m(2, 0), m(quote + 1, 1)],
            find_all(input.as_bytes(), &["a", long.as_str()]),
            "{}",
            len
        );
    }
}

#[test]
fn find_keys_across_window_boundaries() {
    for key in ["k", "ke", "key", "a_key_longer_than_a_window"] {
        for pad in 0..40 {
            let input = format!("{}{{\"{}\":1}}", " ".repeat(pad), key);

            assert_eq!(
                vec![m(pad + 2, 0)],
                find_all(input.as_bytes(), &[key]),
                "{:?} at {}",
                key,
                pad
            );
        }
    }
}

#[test]
fn find_at_the_end_of_input() {
    // the key ends right at the last byte, so there's no closing quote
    assert!(find_all(b"{\"key", &["key"]).is_empty());
    assert!(find_all(b"{\"key\"", &["key"]).is_empty());
    assert!(find_all(b"{\"key\" ", &["key"]).is_empty());
    assert_eq!(vec![m(2, 0)], find_all(b"{\"key\":", &["key"]));
}

#[test]
fn find_in_empty_input() {
    assert!(find_all(b"", &["a"]).is_empty());
    assert!(find_all(b"{}", &["a"]).is_empty());
}

#[test]
fn find_unmatchable_key() {
    // a key with an unescaped quote can never be the content of a string
    let input = br#"{"a":1,"a"b":2}"#;

    assert!(find_all(input, &[r#"a"b"#]).is_empty());
    assert_eq!(vec![m(2, 1)], find_all(input, &[r#"a"b"#, "a"]));
}

#[test]
fn find_many_keys() {
    let keys: Vec<String> = (0..500).map(|i| format!("field_{}", i)).collect();

    let mut input = String::from("{");
    for (i, key) in keys.iter().enumerate().rev().step_by(7) {
        input.push_str(&format!("\"{}\":{},", key, i));
    }
    input.push_str("\"other\":null}");

    let expected: Value = serde_json::from_str(&input).unwrap();
    let matches = find_all(input.as_bytes(), &keys);

    assert_eq!(72, matches.len());
    assert_counts(&expected, &keys, &matches);
    assert_spans(input.as_bytes(), &keys, &matches);
}

#[test]
fn find_truncates_but_counts_everything() {
    let input = br#"{"a":1,"bb":2,"a":3}"#;

    for algorithm in [Algorithm::Scalar, Algorithm::TeddyBaseline] {
        let mut out = [Match::default(); 2];

        assert_eq!(3, find_keys(input, &["a", "bb"], algorithm, &mut out).unwrap());
        assert_eq!([m(2, 0), m(8, 1)], out);

        let mut out: [Match; 0] = [];

        assert_eq!(3, find_keys(input, &["a", "bb"], algorithm, &mut out).unwrap());
    }
}

#[test]
fn find_with_bounded_sink() {
    let input = br#"{"a":1,"bb":2,"a":3}"#;

    let mut out = [Match::default(); 1];
    let mut sink = Bounded::new(&mut out);

    find_keys_with(
        input,
        &["a", "bb"],
        Algorithm::TeddyBaseline,
        Options::default(),
        &mut sink,
    )
    .unwrap();

    assert_eq!(3, sink.found());
    assert!(sink.is_truncated());
    assert_eq!(&[m(2, 0)], sink.as_slice());
}

#[test]
fn find_with_custom_sink() {
    #[derive(Default)]
    struct Count(usize);

    impl Sink for Count {
        fn push(&mut self, _: Match) {
            self.0 += 1;
        }
    }

    let mut count = Count::default();

    find_keys_with(
        br#"{"a":{"a":{"a":1}}}"#,
        &["a"],
        Algorithm::Scalar,
        Options::default(),
        &mut count,
    )
    .unwrap();

    assert_eq!(3, count.0);
}

#[test]
fn find_single_key_positions() {
    let input = br#"{"id":1,"ids":[{"id":2}],"x":"id"}"#;

    let mut out = [0usize; 1];

    assert_eq!(2, find_key_positions(input, b"id", &mut out).unwrap());
    assert_eq!([2], out);

    let mut out = [0usize; 4];

    assert_eq!(2, find_key_positions(input, b"id", &mut out).unwrap());
    assert_eq!(&[2, 17], &out[..2]);
}

#[test]
fn find_teddy_when_supported() {
    let input = br#"{"a":1,"bb":2,"a":3}"#;
    let mut out = [Match::default(); 4];

    match find_keys(input, &["a", "bb"], Algorithm::Teddy, &mut out) {
        Ok(found) => {
            assert!(Algorithm::Teddy.is_supported());
            assert_eq!(3, found);
            assert_eq!(&[m(2, 0), m(8, 1), m(15, 0)], &out[..3]);
        }
        Err(err) => {
            assert!(!Algorithm::Teddy.is_supported());
            assert_eq!(Error::UnsupportedAlgorithm(Algorithm::Teddy), err);
        }
    }
}
