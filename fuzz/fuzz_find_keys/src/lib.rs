use findkey::{find_keys_vec, find_keys_with, parse_key_list, Algorithm, Options, Partition, Verify};

const DEFAULT_KEYS: &[&[u8]] = &[b"a", b"id", b"name", b"\\", b"k\\\""];

/**
Split fuzz input into a key list and a document.

Everything before the first `0` byte is a newline-separated key list. If there's no `0`,
or the list is empty, some default keys are used and the whole input is the document.
*/
fn split(input: &[u8]) -> (Vec<Vec<u8>>, &[u8]) {
    if let Some(split) = input.iter().position(|&b| b == 0) {
        if let Ok(keys) = parse_key_list(&input[..split]) {
            return (keys, &input[split + 1..]);
        }
    }

    (
        DEFAULT_KEYS.iter().map(|key| key.to_vec()).collect(),
        input,
    )
}

pub fn find(input: &[u8]) {
    let (keys, data) = split(input);

    // Make sure we don't panic when searching
    let scalar = find_keys_vec(data, &keys, Algorithm::Scalar).expect("failed to search");
    let baseline = find_keys_vec(data, &keys, Algorithm::TeddyBaseline).expect("failed to search");

    // The Teddy engines must always agree with each other
    if Algorithm::Teddy.is_supported() {
        let teddy = find_keys_vec(data, &keys, Algorithm::Teddy).expect("failed to search");

        assert_eq!(baseline, teddy);
    }

    for partition in [Partition::Merge, Partition::Bucket] {
        for verify in [Verify::Span, Verify::Group] {
            let mut matches = Vec::new();
            find_keys_with(
                data,
                &keys,
                Algorithm::TeddyBaseline,
                Options { partition, verify },
                &mut matches,
            )
            .expect("failed to search");

            assert_eq!(baseline, matches);
        }
    }

    // If the input is a valid document then every engine must agree
    let plain_keys = keys
        .iter()
        .all(|key| !key.contains(&b',') && !key.contains(&b':'));

    if plain_keys && serde_json::from_slice::<serde_json::Value>(data).is_ok() {
        assert_eq!(scalar, baseline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{fs, io::Read};

    #[test]
    fn inputs() {
        if let Ok(inputs) = fs::read_dir("../in") {
            for input in inputs {
                let input = input.expect("invalid file").path();

                println!("input: {:?}", input);

                let mut f = fs::File::open(input).expect("failed to open");
                let mut input = Vec::new();
                f.read_to_end(&mut input).expect("failed to read file");

                find(&input);
            }
        }
    }

    #[test]
    fn crashes() {
        if let Ok(crashes) = fs::read_dir("../../target/fuzz_find_keys/crashes") {
            for crash in crashes {
                let crash = crash.expect("invalid file").path();

                println!("repro: {:?}", crash);

                let mut f = fs::File::open(crash).expect("failed to open");
                let mut crash = Vec::new();
                f.read_to_end(&mut crash).expect("failed to read file");

                find(&crash);
            }
        }
    }

    #[test]
    fn split_keys_from_document() {
        let (keys, data) = split(b"a\nbb\0{\"a\":1}");

        assert_eq!(vec![b"a".to_vec(), b"bb".to_vec()], keys);
        assert_eq!(b"{\"a\":1}", data);

        find(b"a\nbb\0{\"a\":1,\"bb\":[2]}");
        find(b"{\"id\":1}");
    }
}
