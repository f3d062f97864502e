/*!
A byte-by-byte matcher that tracks string state.

This is the reference engine. It only considers strings that it saw open, so it can't be fooled by
text that merely looks like a key inside some other string.
*/

use crate::{
    keys::KeySet,
    quote::colon_follows,
    sink::{Match, Sink},
};

#[derive(Debug, Default)]
struct Scan {
    in_string: bool,
    escape: bool,
    // the offset of the first byte of the current string's content
    start: usize,
}

pub(super) fn scan(input: &[u8], keys: &KeySet, sink: &mut impl Sink) {
    let mut scan = Scan::default();

    for (offset, &curr) in input.iter().enumerate() {
        if !scan.in_string {
            if curr == b'"' {
                scan.in_string = true;
                scan.escape = false;
                scan.start = offset + 1;
            }

            continue;
        }

        if scan.escape {
            scan.escape = false;
            continue;
        }

        match curr {
            b'\\' => scan.escape = true,
            b'"' => {
                scan.in_string = false;

                if !colon_follows(input, offset + 1) {
                    continue;
                }

                if let Some(key_id) = keys.lookup(&input[scan.start..offset]) {
                    sink.push(Match::new(scan.start, key_id));
                }
            }
            _ => (),
        }
    }
}
