/*!
# `findkey`

Find the offsets of a set of keys in JSON documents, without parsing them.

Given a buffer and a list of literal keys, [`find_keys`] reports every place one of those keys
appears as an object key: the content of a string that's followed by a `:`. Each match is
the offset of the key's first byte along with the index of the key in the list.

```
use findkey::{find_keys_vec, Algorithm, Match};

let input = br#"{"a":1,"bb":2,"a":3}"#;

let matches = find_keys_vec(input, &["a", "bb"], Algorithm::Scalar)?;

assert_eq!(
    vec![Match::new(2, 0), Match::new(8, 1), Match::new(15, 0)],
    matches
);
# Ok::<(), findkey::Error>(())
```

## Engines

- [`Algorithm::Scalar`] walks the input byte by byte, tracking whether it's inside a string.
- [`Algorithm::Teddy`] uses SSSE3 or NEON to filter 16 bytes at a time for positions where
some key could end, then verifies each candidate.
- [`Algorithm::TeddyBaseline`] runs the same filter as `Teddy` one position at a time.
It's available everywhere.

For valid JSON, and keys that don't contain `,` or `:`, all three engines report the same matches.

## ⚠️ CAREFUL

The vectorized engine contains unsafe code and is performance sensitive. Any changes
need to be carefully considered and should be:

- tested against the benchmarks to make sure we don't regress (at least not accidentally).
- fuzz tested against the baseline engine, which must always agree with it.
*/

#![allow(clippy::missing_safety_doc, clippy::needless_range_loop)]

#[macro_use]
mod macros;

mod error;
mod matcher;
mod quote;
mod sink;
mod std_ext;

pub mod compile;
pub mod ffi;
pub mod keys;

#[cfg(wasm)]
pub mod wasm;

pub use self::{
    compile::{compile, CompiledTable, Partition},
    error::{BadArgs, Error, Status, UnknownAlgorithm},
    keys::{parse_key_list, read_key_list, KeyId, KeySet},
    matcher::{
        find_key_positions, find_keys, find_keys_vec, find_keys_with, Algorithm, Options, Verify,
    },
    quote::is_unescaped_quote,
    sink::{Bounded, Match, Sink, Slot},
};
