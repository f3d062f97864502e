use std::{env, fs};

fn main() {
    #![allow(unreachable_code)]

    #[cfg(not(checked))]
    panic!("fuzz tests need to be run in `checked` mode by setting the `FINDKEY_CHECKED` environment variable.");

    // `fuzz_find_keys <file>...` replays saved inputs without afl
    let replay: Vec<_> = env::args_os().skip(1).collect();
    if !replay.is_empty() {
        for path in replay {
            println!("replay: {:?}", path);

            let input = fs::read(&path).unwrap_or_else(|e| panic!("failed to read {:?}: {}", path, e));
            fuzz_find_keys::find(&input);
        }

        return;
    }

    #[cfg(not(feature = "afl"))]
    panic!("fuzz tests need to be run with the `afl` Cargo feature, or given input files to replay.");

    #[cfg(feature = "afl")]
    afl::fuzz!(|input: &[u8]| { fuzz_find_keys::find(input) });
}
