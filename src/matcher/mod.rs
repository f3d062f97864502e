/*!
Finding keys in JSON buffers.

There are three engines:

- a scalar engine that tracks string state byte by byte,
- a Teddy engine that filters 16 bytes at a time using nibble tables and vector shuffles,
- and a Teddy baseline engine that runs the same filter one position at a time.

The Teddy engines find candidate key endings without knowing whether they're inside a string,
then confirm each candidate by looking at the bytes around it. The scalar engine knows exactly
where strings start and end. For well-formed JSON, and keys that don't contain `,` or `:`, all three
report the same matches. For arbitrary input the scalar engine is the ground truth and the Teddy
engines may report extra matches, but the Teddy engines always agree with each other.
*/

mod baseline;
mod scalar;
mod teddy;
mod verify;

use std::{convert::TryFrom, fmt, str::FromStr};

use crate::{
    compile::{compile, Partition},
    error::{Error, UnknownAlgorithm},
    keys::KeySet,
    sink::{Bounded, Match, Sink},
};

use verify::Verifier;

/**
A matching engine.

The discriminants are the codes used by the C interface.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Algorithm {
    Scalar = 0,
    Teddy = 1,
    TeddyBaseline = 2,
}

impl Algorithm {
    /**
    Whether this engine can run on the current machine.

    Only [`Algorithm::Teddy`] depends on the machine. It needs SSSE3 on x86_64 or NEON on aarch64.
    */
    pub fn is_supported(self) -> bool {
        match self {
            Algorithm::Scalar | Algorithm::TeddyBaseline => true,
            Algorithm::Teddy => teddy::is_supported(),
        }
    }

    /**
    The fastest engine that's supported on the current machine.
    */
    pub fn fastest() -> Self {
        if Algorithm::Teddy.is_supported() {
            Algorithm::Teddy
        } else {
            Algorithm::TeddyBaseline
        }
    }

    /**
    The name the command-line tool reports for this algorithm.
    */
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Scalar => "scalar",
            Algorithm::Teddy => "teddy",
            Algorithm::TeddyBaseline => "teddy-baseline",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u32> for Algorithm {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Algorithm::Scalar),
            1 => Ok(Algorithm::Teddy),
            2 => Ok(Algorithm::TeddyBaseline),
            code => Err(Error::UnknownAlgorithm(UnknownAlgorithm::Code(code))),
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scalar" => Ok(Algorithm::Scalar),
            "teddy" => Ok(Algorithm::Teddy),
            "baseline" | "teddy-baseline" => Ok(Algorithm::TeddyBaseline),
            name => Err(Error::UnknownAlgorithm(UnknownAlgorithm::Name(
                name.to_owned(),
            ))),
        }
    }
}

/**
How a Teddy candidate is confirmed.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verify {
    /**
    Find the string that ends at the candidate and look its content up in a map.
    */
    #[default]
    Span,
    /**
    Compare every key in every group that hit at the candidate.
    */
    Group,
}

/**
Tuning for the Teddy engines.

The scalar engine ignores these.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub partition: Partition,
    pub verify: Verify,
}

/**
Find the offsets of `keys` in `input`.

Matches are written to `out` in the order they appear. The returned count is the total number of
matches found, which may be larger than `out.len()`. In that case only the first `out.len()`
are written.

# Errors

Nothing is written to `out` if an error is returned.

- [`Error::BadArgs`] if `keys` is empty or contains an empty key.
- [`Error::UnsupportedAlgorithm`] if `algorithm` can't run on this machine.
*/
pub fn find_keys<K: AsRef<[u8]>>(
    input: &[u8],
    keys: &[K],
    algorithm: Algorithm,
    out: &mut [Match],
) -> Result<usize, Error> {
    let mut sink = Bounded::new(out);
    find_keys_with(input, keys, algorithm, Options::default(), &mut sink)?;

    Ok(sink.found())
}

/**
Find the offsets of `keys` in `input`, collecting every match.
*/
pub fn find_keys_vec<K: AsRef<[u8]>>(
    input: &[u8],
    keys: &[K],
    algorithm: Algorithm,
) -> Result<Vec<Match>, Error> {
    let mut matches = Vec::new();
    find_keys_with(input, keys, algorithm, Options::default(), &mut matches)?;

    Ok(matches)
}

/**
Find the offsets of `keys` in `input`, pushing each match into `sink`.

This is the general form of [`find_keys`]. The arguments are validated before anything is
pushed, so `sink` is untouched if an error is returned.
*/
pub fn find_keys_with<K: AsRef<[u8]>, S: Sink>(
    input: &[u8],
    keys: &[K],
    algorithm: Algorithm,
    options: Options,
    sink: &mut S,
) -> Result<(), Error> {
    let keys = KeySet::new(keys)?;

    if !algorithm.is_supported() {
        return Err(Error::UnsupportedAlgorithm(algorithm));
    }

    match algorithm {
        Algorithm::Scalar => scalar::scan(input, &keys, sink),
        Algorithm::Teddy => {
            let table = compile(&keys, options.partition);
            let verifier = Verifier::new(input, &keys, &table, options.verify);

            teddy::scan(input, &table, &verifier, sink)
        }
        Algorithm::TeddyBaseline => {
            let table = compile(&keys, options.partition);
            let verifier = Verifier::new(input, &keys, &table, options.verify);

            baseline::scan(input, &table, &verifier, sink)
        }
    }

    Ok(())
}

/**
Find the offsets of a single key in `input`.

This uses the fastest supported engine and reports positions only. The returned count
follows the same rules as [`find_keys`].
*/
pub fn find_key_positions(input: &[u8], key: &[u8], out: &mut [usize]) -> Result<usize, Error> {
    let mut sink = Bounded::new(out);
    find_keys_with(
        input,
        &[key],
        Algorithm::fastest(),
        Options::default(),
        &mut sink,
    )?;

    Ok(sink.found())
}
