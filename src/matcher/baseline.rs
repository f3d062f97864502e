/*!
The Teddy filter, one position at a time.

This runs the same table lookups as the vectorized engine without any vector instructions,
so it's available everywhere and doubles as the oracle for the vectorized engine.
*/

use super::verify::Verifier;

use crate::{compile::CompiledTable, sink::Sink};

pub(super) fn scan(input: &[u8], table: &CompiledTable, verifier: &Verifier, sink: &mut impl Sink) {
    if table.is_empty() {
        return;
    }

    for end in (table.sigma() - 1)..input.len() {
        let hits = table.hits(input, end);

        if hits != 0 {
            verifier.candidate(end, hits, sink);
        }
    }
}
