/*!
Confirming Teddy candidates.

A candidate is a position where some key in a hit group could end. It still needs
to be the content of a string that's immediately followed by a `:`.
*/

use super::Verify;

use crate::{
    compile::CompiledTable,
    keys::KeySet,
    quote::{colon_follows, is_unescaped_quote, rfind_unescaped_quote},
    sink::{Match, Sink},
};

/**
Everything needed to confirm candidates in a single input.

Both Teddy engines share this, so they report exactly the same matches for the same candidates.
*/
pub(super) struct Verifier<'a, 'k> {
    input: &'a [u8],
    keys: &'a KeySet<'k>,
    table: &'a CompiledTable,
    strategy: Verify,
}

impl<'a, 'k> Verifier<'a, 'k> {
    pub(super) fn new(
        input: &'a [u8],
        keys: &'a KeySet<'k>,
        table: &'a CompiledTable,
        strategy: Verify,
    ) -> Self {
        Verifier {
            input,
            keys,
            table,
            strategy,
        }
    }

    /**
    Confirm a candidate key ending at `end` (inclusive) for the groups in `hits`.
    */
    #[inline]
    pub(super) fn candidate(&self, end: usize, hits: u8, sink: &mut impl Sink) {
        test_assert!(hits != 0);
        test_assert!(end < self.input.len());

        match self.strategy {
            Verify::Span => self.span(end, sink),
            Verify::Group => self.group(end, hits, sink),
        }
    }

    fn span(&self, end: usize, sink: &mut impl Sink) {
        let input = self.input;
        let close = end + 1;

        if input.get(close) != Some(&b'"') || !is_unescaped_quote(input, close) {
            return;
        }

        if !colon_follows(input, close + 1) {
            return;
        }

        let floor = close.saturating_sub(self.keys.max_len() + 1);

        let open = match rfind_unescaped_quote(input, floor, close) {
            Some(open) => open,
            None => return,
        };

        if let Some(key_id) = self.keys.lookup(&input[open + 1..close]) {
            sink.push(Match::new(open + 1, key_id));
        }
    }

    fn group(&self, end: usize, mut hits: u8, sink: &mut impl Sink) {
        let input = self.input;
        let close = end + 1;

        if input.get(close) != Some(&b'"') || !is_unescaped_quote(input, close) {
            return;
        }

        let groups = self.table.groups();

        while hits != 0 {
            let group = hits.trailing_zeros() as usize;
            hits &= hits - 1;

            for &key_id in &groups[group] {
                let key = self.keys.key(key_id);

                // there must be room for the key and its opening quote
                let start = match close.checked_sub(key.len()) {
                    Some(start) if start > 0 => start,
                    _ => continue,
                };

                let open = start - 1;

                if input[open] != b'"' || !is_unescaped_quote(input, open) {
                    continue;
                }

                if &input[start..close] != key || !colon_follows(input, close + 1) {
                    continue;
                }

                sink.push(Match::new(start, key_id));
            }
        }
    }
}
