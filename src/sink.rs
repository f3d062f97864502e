/*!
Destinations for matches.

Matchers push every match they find into a [`Sink`]. A [`Bounded`] sink writes into a
caller-owned buffer and keeps counting once it's full, so the total is always exact even
when the reported results are truncated.
*/

use crate::keys::KeyId;

/**
A key found in the input.

`position` is the offset of the first byte of the key's text, one past its opening quote.

This type is `#[repr(C)]` so it can be written directly into C result buffers.
*/
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Match {
    pub position: usize,
    pub key_id: KeyId,
}

impl Match {
    #[inline]
    pub fn new(position: usize, key_id: KeyId) -> Self {
        Match { position, key_id }
    }

    /**
    Convert this match into a JSON object with `position` and `key_id` fields.
    */
    #[cfg(feature = "serde_json")]
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "position": self.position,
            "key_id": self.key_id,
        })
    }
}

/**
Somewhere to put matches as they're found.

Matches are pushed in the order they appear in the input.
*/
pub trait Sink {
    fn push(&mut self, m: Match);
}

impl Sink for Vec<Match> {
    #[inline]
    fn push(&mut self, m: Match) {
        Vec::push(self, m);
    }
}

/**
A value that can be written into a [`Bounded`] sink.
*/
pub trait Slot: Copy {
    fn from_match(m: Match) -> Self;
}

impl Slot for Match {
    #[inline]
    fn from_match(m: Match) -> Self {
        m
    }
}

/**
Only the position of a match, used when there's a single key.
*/
impl Slot for usize {
    #[inline]
    fn from_match(m: Match) -> Self {
        m.position
    }
}

/**
A sink that writes into a fixed-capacity buffer.

Writing stops at capacity but counting doesn't, so [`Bounded::found`] can be larger
than [`Bounded::written`]. That's not an error, it just means the results were truncated.
*/
#[derive(Debug)]
pub struct Bounded<'out, T: Slot = Match> {
    out: &'out mut [T],
    found: usize,
}

impl<'out, T: Slot> Bounded<'out, T> {
    #[inline]
    pub fn new(out: &'out mut [T]) -> Self {
        Bounded { out, found: 0 }
    }

    /**
    The total number of matches pushed, including any that didn't fit.
    */
    #[inline]
    pub fn found(&self) -> usize {
        self.found
    }

    /**
    The number of matches actually written.
    */
    #[inline]
    pub fn written(&self) -> usize {
        self.found.min(self.out.len())
    }

    /**
    Whether some matches were counted but not written.
    */
    #[inline]
    pub fn is_truncated(&self) -> bool {
        self.found > self.out.len()
    }

    /**
    The matches written so far.
    */
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.out[..self.written()]
    }
}

impl<'out, T: Slot> Sink for Bounded<'out, T> {
    #[inline]
    fn push(&mut self, m: Match) {
        if let Some(slot) = self.out.get_mut(self.found) {
            *slot = T::from_match(m);
        }

        self.found += 1;
    }
}
