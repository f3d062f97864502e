/*!
String boundary checks shared by every matcher.

None of these look outside of the buffer they're given. Scans run over an explicit
`[start, end)` range and stop at its edges.
*/

/**
Whether the `"` at `pos` is an unescaped string delimiter.

A quote is unescaped when it's preceded by an even number of consecutive `\`.
Each pair of backslashes escapes itself, so only an odd run escapes the quote.

The byte at `pos` is expected to be a `"`. Returns `false` if `pos` is out of bounds.
*/
#[inline]
pub fn is_unescaped_quote(input: &[u8], pos: usize) -> bool {
    if pos >= input.len() {
        return false;
    }

    test_assert_eq!(b'"', input[pos]);

    let backslashes = input[..pos]
        .iter()
        .rev()
        .take_while(|&&b| b == b'\\')
        .count();

    backslashes % 2 == 0
}

/**
Whether `b` is whitespace that may sit between a key and its `:`.

This is the C `isspace` set, which is a little wider than JSON's own whitespace.
*/
#[inline(always)]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/**
Whether the first non-whitespace byte at or after `from` is a `:`.
*/
#[inline]
pub(crate) fn colon_follows(input: &[u8], from: usize) -> bool {
    input
        .get(from..)
        .and_then(|rest| rest.iter().find(|&&b| !is_space(b)))
        .map_or(false, |&b| b == b':')
}

/**
Find the nearest unescaped `"` strictly before `end`, looking no further back than `floor`.
*/
#[inline]
pub(crate) fn rfind_unescaped_quote(input: &[u8], floor: usize, end: usize) -> Option<usize> {
    let end = end.min(input.len());

    (floor..end)
        .rev()
        .find(|&pos| input[pos] == b'"' && is_unescaped_quote(input, pos))
}
