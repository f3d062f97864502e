/*!
The set of keys to search for.

Keys are literal byte strings identified by their index in the caller's list.
Two keys with the same bytes collapse into the first one, so every match of that
content reports the first identifier.
*/

use std::{
    collections::{hash_map::Entry, HashMap},
    convert::TryFrom,
    fs, io,
    path::Path,
};

use crate::error::{BadArgs, Error};

/**
The identifier of a key: its index in the caller-supplied list.
*/
pub type KeyId = u32;

/**
A validated, borrowed key list.

Construction is the only place key preconditions are checked. Every matcher
can assume there's at least one key and no key is empty.
*/
#[derive(Debug, Clone)]
pub struct KeySet<'k> {
    keys: Vec<&'k [u8]>,
    lookup: HashMap<&'k [u8], KeyId>,
    unique: Vec<KeyId>,
    max_len: usize,
}

impl<'k> KeySet<'k> {
    /**
    Validate a key list.

    The list must be non-empty and none of its keys may be empty.
    */
    pub fn new<K: AsRef<[u8]>>(keys: &'k [K]) -> Result<Self, Error> {
        if keys.is_empty() {
            return Err(BadArgs::NoKeys.into());
        }

        if KeyId::try_from(keys.len()).is_err() {
            return Err(BadArgs::TooManyKeys.into());
        }

        let mut set = KeySet {
            keys: Vec::with_capacity(keys.len()),
            lookup: HashMap::with_capacity(keys.len()),
            unique: Vec::with_capacity(keys.len()),
            max_len: 0,
        };

        for (key_id, key) in keys.iter().enumerate() {
            let key = key.as_ref();

            if key.is_empty() {
                return Err(BadArgs::EmptyKey { key_id }.into());
            }

            let key_id = key_id as KeyId;

            set.keys.push(key);
            set.max_len = set.max_len.max(key.len());

            if let Entry::Vacant(entry) = set.lookup.entry(key) {
                entry.insert(key_id);
                set.unique.push(key_id);
            }
        }

        Ok(set)
    }

    /**
    The number of keys in the original list, including duplicates.
    */
    #[inline]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /**
    Always `false`, a key set is never empty.
    */
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /**
    The bytes of the key with the given identifier.
    */
    #[inline]
    pub fn key(&self, key_id: KeyId) -> &'k [u8] {
        self.keys[key_id as usize]
    }

    /**
    The identifier reported for a span of content, if it's one of the keys.
    */
    #[inline]
    pub fn lookup(&self, content: &[u8]) -> Option<KeyId> {
        self.lookup.get(content).copied()
    }

    /**
    The identifiers of the first occurrence of each distinct key, ascending.
    */
    #[inline]
    pub fn unique(&self) -> &[KeyId] {
        &self.unique
    }

    /**
    The length of the longest key.
    */
    #[inline]
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /**
    Whether a key could ever be the content of a JSON string.

    Keys containing an unescaped `"` can't be, because that quote would end the string.
    The byte before a key's content is always its opening quote, so any backslash run
    that could escape a quote in the key lies entirely within the key.
    */
    pub fn is_matchable(key: &[u8]) -> bool {
        let mut escape = false;

        for &b in key {
            match b {
                _ if escape => escape = false,
                b'\\' => escape = true,
                b'"' => return false,
                _ => (),
            }
        }

        true
    }
}

/**
Parse a newline-separated list of literal keys.

A trailing `\r` is stripped from each line and empty lines are skipped.
The list is rejected if no keys remain.
*/
pub fn parse_key_list(input: &[u8]) -> Result<Vec<Vec<u8>>, Error> {
    let keys: Vec<Vec<u8>> = input
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| line.to_vec())
        .collect();

    if keys.is_empty() {
        return Err(BadArgs::NoKeys.into());
    }

    Ok(keys)
}

/**
Read a newline-separated list of literal keys from a file.

See [`parse_key_list`] for the format. An empty list is reported as [`io::ErrorKind::InvalidData`].
*/
pub fn read_key_list(path: impl AsRef<Path>) -> io::Result<Vec<Vec<u8>>> {
    let input = fs::read(path)?;

    parse_key_list(&input).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
