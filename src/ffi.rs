/*!
A C interface to the matchers.

```c
typedef struct findkey_result {
    size_t position;
    uint32_t key_id;
} findkey_result;

size_t findkey(const uint8_t *data, size_t len,
               const uint8_t *const *keys, const size_t *key_lens, size_t num_keys,
               uint32_t algo,
               findkey_result *out_results, size_t max_out,
               int32_t *out_status);
```

Every function returns the total number of matches found and writes at most `max_out` of them.
If `out_status` isn't null it receives one of the [`Status`] codes. On any error the return
value is `0` and `out_results` is untouched.
*/

use std::{convert::TryFrom, slice};

use crate::{
    error::{BadArgs, Error, Status},
    matcher::{find_key_positions, find_keys, Algorithm},
    sink::Match,
};

/**
A single match, laid out as `findkey_result`.
*/
pub type FindkeyResult = Match;

/**
Find keys using the algorithm with code `algo`.

# Safety

- `data` must be valid for reads of `len` bytes, or null if `len` is `0`.
- `keys` and `key_lens` must be valid for reads of `num_keys` elements.
- Each `keys[i]` must be valid for reads of `key_lens[i]` bytes.
- `out_results` must be valid for writes of `max_out` elements.
- `out_status` must be null or valid for a write.
*/
#[no_mangle]
pub unsafe extern "C" fn findkey(
    data: *const u8,
    len: usize,
    keys: *const *const u8,
    key_lens: *const usize,
    num_keys: usize,
    algo: u32,
    out_results: *mut FindkeyResult,
    max_out: usize,
    out_status: *mut i32,
) -> usize {
    let result = (|| -> Result<usize, Error> {
        let input = input(data, len)?;
        let keys = keys_from_raw(keys, key_lens, num_keys)?;
        let out = out_slice(out_results, max_out)?;

        let algorithm = Algorithm::try_from(algo)?;

        find_keys(input, &keys, algorithm, out)
    })();

    complete(result, out_status)
}

/**
Find keys using the scalar algorithm.

# Safety

See [`findkey`].
*/
#[no_mangle]
pub unsafe extern "C" fn findkey_scalar(
    data: *const u8,
    len: usize,
    keys: *const *const u8,
    key_lens: *const usize,
    num_keys: usize,
    out_results: *mut FindkeyResult,
    max_out: usize,
    out_status: *mut i32,
) -> usize {
    findkey(
        data,
        len,
        keys,
        key_lens,
        num_keys,
        Algorithm::Scalar as u32,
        out_results,
        max_out,
        out_status,
    )
}

/**
Find keys using the vectorized Teddy algorithm.

Reports [`Status::UnsupportedAlgorithm`] if the machine can't run it.

# Safety

See [`findkey`].
*/
#[no_mangle]
pub unsafe extern "C" fn findkey_teddy(
    data: *const u8,
    len: usize,
    keys: *const *const u8,
    key_lens: *const usize,
    num_keys: usize,
    out_results: *mut FindkeyResult,
    max_out: usize,
    out_status: *mut i32,
) -> usize {
    findkey(
        data,
        len,
        keys,
        key_lens,
        num_keys,
        Algorithm::Teddy as u32,
        out_results,
        max_out,
        out_status,
    )
}

/**
Find the positions of a single key.

# Safety

- `data` must be valid for reads of `len` bytes, or null if `len` is `0`.
- `key` must be valid for reads of `key_len` bytes.
- `out_positions` must be valid for writes of `max_out` elements.
- `out_status` must be null or valid for a write.
*/
#[no_mangle]
pub unsafe extern "C" fn findkey_single(
    data: *const u8,
    len: usize,
    key: *const u8,
    key_len: usize,
    out_positions: *mut usize,
    max_out: usize,
    out_status: *mut i32,
) -> usize {
    let result = (|| -> Result<usize, Error> {
        let input = input(data, len)?;
        let key = key_from_raw(key, key_len, 0)?;
        let out = out_slice(out_positions, max_out)?;

        find_key_positions(input, key, out)
    })();

    complete(result, out_status)
}

unsafe fn complete(result: Result<usize, Error>, out_status: *mut i32) -> usize {
    let (found, status) = match result {
        Ok(found) => (found, Status::Ok),
        Err(err) => (0, err.status()),
    };

    if !out_status.is_null() {
        *out_status = status.code();
    }

    found
}

unsafe fn input<'a>(data: *const u8, len: usize) -> Result<&'a [u8], Error> {
    if len == 0 {
        return Ok(&[]);
    }

    if data.is_null() {
        return Err(BadArgs::NullInput.into());
    }

    Ok(slice::from_raw_parts(data, len))
}

unsafe fn key_from_raw<'a>(key: *const u8, key_len: usize, key_id: usize) -> Result<&'a [u8], Error> {
    if key_len == 0 {
        return Err(BadArgs::EmptyKey { key_id }.into());
    }

    if key.is_null() {
        return Err(BadArgs::NullKey { key_id }.into());
    }

    Ok(slice::from_raw_parts(key, key_len))
}

unsafe fn keys_from_raw<'a>(
    keys: *const *const u8,
    key_lens: *const usize,
    num_keys: usize,
) -> Result<Vec<&'a [u8]>, Error> {
    if keys.is_null() || key_lens.is_null() {
        return Err(BadArgs::NullKeys.into());
    }

    if num_keys == 0 {
        return Err(BadArgs::NoKeys.into());
    }

    let keys = slice::from_raw_parts(keys, num_keys);
    let key_lens = slice::from_raw_parts(key_lens, num_keys);

    keys.iter()
        .zip(key_lens)
        .enumerate()
        .map(|(key_id, (&key, &key_len))| key_from_raw(key, key_len, key_id))
        .collect()
}

unsafe fn out_slice<'a, T>(out: *mut T, max_out: usize) -> Result<&'a mut [T], Error> {
    if out.is_null() {
        return Err(BadArgs::NullOutput.into());
    }

    if max_out == 0 {
        return Ok(&mut []);
    }

    Ok(slice::from_raw_parts_mut(out, max_out))
}
