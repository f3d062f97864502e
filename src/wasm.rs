/*!
A JavaScript interface to the matchers.

WASM builds don't have a vector backend, so the baseline engine is used.
*/

use wasm_bindgen::prelude::*;

use crate::{
    keys::parse_key_list,
    matcher::{find_keys_vec, Algorithm},
};

/**
Find the keys listed in `keys`, one per line, in `input`.

The result is a flat array of `position, key_id` pairs.
*/
#[wasm_bindgen(js_name = findKeys)]
pub fn find_keys(input: &[u8], keys: &str) -> Result<Vec<u32>, JsValue> {
    let keys = parse_key_list(keys.as_bytes()).map_err(|err| JsValue::from_str(&err.to_string()))?;

    let matches = find_keys_vec(input, &keys, Algorithm::TeddyBaseline)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    Ok(matches
        .into_iter()
        .flat_map(|m| [m.position as u32, m.key_id])
        .collect())
}
