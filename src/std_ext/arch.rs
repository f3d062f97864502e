#[cfg(all(target_arch = "aarch64", not(portable)))]
pub(crate) mod aarch64;
