include!("build/config.rs");

fn main() {
    let mut cfgs = config::Cfgs::new();

    // wasm targets have no vector backend to select
    if cfgs.is_wasm() {
        cfgs.enable(config::Cfgs::FINDKEY_PORTABLE);
    }

    cfgs.apply();
}
