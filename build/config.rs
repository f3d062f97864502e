/**
Converts environment variables into Cargo cfgs that can then be used in code.
Crates can opt-in to a standard set of cross-cutting configurations by using [`Cfgs`].
*/
pub mod config {
    use std::{collections::HashSet, env};

    #[derive(Debug)]
    pub struct Cfgs {
        enabled: HashSet<String>,
    }

    #[derive(Debug, Clone, Copy)]
    pub struct Cfg(&'static str);

    impl Cfgs {
        /**
        Perform a checked build.

        These builds do extra checking and are suitable for testing and fuzzing.
        */
        pub const FINDKEY_CHECKED: Cfg = Cfg("checked");

        /**
        Perform a publish build.

        These builds have extra checks at build-time to ensure they're suitable for release.
        */
        pub const FINDKEY_PUBLISHED: Cfg = Cfg("published");

        /**
        Perform a portable build.

        These builds never use vector instructions, so the vectorized Teddy matcher
        reports itself as unsupported and callers need to pick the scalar or baseline matcher.
        */
        pub const FINDKEY_PORTABLE: Cfg = Cfg("portable");

        /** Set when the target is `wasm32-unknown-unknown`. */
        pub const WASM: Cfg = Cfg("wasm");

        /** Set from Cargo's `PROFILE`. */
        pub const RELEASE: Cfg = Cfg("release");

        /** Set from Cargo's `PROFILE`. */
        pub const DEBUG: Cfg = Cfg("debug");

        /** Set when the compiler accepts `#![feature]`, so nightly-only benches can run. */
        pub const UNSTABLE: Cfg = Cfg("unstable");

        /**
        The cfgs read from `FINDKEY_*` environment variables.
        */
        const FROM_ENV: &'static [Cfg] = &[
            Self::FINDKEY_CHECKED,
            Self::FINDKEY_PUBLISHED,
            Self::FINDKEY_PORTABLE,
        ];

        /**
        Every cfg this script may emit.

        These are declared to `rustc` up-front so it doesn't warn about unexpected cfgs
        whether or not they end up enabled.
        */
        const KNOWN: &'static [Cfg] = &[
            Self::FINDKEY_CHECKED,
            Self::FINDKEY_PUBLISHED,
            Self::FINDKEY_PORTABLE,
            Self::WASM,
            Self::RELEASE,
            Self::DEBUG,
            Self::UNSTABLE,
        ];

        /**
        Create a build configuration and read the default variables.
        */
        pub fn new() -> Self {
            let mut enabled = HashSet::new();

            cfg_from_env_value(Self::WASM, "TARGET", "wasm32-unknown-unknown", &mut enabled);
            cfg_from_env_value(Self::RELEASE, "PROFILE", "release", &mut enabled);
            cfg_from_env_value(Self::DEBUG, "PROFILE", "debug", &mut enabled);

            if unstable() {
                enabled.insert(Self::UNSTABLE.0.to_owned());
            }

            for cfg in Self::FROM_ENV {
                cfg_from_env_present(*cfg, &mut enabled);
            }

            Cfgs { enabled }
        }

        pub fn is_enabled(&self, cfg: Cfg) -> bool {
            self.enabled.contains(cfg.0)
        }

        pub fn is_wasm(&self) -> bool {
            self.is_enabled(Self::WASM)
        }

        pub fn enable(&mut self, cfg: Cfg) {
            self.enabled.insert(cfg.0.into());
        }

        pub fn apply(self) {
            if self.is_enabled(Self::FINDKEY_PUBLISHED) {
                assert!(
                    !self.is_enabled(Self::FINDKEY_CHECKED),
                    "a build may be either checked or published, but not both"
                );
                assert!(
                    self.is_enabled(Self::RELEASE),
                    "published builds must be optimized"
                );
                assert!(
                    !self.is_enabled(Self::FINDKEY_PORTABLE),
                    "published builds must include the vectorized matcher"
                );
            }

            for cfg in Self::KNOWN {
                println!("cargo:rustc-check-cfg=cfg({})", cfg.0);
            }

            for cfg in &self.enabled {
                println!("cargo:rustc-cfg={}", cfg);
            }

            println!("cargo:rerun-if-changed=build.rs");
            println!("cargo:rerun-if-changed=build/config.rs");
        }
    }

    fn cfg_from_env_present(cfg: Cfg, enabled: &mut HashSet<String>) {
        let var = format!("FINDKEY_{}", cfg.0.to_uppercase());
        println!("cargo:rerun-if-env-changed={}", var);

        match env::var(&var) {
            Ok(value) if value != "0" => {
                enabled.insert(cfg.0.into());
            }
            Ok(_) => {
                enabled.remove(cfg.0);
            }
            Err(_) => (),
        }
    }

    fn cfg_from_env_value(cfg: Cfg, key: &str, value: &str, enabled: &mut HashSet<String>) {
        println!("cargo:rerun-if-env-changed={}", key);

        if env::var(key).map_or(false, |actual| actual == value) {
            enabled.insert(cfg.0.into());
        }
    }

    fn unstable() -> bool {
        version_check::is_feature_flaggable().unwrap_or(false)
    }
}
