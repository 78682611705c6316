//! Generated shell types live in `generated/`; see `build.rs`.
