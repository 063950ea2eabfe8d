// Reusable library API — visible to both CLI and WASM builds
pub mod combination;
pub mod constraints;
pub mod errors;
pub mod log;
pub mod parser;
pub mod search;

// Compile the wasm glue only when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
