//! # Voxel Sandbox Entry Point
//!
//! This is the entry point for the headless demo binary. It simply calls
//! into the library's `run()` function, which drives a scripted session over
//! the recording render backend.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release
//! ```

fn main() {
    voxel_sandbox::run();
}
