//! # Voxel Sandbox Entry Point
//!
//! Runs the headless sandbox driver. The first argument, if any, is the path to a JSON
//! config file.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- sandbox.json
//! ```

fn main() {
    voxel_sandbox::run(std::env::args_os().nth(1).map(Into::into));
}
