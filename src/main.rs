//! # Voxel Sandbox Entry Point
//!
//! Runs a scripted headless session of the simulation. Set `RUST_LOG=info` to see what
//! happens, and `VOXEL_SANDBOX_CONFIG` to load a JSON configuration file.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release
//! ```

fn main() -> anyhow::Result<()> {
    voxel_sandbox::run()
}
