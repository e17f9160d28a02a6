// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Build script to emit custom cfg flags based on feature selection.
//!
//! This enables cleaner conditional compilation in tests and code:
//! - `#[cfg(stopline)]` instead of `#[cfg(not(feature = "without_stopline"))]`

fn main() {
    // Declare the custom cfg names to avoid warnings
    println!("cargo:rustc-check-cfg=cfg(stopline)");

    // Stop-line pruning is on unless explicitly disabled
    #[cfg(not(feature = "without_stopline"))]
    println!("cargo:rustc-cfg=stopline");
}
