//! Build script for detent-firmware
//!
//! Places the RP2040 memory layout where the linker finds it and passes
//! the linker scripts the runtime, embassy-rp and defmt need.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Linker scripts, in the order cortex-m-rt expects them
const LINKER_SCRIPTS: [&str; 3] = ["link.x", "link-rp.x", "defmt.x"];

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("memory.x copied into OUT_DIR");
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    for script in LINKER_SCRIPTS {
        println!("cargo:rustc-link-arg-bins=-T{script}");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
