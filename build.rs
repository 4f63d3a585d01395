use std::{env, fs, path::PathBuf};

fn main() {
    // Pick the linker memory layout for the target chip.
    let target = env::var("TARGET").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_file = if target.starts_with("thumbv8m") {
        "memory-pico2.x"
    } else if target.starts_with("thumbv6m") {
        "memory-pico1.x"
    } else {
        // Host builds (tests) link normally.
        return;
    };

    let memory_x =
        fs::read_to_string(memory_file).unwrap_or_else(|err| panic!("Failed to read {memory_file}: {err}"));
    fs::write(out_dir.join("memory.x"), memory_x).expect("Failed to write memory.x");
    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed={memory_file}");

    // Linker scripts from cortex-m-rt and defmt.
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    if target.starts_with("thumbv6m") {
        println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    }
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    println!("cargo:rustc-link-arg-examples=--nmagic");
    println!("cargo:rustc-link-arg-examples=-Tlink.x");
    if target.starts_with("thumbv6m") {
        println!("cargo:rustc-link-arg-examples=-Tlink-rp.x");
    }
    println!("cargo:rustc-link-arg-examples=-Tdefmt.x");
}
