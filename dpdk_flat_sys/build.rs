use std::env;
use std::path::PathBuf;
use std::process::{Command, Output};

fn command_warnings(section: &str, command_result: &std::io::Result<Output>) {
    if command_result.is_err() {
        println!("cargo:warning=[{section}]{:?}", command_result);
    }

    let output = command_result.as_ref().unwrap();
    let r = output.stdout.clone();
    if !r.is_empty() {
        println!("cargo:warning=[{section}]{}", String::from_utf8(r).unwrap());
    }

    let r = output.stderr.clone();
    if !r.is_empty() {
        println!("cargo:warning=[{section}]{}", String::from_utf8(r).unwrap());
    }

    if !output.status.success() {
        panic!("[{section}] failed: {}", output.status);
    }
}

/// Ask pkg-config about the installed DPDK and return the answer as
/// individual arguments.
fn pkg_config(what: &str) -> Vec<String> {
    let result = Command::new("pkg-config").args([what, "libdpdk"]).output();
    match result {
        Ok(output) => {
            if !output.status.success() {
                panic!(
                    "pkg-config could not find libdpdk: {}",
                    String::from_utf8_lossy(&output.stderr)
                );
            }
            String::from_utf8(output.stdout)
                .unwrap()
                .split_whitespace()
                .map(str::to_string)
                .collect()
        }
        Err(e) => panic!("unable to run pkg-config: {e:?}"),
    }
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").unwrap();
    let out_dir = PathBuf::from(out_dir);
    let cc = env::var("CC").unwrap_or_else(|_| "cc".to_string());

    // 1: Compile the non-inlined forwarding shim against the DPDK headers.
    let cflags = pkg_config("--cflags");
    let shim_obj = out_dir.join("shim.o");
    let compile_result = Command::new(&cc)
        .args(["-O2", "-fPIC", "-Wall", "-c"])
        .args(&cflags)
        .args(["-o", shim_obj.to_str().unwrap(), "src/shim.c"])
        .output();
    command_warnings("cc", &compile_result);

    // 2: Archive it so cargo can link it statically.
    let archive = out_dir.join("libdpf_shim.a");
    let ar_result = Command::new("ar")
        .args(["crs", archive.to_str().unwrap(), shim_obj.to_str().unwrap()])
        .output();
    command_warnings("ar", &ar_result);

    println!("cargo:rustc-link-search=native={}", out_dir.display());
    println!("cargo:rustc-link-lib=static=dpf_shim");

    // 3: Link the DPDK libraries the shim forwards into.
    for flag in pkg_config("--libs") {
        if let Some(path) = flag.strip_prefix("-L") {
            println!("cargo:rustc-link-search=native={path}");
        } else if let Some(lib) = flag.strip_prefix("-l") {
            println!("cargo:rustc-link-lib=dylib={lib}");
        }
        // -Wl,… and friends carry no information cargo can use
    }

    // re-run build.rs upon changes
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=src/shim.c");
    println!("cargo:rerun-if-changed=src/shim.h");
}
