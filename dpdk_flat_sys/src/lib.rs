//! `dpdk_flat_sys` is the system-library crate of the workspace: it
//! compiles a non-inlined C forwarding shim over DPDK's inline/macro
//! primitives and declares the already-linkable DPDK entry points by hand.
//!
//! The `build.rs` script locates libdpdk through `pkg-config`, compiles
//! the C code found in `src/shim.c` and statically embeds the result in
//! this crate.
//!
//! Nothing here adds behavior: every symbol forwards to one native
//! primitive with the same parameters and returns its result unchanged.
//! See `shim.c` for the forwarders and `bindings.rs` for the rest of the
//! curated surface.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

mod bindings;
mod shim;

pub use bindings::*;
pub use shim::*;
