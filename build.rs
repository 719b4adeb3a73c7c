/// comshim build script.
///
/// The native `ole32` backend only exists on Windows.  Other targets still
/// build the flag, result-code and GUID vocabulary (and run its tests), so
/// rather than failing the build we tell the developer what they are getting.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=comshim: native COM activation is compiled out \
             (CARGO_CFG_TARGET_OS = {target_os:?})"
        );
    }

    // Only re-run the build script when it changes.
    println!("cargo:rerun-if-changed=build.rs");
}
