//! Build script for collecting build-time information via the `built` crate.

fn main() {
    built::write_built_file().expect("Failed to acquire build-time information");
}
