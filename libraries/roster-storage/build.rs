//! Build script for roster-storage.
//!
//! Rebuilds the crate when the embedded `user_records` migrations change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
