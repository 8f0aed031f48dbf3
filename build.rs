use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    // Askama compiles templates in; a directory entry makes cargo rescan it.
    println!("cargo:rerun-if-changed=templates");

    let build_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_else(|_| "dev".to_string());
    println!("cargo:rustc-env=ACTIVITIES_BUILD_ID={}", build_id);
}
