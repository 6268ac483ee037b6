//! Build script for the pixdrop web crate
//!
//! Exposes build metadata that the server logs at startup.

fn main() {
    // Build timestamp
    println!(
        "cargo:rustc-env=PIXDROP_BUILD_TIMESTAMP={}",
        chrono::Utc::now().to_rfc3339()
    );

    // Git info for version reporting
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
    {
        if output.status.success() {
            let commit_hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
            println!("cargo:rustc-env=PIXDROP_GIT_COMMIT={}", commit_hash);
        }
    }

    // Re-run triggers
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
