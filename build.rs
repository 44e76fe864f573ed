use std::process::Command;

/// Embed a short commit hash as GIT_HASH for the health endpoint.
///
/// Release images are built without a .git directory, so SPML_DESK_GIT_HASH
/// takes precedence when set.
fn main() {
    println!("cargo:rerun-if-env-changed=SPML_DESK_GIT_HASH");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads");

    let git_hash = std::env::var("SPML_DESK_GIT_HASH")
        .ok()
        .filter(|h| !h.trim().is_empty())
        .or_else(head_hash)
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GIT_HASH={}", git_hash);
}

fn head_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
