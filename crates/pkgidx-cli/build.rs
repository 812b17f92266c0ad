//! Exposes `PKGIDX_VERSION` to the binary: the package version, followed by
//! the short commit hash when built from a git checkout.

use std::process::Command;

/// Run git and return its trimmed stdout, or `None` on any failure.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    let package = env!("CARGO_PKG_VERSION");

    let version = match git(&["rev-parse", "--short=10", "HEAD"]) {
        Some(commit) => {
            let dirty = git(&["status", "--porcelain", "--untracked-files=no"]).is_some();
            let suffix = if dirty { "-dirty" } else { "" };
            format!("{package} ({commit}{suffix})")
        }
        None => package.to_string(),
    };

    if let Some(git_dir) = git(&["rev-parse", "--absolute-git-dir"]) {
        println!("cargo:rerun-if-changed={git_dir}/HEAD");
        println!("cargo:rerun-if-changed={git_dir}/index");
    }
    println!("cargo:rustc-env=PKGIDX_VERSION={version}");
}
