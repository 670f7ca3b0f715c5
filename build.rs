use std::env;
use std::process::Command;
use time::OffsetDateTime;

/// Year of the build, pinned by `SOURCE_DATE_EPOCH` for reproducible builds
fn build_year() -> i32 {
    env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .and_then(|epoch| OffsetDateTime::from_unix_timestamp(epoch).ok())
        .unwrap_or_else(OffsetDateTime::now_utc)
        .year()
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

/// `1.2.3` on release builds and tagged commits, `1.2.3-dev+<hash>` otherwise
fn display_version(version: &str, release: bool) -> String {
    if release {
        return version.to_string();
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let tag = format!("v{version}");
    if git(&["describe", "--tags", "--exact-match"]).as_deref() == Some(tag.as_str()) {
        return version.to_string();
    }
    match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) => format!("{version}-dev+{hash}"),
        None => format!("{version}-dev"),
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let release = env::var("PROFILE").is_ok_and(|profile| profile == "release");

    println!("cargo:rustc-env=DANCE_BUILD_YEAR={}", build_year());
    println!("cargo:rustc-env=DANCE_VERSION_DISPLAY={}", display_version(&version, release));
}
