//! Stamps the `--version` string.
//!
//! Every build gets `ENEX2HTML_BUILD_DATE` (UTC, `YYYY-MM-DD`). Builds
//! without the `release` feature also get `VERGEN_GIT_SHA`, which falls back
//! to `unknown` outside a git checkout.

use chrono::Utc;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!(
        "cargo:rustc-env=ENEX2HTML_BUILD_DATE={}",
        Utc::now().format("%Y-%m-%d")
    );

    #[cfg(not(feature = "release"))]
    git_sha();
}

#[cfg(not(feature = "release"))]
fn git_sha() {
    use vergen_gitcl::{Emitter, GitclBuilder};

    let emitted = GitclBuilder::default()
        .sha(true)
        .build()
        .map_err(|e| e.to_string())
        .and_then(|git| {
            Emitter::default()
                .add_instructions(&git)
                .and_then(|emitter| emitter.emit())
                .map_err(|e| e.to_string())
        });

    if let Err(reason) = emitted {
        println!("cargo:warning=No git revision for --version: {}", reason);
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
    }
}
