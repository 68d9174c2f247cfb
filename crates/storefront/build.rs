//! Build script for the storefront crate.
//!
//! Fingerprints the stylesheet so templates can reference
//! `/static/css/derived/main.<hash>.css` and let caches keep it forever.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css_path.display());

    let hash = match fingerprint_css(&manifest_dir, &css_path) {
        Ok(hash) => hash,
        Err(e) => {
            println!("cargo:warning=Could not fingerprint main.css: {e}");
            String::new()
        }
    };

    // Read by the `stylesheet_href` template filter
    println!("cargo:rustc-env=CSS_HASH={hash}");
}

/// Hash main.css (first 8 hex chars of SHA-256) and copy it to
/// `static/css/derived/main.<hash>.css`.
fn fingerprint_css(manifest_dir: &str, css_path: &Path) -> std::io::Result<String> {
    let content = fs::read(css_path)?;

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest).to_string();

    let derived_dir = Path::new(manifest_dir).join("static/css/derived");
    fs::create_dir_all(&derived_dir)?;
    fs::copy(css_path, derived_dir.join(format!("main.{short_hash}.css")))?;

    Ok(short_hash)
}
