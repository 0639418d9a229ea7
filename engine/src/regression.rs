//! Render-hash regression helpers.
//!
//! A scenario is driven through a `HeadlessRunner`; after every tick the caller renders the
//! state into an RGBA buffer and we keep its SHA-256. The hash list is compared against a JSON
//! golden under `tests/goldens/`, or rewritten when `WRISTFLAP_UPDATE_GOLDENS` is set.

use std::{
    fs,
    io,
    path::Path,
};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{GameLogic, HeadlessRunner, surface::SurfaceSize};

/// Environment flag helper: accepts `1/true/yes/on` (case-insensitive).
pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}

/// If set, regression tests may update golden files in-place.
pub fn update_goldens_enabled() -> bool {
    env_flag("WRISTFLAP_UPDATE_GOLDENS")
}

pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}

#[macro_export]
macro_rules! regression_golden_path {
    ($name:expr) => {{
        let base = $crate::regression::sanitize_filename($name);
        ::std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("goldens")
            .join(format!("{base}.json"))
    }};
}

pub fn rgba_sha256_hex(rgba: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(rgba);
    hex::encode(hasher.finalize())
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHashGolden {
    pub version: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub hash_alg: String,
    /// One hash per rendered tick, starting with the initial state.
    pub hashes: Vec<String>,
}

impl FrameHashGolden {
    pub fn new(name: impl Into<String>, width: u32, height: u32, hashes: Vec<String>) -> Self {
        Self {
            version: 1,
            name: name.into(),
            width,
            height,
            hash_alg: "sha256".to_string(),
            hashes,
        }
    }
}

/// Renders the initial state and then the state after every input, hashing each frame.
pub fn render_hashes<G, I, Render>(
    game: G,
    inputs: I,
    size: SurfaceSize,
    mut render: Render,
) -> Vec<String>
where
    G: GameLogic,
    I: IntoIterator<Item = G::Input>,
    Render: FnMut(&G::State, &mut [u8], SurfaceSize),
{
    let mut buf = vec![0u8; size.rgba_len()];
    let mut runner = HeadlessRunner::new(game);
    let mut hashes = Vec::new();

    let mut capture = |state: &G::State, hashes: &mut Vec<String>| {
        buf.fill(0);
        render(state, &mut buf, size);
        hashes.push(rgba_sha256_hex(&buf));
    };

    capture(runner.state(), &mut hashes);
    for input in inputs {
        runner.step(input);
        capture(runner.state(), &mut hashes);
    }
    hashes
}

pub fn load_golden_json(path: impl AsRef<Path>) -> io::Result<FrameHashGolden> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not a frame-hash golden: {e}", path.display()),
        )
    })
}

pub fn save_golden_json(path: impl AsRef<Path>, golden: &FrameHashGolden) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let mut text = serde_json::to_string_pretty(golden).map_err(io::Error::other)?;
    text.push('\n');
    fs::write(path, text)
}

/// Compares `golden` with the file at `path`.
///
/// A missing file is written instead of compared, so the first run of a new scenario seeds it.
pub fn assert_or_update_golden_json(
    path: impl AsRef<Path>,
    golden: &FrameHashGolden,
    update: bool,
) -> io::Result<()> {
    let path = path.as_ref();
    let exists = path.exists();

    if update || !exists {
        save_golden_json(path, golden)?;
        let verb = if exists { "updated" } else { "wrote" };
        tracing::info!(path = %path.display(), frames = golden.hashes.len(), "{verb} golden");
        return Ok(());
    }

    let expected = load_golden_json(path)?;
    let mismatch = |what: String| {
        io::Error::other(format!(
            "{}: {what}\n(set WRISTFLAP_UPDATE_GOLDENS=1 to rewrite)",
            path.display()
        ))
    };

    let header = |g: &FrameHashGolden| format!("v{} {} {}x{}", g.version, g.hash_alg, g.width, g.height);
    if header(&expected) != header(golden) {
        return Err(mismatch(format!(
            "header differs: golden has {}, run produced {}",
            header(&expected),
            header(golden)
        )));
    }

    let first_diff = expected
        .hashes
        .iter()
        .zip(&golden.hashes)
        .position(|(a, b)| a != b);
    if let Some(frame) = first_diff {
        return Err(mismatch(format!(
            "frame {frame} differs: golden {} vs run {}",
            expected.hashes[frame], golden.hashes[frame]
        )));
    }
    if expected.hashes.len() != golden.hashes.len() {
        return Err(mismatch(format!(
            "golden has {} frames, run produced {}",
            expected.hashes.len(),
            golden.hashes.len()
        )));
    }

    Ok(())
}
