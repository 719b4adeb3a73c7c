// ── Activation profile ────────────────────────────────────────────────────────
//
// Reads and writes `%APPDATA%\comshim\profile.json`: the concurrency options
// a thread initializes with and the default activation context.
// No `unsafe`: pure safe Rust + serde_json.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{ComError, Result},
    flags::{ClsCtx, CoInit},
};

// ── On-disk type ──────────────────────────────────────────────────────────────

/// Root of the JSON profile file.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub version: u32,
    /// Flag text, e.g. `"APARTMENTTHREADED | DISABLE_OLE1DDE"`.
    #[serde(default = "default_concurrency")]
    pub concurrency: CoInit,
    /// Flag text, e.g. `"INPROC_SERVER | LOCAL_SERVER"`.
    #[serde(default)]
    pub context: ClsCtx,
}

fn default_concurrency() -> CoInit {
    CoInit::APARTMENTTHREADED | CoInit::DISABLE_OLE1DDE
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            version: PROFILE_VERSION,
            concurrency: default_concurrency(),
            context: ClsCtx::default(),
        }
    }
}

// ── Format version ────────────────────────────────────────────────────────────

const PROFILE_VERSION: u32 = 1;

// ── Path ──────────────────────────────────────────────────────────────────────

/// Return the path to the profile file: `%APPDATA%\comshim\profile.json`.
///
/// Returns `None` if the `APPDATA` environment variable is not set.
pub fn default_path() -> Option<PathBuf> {
    let appdata = std::env::var_os("APPDATA")?;
    let mut p = PathBuf::from(appdata);
    p.push("comshim");
    p.push("profile.json");
    Some(p)
}

// ── Load ──────────────────────────────────────────────────────────────────────

/// Parse a profile from JSON text, rejecting unknown format versions.
pub fn from_json(data: &[u8]) -> Result<Profile> {
    let profile: Profile = serde_json::from_slice(data)?;
    if profile.version != PROFILE_VERSION {
        return Err(ComError::ProfileVersion(profile.version));
    }
    Ok(profile)
}

/// Read and parse the profile at `path`.
pub fn load(path: &Path) -> Result<Profile> {
    let data = fs::read(path)?;
    let profile = from_json(&data)?;
    debug!("loaded profile from {}", path.display());
    Ok(profile)
}

/// Load the profile from its default location.
///
/// A missing file (or unset `APPDATA`) yields the defaults; a file that
/// exists but cannot be read or parsed is an error.
pub fn load_default() -> Result<Profile> {
    match default_path() {
        Some(path) => load_or_default(&path),
        None => Ok(Profile::default()),
    }
}

/// Load the profile at `path`, or the defaults if there is no file there.
pub fn load_or_default(path: &Path) -> Result<Profile> {
    match load(path) {
        Err(ComError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            debug!("no profile at {}, using defaults", path.display());
            Ok(Profile::default())
        }
        other => other,
    }
}

// ── Save ──────────────────────────────────────────────────────────────────────

/// Write `profile` to `path` as pretty JSON, creating parent directories.
pub fn save(path: &Path, profile: &Profile) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = fs::File::create(path)?;
    serde_json::to_writer_pretty(file, profile)?;
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
