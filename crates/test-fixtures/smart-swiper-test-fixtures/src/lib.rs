use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    swipers: HashMap<String, SwiperEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SwiperEntry {
    Path(String),
    Detailed {
        path: String,
        #[serde(default)]
        items: Option<usize>,
    },
}

impl SwiperEntry {
    fn as_path(&self) -> &str {
        match self {
            SwiperEntry::Path(path) => path,
            SwiperEntry::Detailed { path, .. } => path,
        }
    }

    fn items(&self) -> Option<usize> {
        match self {
            SwiperEntry::Path(_) => None,
            SwiperEntry::Detailed { items, .. } => *items,
        }
    }
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Swiper definitions (`{ runway, access, sleep, beginFrom }` documents).
pub mod swipers {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.swipers.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.swipers, "swiper", name)?;
        read_to_string(entry.as_path())
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.swipers, "swiper", name)?;
        super::load_json(entry.as_path())
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let entry = lookup(&MANIFEST.swipers, "swiper", name)?;
        Ok(resolve_path(entry.as_path()))
    }

    /// Suggested item count to bind when exercising the fixture, if the manifest names one.
    pub fn items(name: &str) -> Result<Option<usize>> {
        let entry = lookup(&MANIFEST.swipers, "swiper", name)?;
        Ok(entry.items())
    }
}
