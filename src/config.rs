//! JSON configuration for the landing page orchestration.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::pool::AssetPool;
use crate::foundation::error::{HeroError, HeroResult};
use crate::hero::animator::TransitionTimings;
use crate::reveal::engine::RevealOptions;

/// Where the hero's rotating sources come from.
///
/// Deserializes from either `{"sources": [..]}` or `{"template": .., "count": .., "first": ..}`;
/// unknown keys and mixtures of the two forms are rejected.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(untagged)]
pub enum AssetsDef {
    /// Explicit ordered list.
    List {
        /// Sources in rotation order.
        sources: Vec<String>,
    },
    /// `{n}` template expanded over `first..first + count`.
    Template {
        /// Source pattern containing `{n}`.
        template: String,
        /// Number of assets.
        count: u32,
        /// First value substituted for `{n}`.
        first: u32,
    },
}

fn default_first() -> u32 {
    1
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAssets {
    sources: Option<Vec<String>>,
    template: Option<String>,
    count: Option<u32>,
    first: Option<u32>,
}

impl<'de> serde::Deserialize<'de> for AssetsDef {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = RawAssets::deserialize(deserializer)?;
        match raw {
            RawAssets {
                sources: Some(sources),
                template: None,
                count: None,
                first: None,
            } => Ok(Self::List { sources }),
            RawAssets {
                sources: None,
                template: Some(template),
                count: Some(count),
                first,
            } => Ok(Self::Template {
                template,
                count,
                first: first.unwrap_or_else(default_first),
            }),
            RawAssets {
                sources: Some(_), ..
            } => Err(D::Error::custom(
                "assets: `sources` cannot be combined with `template`, `count` or `first`",
            )),
            RawAssets {
                template: None, ..
            } => Err(D::Error::custom(
                "assets: expected `sources` or `template` with `count`",
            )),
            RawAssets { count: None, .. } => {
                Err(D::Error::custom("assets: `template` requires `count`"))
            }
        }
    }
}

impl Default for AssetsDef {
    fn default() -> Self {
        Self::Template {
            template: "videos/hero-{n}.mp4".to_string(),
            count: 4,
            first: 1,
        }
    }
}

impl AssetsDef {
    /// Build and validate the pool.
    pub fn build(&self) -> HeroResult<AssetPool> {
        match self {
            Self::List { sources } => AssetPool::new(sources),
            Self::Template {
                template,
                count,
                first,
            } => AssetPool::from_template(template, *first, *count),
        }
    }
}

/// Hero media settings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeroConfig {
    /// Rotating media sources.
    pub assets: AssetsDef,
    /// Pool index shown first.
    pub initial_cursor: usize,
    /// Handoff animation timings.
    pub transition: TransitionTimings,
}

impl HeroConfig {
    /// Check the pool, the initial cursor and the timings.
    pub fn validate(&self) -> HeroResult<()> {
        let pool = self.assets.build()?;
        if self.initial_cursor >= pool.len() {
            return Err(HeroError::config(format!(
                "initial_cursor {} out of range for {} assets",
                self.initial_cursor,
                pool.len()
            )));
        }
        self.transition.validate()
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    /// Hero media orchestration.
    pub hero: HeroConfig,
    /// Section reveal on scroll.
    pub reveal: RevealOptions,
}

impl LandingConfig {
    /// Parse from a JSON reader. Does not validate.
    pub fn from_reader<R: std::io::Read>(r: R) -> HeroResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| HeroError::serde(format!("parse landing config JSON: {e}")))
    }

    /// Parse from a JSON file. Does not validate.
    pub fn from_path(path: impl AsRef<Path>) -> HeroResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            HeroError::config(format!("open landing config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Validate every section.
    pub fn validate(&self) -> HeroResult<()> {
        self.hero.validate()?;
        self.reveal.validate()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
