use crate::foundation::error::{HeroError, HeroResult};

/// Placeholder replaced by the 1-based (or `first`-based) asset number in source templates.
pub const TEMPLATE_SLOT: &str = "{n}";

/// Largest pool accepted. Each asset costs a background probe and a decoder.
pub const MAX_ASSETS: usize = 64;

/// Fixed, ordered set of rotating media sources.
///
/// Holds at least two entries so every cursor has a distinct successor. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetPool {
    sources: Vec<String>,
}

impl AssetPool {
    /// Build a pool from explicit sources, normalizing each one.
    pub fn new<I, S>(sources: I) -> HeroResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<String> = Vec::new();
        for source in sources {
            if out.len() == MAX_ASSETS {
                return Err(HeroError::config(format!(
                    "asset pool is limited to {MAX_ASSETS} sources"
                )));
            }
            let normalized = normalize_source(source.as_ref())?;
            if out.contains(&normalized) {
                return Err(HeroError::config(format!(
                    "duplicate asset source '{normalized}'"
                )));
            }
            out.push(normalized);
        }
        if out.len() < 2 {
            return Err(HeroError::config(format!(
                "asset pool needs at least 2 sources for rotation, got {}",
                out.len()
            )));
        }
        Ok(Self { sources: out })
    }

    /// Build a pool by expanding `{n}` in `template` for `first..first + count`.
    pub fn from_template(template: &str, first: u32, count: u32) -> HeroResult<Self> {
        if !template.contains(TEMPLATE_SLOT) {
            return Err(HeroError::config(format!(
                "asset template '{template}' has no '{TEMPLATE_SLOT}' slot"
            )));
        }
        if count as usize > MAX_ASSETS {
            return Err(HeroError::config(format!(
                "asset template count {count} exceeds the limit of {MAX_ASSETS}"
            )));
        }
        let last = first.checked_add(count).ok_or_else(|| {
            HeroError::config("asset template range overflows")
        })?;
        Self::new((first..last).map(|n| template.replace(TEMPLATE_SLOT, &n.to_string())))
    }

    /// Number of assets (`N`).
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// `true` for an empty pool, which a built pool never is.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.sources.get(index).map(String::as_str)
    }

    /// Sources in rotation order.
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

}

/// Normalize a media source reference.
///
/// URLs (anything with a `scheme://` prefix) are kept verbatim after trimming. Paths use `/`
/// separators, drop `.` segments, and must be relative without `..` traversals.
pub fn normalize_source(source: &str) -> HeroResult<String> {
    let s = source.trim();
    if s.is_empty() {
        return Err(HeroError::config("asset source must be non-empty"));
    }
    if s.contains("://") {
        return Ok(s.to_string());
    }

    let s = s.replace('\\', "/");
    if s.starts_with('/') {
        return Err(HeroError::config(format!(
            "asset path '{s}' must be relative"
        )));
    }

    let mut parts = Vec::<&str>::new();
    for part in s.split('/') {
        match part {
            "" | "." => continue,
            ".." => {
                return Err(HeroError::config(format!(
                    "asset path '{s}' must not contain '..'"
                )));
            }
            _ => parts.push(part),
        }
    }
    if parts.is_empty() {
        return Err(HeroError::config("asset path must contain a file name"));
    }
    Ok(parts.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pool.rs"]
mod tests;
