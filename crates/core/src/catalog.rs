//! Scene and subject catalogs.
//!
//! Both catalogs are loaded once at process start (from the embedded
//! `catalog/builtin.json` or an operator-supplied file) and never mutated
//! afterwards, so a shared `Arc<Catalog>` is safe to read concurrently.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog shipped with the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../catalog/builtin.json");

// ---------------------------------------------------------------------------
// Scene categories
// ---------------------------------------------------------------------------

/// Fixed set of scene buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneCategory {
    Outdoor,
    Indoor,
    Formal,
    Casual,
    Seasonal,
    Special,
}

impl SceneCategory {
    /// Every category, in display order.
    pub const ALL: [SceneCategory; 6] = [
        SceneCategory::Outdoor,
        SceneCategory::Indoor,
        SceneCategory::Formal,
        SceneCategory::Casual,
        SceneCategory::Seasonal,
        SceneCategory::Special,
    ];

    /// Wire name used in query strings and JSON keys.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outdoor => "outdoor",
            Self::Indoor => "indoor",
            Self::Formal => "formal",
            Self::Casual => "casual",
            Self::Seasonal => "seasonal",
            Self::Special => "special",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Outdoor => "Outdoor",
            Self::Indoor => "Indoor",
            Self::Formal => "Formal Occasions",
            Self::Casual => "Casual Everyday",
            Self::Seasonal => "Seasonal",
            Self::Special => "Special Events",
        }
    }
}

// ---------------------------------------------------------------------------
// Descriptors
// ---------------------------------------------------------------------------

/// A background/setting/lighting preset used to bias the composition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    pub id: String,
    pub name: String,
    pub category: SceneCategory,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub preview_image: Option<String>,
    /// Setting keywords injected into the prompt. Falls back to `name`.
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub lighting: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
}

/// A preset body/person image a garment can be composited onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectDescriptor {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub image_url: String,
    pub thumbnail_url: String,
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    scenes: Vec<SceneDescriptor>,
    #[serde(default)]
    subjects: Vec<SubjectDescriptor>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Read-only scene and subject tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    scenes: Vec<SceneDescriptor>,
    subjects: Vec<SubjectDescriptor>,
}

impl Catalog {
    /// Parse the catalog embedded in the binary.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Parse a catalog document (`{"scenes": [...], "subjects": [...]}`).
    ///
    /// Rejects documents with duplicate scene or subject ids.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid catalog document: {e}")))?;

        ensure_unique("scene", file.scenes.iter().map(|s| s.id.as_str()))?;
        ensure_unique("subject", file.subjects.iter().map(|s| s.id.as_str()))?;

        Ok(Self {
            scenes: file.scenes,
            subjects: file.subjects,
        })
    }

    /// List scenes, optionally restricted to one category by wire name.
    ///
    /// An unknown category name matches nothing.
    pub fn list_scenes(&self, category: Option<&str>) -> Vec<&SceneDescriptor> {
        self.scenes
            .iter()
            .filter(|s| category.map_or(true, |c| s.category.as_str() == c))
            .collect()
    }

    pub fn get_scene(&self, id: &str) -> Option<&SceneDescriptor> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn list_subjects(&self) -> &[SubjectDescriptor] {
        &self.subjects
    }

    pub fn get_subject(&self, id: &str) -> Option<&SubjectDescriptor> {
        self.subjects.iter().find(|s| s.id == id)
    }

    /// All scenes partitioned by category. Every category has a bucket,
    /// empty ones included.
    pub fn grouped_scenes(&self) -> BTreeMap<SceneCategory, Vec<&SceneDescriptor>> {
        let mut groups: BTreeMap<SceneCategory, Vec<&SceneDescriptor>> = SceneCategory::ALL
            .into_iter()
            .map(|c| (c, Vec::new()))
            .collect();
        for scene in &self.scenes {
            groups.entry(scene.category).or_default().push(scene);
        }
        groups
    }

    /// Category wire name -> label, for every category.
    pub fn category_names() -> BTreeMap<SceneCategory, &'static str> {
        SceneCategory::ALL
            .into_iter()
            .map(|c| (c, c.label()))
            .collect()
    }
}

fn ensure_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::Validation(format!(
                "Duplicate {kind} id '{id}' in catalog"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
