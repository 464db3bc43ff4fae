//! Try-on prompt construction.
//!
//! [`build_prompt`] is a pure, deterministic function: identical inputs
//! always yield byte-identical text. Missing optional attributes degrade to
//! generic phrases instead of failing.

use crate::catalog::SceneDescriptor;
use crate::garment::{GarmentCategory, GarmentDescription};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Used when the garment has no descriptive attributes at all.
pub const GENERIC_GARMENT_CLAUSE: &str = "the garment described for this outfit";

/// Used for categories outside the known lookup table.
pub const GENERIC_CATEGORY_PHRASE: &str = "clothing";

/// Lighting used when no scene is selected (or the scene has none).
pub const DEFAULT_LIGHTING: &str = "natural lighting";

/// Background used when no scene is selected (or the scene has none).
pub const DEFAULT_BACKGROUND: &str = "clean background";

/// The provider accepts at most this many reference images per request.
pub const MAX_REFERENCE_IMAGES: usize = 1;

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// A fully rendered provider prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TryOnPrompt {
    pub text: String,
    /// Reference images sent alongside the text; always the subject image.
    pub reference_images: Vec<String>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the provider prompt for compositing `garment` onto the subject
/// found at `subject_image_url`.
pub fn build_prompt(
    garment: &GarmentDescription,
    category: &GarmentCategory,
    scene: Option<&SceneDescriptor>,
    subject_image_url: &str,
) -> TryOnPrompt {
    let garment_clause = garment_clause(garment);
    let category_phrase = category_phrase(category);

    let mut text = format!(
        "Virtual try-on. Dress the person in the reference image in {garment_clause}, \
         worn as {category_phrase}.\n\n"
    );

    text.push_str(&scene_block(scene));

    text.push_str(
        "\nRequirements:\n\
         1. The garment must replace the person's original clothing in that area; \
         do not layer it over the existing outfit.\n\
         2. Keep the person's face, skin tone, body shape and pose exactly unchanged.\n\
         3. Do not return a copy of the reference image; the result must visibly show the new garment.\n\
         4. Produce a photorealistic full-body fashion photograph with natural fabric folds and fit.\n",
    );

    TryOnPrompt {
        text,
        reference_images: vec![subject_image_url.to_string()],
    }
}

/// Concatenate the non-empty garment attributes in fixed order
/// (name, color, style, brand).
fn garment_clause(garment: &GarmentDescription) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if let Some(name) = non_empty(&garment.name) {
        parts.push(format!("the garment \"{name}\""));
    }
    if let Some(color) = non_empty(&garment.color) {
        parts.push(format!("in {color}"));
    }
    if let Some(style) = non_empty(&garment.style) {
        parts.push(format!("with a {style} style"));
    }
    if let Some(brand) = non_empty(&garment.brand) {
        parts.push(format!("by {brand}"));
    }

    match parts.first() {
        None => GENERIC_GARMENT_CLAUSE.to_string(),
        // Attribute phrases read as modifiers; give them a subject.
        Some(first) if !first.starts_with("the garment") => {
            format!("the garment {}", parts.join(" "))
        }
        Some(_) => parts.join(" "),
    }
}

/// Map a category to its prompt phrase.
pub fn category_phrase(category: &GarmentCategory) -> &'static str {
    match category {
        GarmentCategory::UpperBody => "an upper-body garment (top, shirt, sweater or jacket)",
        GarmentCategory::LowerBody => "a lower-body garment (trousers, jeans, skirt or shorts)",
        GarmentCategory::Dresses => "a full-length dress",
        GarmentCategory::Other(_) => GENERIC_CATEGORY_PHRASE,
    }
}

fn scene_block(scene: Option<&SceneDescriptor>) -> String {
    match scene {
        Some(scene) => {
            let setting = non_empty(&scene.prompt).unwrap_or(scene.name.as_str());
            let background = non_empty(&scene.background).unwrap_or(DEFAULT_BACKGROUND);
            let lighting = non_empty(&scene.lighting).unwrap_or(DEFAULT_LIGHTING);
            format!(
                "Scene:\n\
                 - Setting: {setting}\n\
                 - Background: {background}\n\
                 - Lighting: {lighting}\n\
                 Place the person naturally in this setting with consistent perspective and shadows.\n"
            )
        }
        None => format!(
            "Scene:\n\
             - Background: {DEFAULT_BACKGROUND}\n\
             - Lighting: {DEFAULT_LIGHTING}\n"
        ),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
