//! The try-on generation pipeline.
//!
//! ```text
//! validating -> resolving -> prompting -> generating -> (promoting) -> recording -> responding
//!      |            |                         |
//!      +------------+---> failed              +---> recording(failed) -> failed
//! ```
//!
//! Validation and lookup failures return before the provider is touched and
//! write nothing. A provider failure is recorded as a `failed` history row
//! before the error is returned. Promotion never fails a request.

use std::sync::Arc;

use tryon_cloud::ResultPromoter;
use tryon_core::catalog::Catalog;
use tryon_core::error::CoreError;
use tryon_core::prompt::build_prompt;
use tryon_core::tryon::{
    validate_request, GenerateRequest, ValidatedRequest, MSG_GARMENT_NOT_FOUND,
    MSG_GARMENT_NO_IMAGE,
};
use tryon_core::types::DbId;
use tryon_db::models::garment::GarmentSnapshot;
use tryon_db::models::status::TryOnStatus;
use tryon_db::models::tryon_history::CreateTryOnHistory;
use tryon_db::store::{GarmentStore, HistoryStore};
use tryon_provider::ImageGenerator;

use crate::error::PipelineError;
use crate::outcome::{GarmentSummary, SceneSummary, TryOnOutcome};

/// Pipeline stages, used as a structured logging field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Resolving,
    Prompting,
    Generating,
    Promoting,
    Recording,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validating => "validating",
            Self::Resolving => "resolving",
            Self::Prompting => "prompting",
            Self::Generating => "generating",
            Self::Promoting => "promoting",
            Self::Recording => "recording",
        }
    }
}

/// Orchestrates one generation per call. Holds no per-request state, so a
/// single instance is shared across all requests.
pub struct TryOnPipeline {
    catalog: Arc<Catalog>,
    generator: Arc<dyn ImageGenerator>,
    promoter: Option<Arc<dyn ResultPromoter>>,
    bucket: String,
    garments: Arc<dyn GarmentStore>,
    history: Arc<dyn HistoryStore>,
}

impl TryOnPipeline {
    pub fn new(
        catalog: Arc<Catalog>,
        generator: Arc<dyn ImageGenerator>,
        garments: Arc<dyn GarmentStore>,
        history: Arc<dyn HistoryStore>,
    ) -> Self {
        Self {
            catalog,
            generator,
            promoter: None,
            bucket: String::new(),
            garments,
            history,
        }
    }

    /// Promote non-mock results into `bucket` via `promoter`.
    pub fn with_promoter(mut self, promoter: Arc<dyn ResultPromoter>, bucket: String) -> Self {
        self.promoter = Some(promoter);
        self.bucket = bucket;
        self
    }

    /// Run one generation for `user_id`.
    pub async fn run(
        &self,
        user_id: DbId,
        request: &GenerateRequest,
    ) -> Result<TryOnOutcome, PipelineError> {
        trace_stage(user_id, Stage::Validating);
        let validated = validate_request(request, &self.catalog)?;

        trace_stage(user_id, Stage::Resolving);
        let (garment, garment_image_url) = self.resolve_garment(user_id, &validated).await?;

        trace_stage(user_id, Stage::Prompting);
        let prompt = build_prompt(
            &garment.description(),
            &validated.category,
            validated.scene.as_ref(),
            &validated.subject_image_url,
        );

        trace_stage(user_id, Stage::Generating);
        let generated = match self
            .generator
            .generate(&prompt.text, &prompt.reference_images)
            .await
        {
            Ok(generated) => generated,
            Err(e) => {
                let detail = e.to_string();
                tracing::error!(
                    user_id,
                    garment_id = garment.id,
                    error = %detail,
                    "Image generation failed",
                );
                trace_stage(user_id, Stage::Recording);
                let record = self
                    .history
                    .create(&history_row(
                        user_id,
                        &validated,
                        &garment_image_url,
                        None,
                        false,
                        TryOnStatus::Failed,
                        Some(detail.clone()),
                    ))
                    .await?;
                return Err(PipelineError::Provider {
                    history_id: record.id,
                    detail,
                });
            }
        };

        let mut result_image_url = generated.image_url;
        let mut promoted = false;
        if !generated.is_mock {
            if let Some(promoter) = &self.promoter {
                trace_stage(user_id, Stage::Promoting);
                let promotion = promoter.promote(&result_image_url, &self.bucket).await;
                promoted = promotion.promoted;
                result_image_url = promotion.final_url;
            }
        }

        trace_stage(user_id, Stage::Recording);
        let record = self
            .history
            .create(&history_row(
                user_id,
                &validated,
                &garment_image_url,
                Some(result_image_url.clone()),
                generated.is_mock,
                TryOnStatus::Completed,
                None,
            ))
            .await?;

        tracing::info!(
            user_id,
            history_id = record.id,
            garment_id = garment.id,
            mock = generated.is_mock,
            promoted,
            "Try-on generation completed",
        );

        Ok(TryOnOutcome {
            history_id: record.id,
            result_image_url,
            is_mock: generated.is_mock,
            promoted,
            message: generated.message,
            garment: GarmentSummary::new(&garment, &garment_image_url, &validated.category),
            subject_image_url: validated.subject_image_url.clone(),
            subject_source: validated.subject.kind(),
            scene: validated.scene.as_ref().map(SceneSummary::from),
        })
    }

    /// Look up the caller's garment and its image.
    async fn resolve_garment(
        &self,
        user_id: DbId,
        validated: &ValidatedRequest,
    ) -> Result<(GarmentSnapshot, String), PipelineError> {
        let garment = self
            .garments
            .find_owned_garment_with_images(user_id, validated.garment_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(MSG_GARMENT_NOT_FOUND.into()))?;

        let image_url = garment
            .image_url
            .clone()
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| CoreError::Validation(MSG_GARMENT_NO_IMAGE.into()))?;

        Ok((garment, image_url))
    }
}

fn trace_stage(user_id: DbId, stage: Stage) {
    tracing::debug!(user_id, stage = stage.as_str(), "Try-on pipeline stage");
}

fn history_row(
    user_id: DbId,
    validated: &ValidatedRequest,
    garment_image_url: &str,
    result_image_url: Option<String>,
    is_mock: bool,
    status: TryOnStatus,
    error_message: Option<String>,
) -> CreateTryOnHistory {
    CreateTryOnHistory {
        user_id,
        garment_id: Some(validated.garment_id),
        subject_image_url: validated.subject_image_url.clone(),
        subject_source: validated.subject.kind(),
        preset_subject_id: validated.subject.preset_id().map(str::to_string),
        garment_image_url: garment_image_url.to_string(),
        result_image_url,
        category: validated.category.as_str().to_string(),
        scene_id: validated.scene.as_ref().map(|s| s.id.clone()),
        is_mock,
        status,
        error_message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
