//! Read-only queries over `garments` and `garment_images`.

use sqlx::PgPool;
use tryon_core::types::DbId;

use crate::models::garment::GarmentSnapshot;

/// Garment lookups scoped to the owning user.
pub struct GarmentRepo;

impl GarmentRepo {
    /// Find a garment owned by `user_id`, together with its preferred image.
    ///
    /// Returns `None` if the garment does not exist or belongs to someone
    /// else. A garment without images is returned with `image_url = None`.
    pub async fn find_owned_with_image(
        pool: &PgPool,
        user_id: DbId,
        garment_id: DbId,
    ) -> Result<Option<GarmentSnapshot>, sqlx::Error> {
        sqlx::query_as::<_, GarmentSnapshot>(
            "SELECT g.id, g.name, g.color, g.style, g.brand,
                    (SELECT gi.image_url FROM garment_images gi
                      WHERE gi.garment_id = g.id
                      ORDER BY gi.is_primary DESC, gi.sort_order, gi.id
                      LIMIT 1) AS image_url
             FROM garments g
             WHERE g.id = $1 AND g.user_id = $2",
        )
        .bind(garment_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }
}
