use sqlx::PgPool;
use uuid::Uuid;

use crate::models::video::{CreateVideoRequest, UpdateVideoRequest, Video};

pub struct VideoService;

impl VideoService {
    pub async fn list(pool: &PgPool) -> anyhow::Result<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>("SELECT * FROM videos ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?;
        Ok(videos)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Video>> {
        let video = sqlx::query_as::<_, Video>("SELECT * FROM videos WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(video)
    }

    pub async fn create(pool: &PgPool, req: &CreateVideoRequest) -> anyhow::Result<Video> {
        if !req.url.starts_with("http://") && !req.url.starts_with("https://") {
            anyhow::bail!("URL de vidéo invalide");
        }

        let video = sqlx::query_as::<_, Video>(
            "INSERT INTO videos (titre, url, description)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.url)
        .bind(&req.description)
        .fetch_one(pool)
        .await?;
        Ok(video)
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateVideoRequest) -> anyhow::Result<Video> {
        if let Some(url) = req.url.as_deref() {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("URL de vidéo invalide");
            }
        }

        let video = sqlx::query_as::<_, Video>(
            "UPDATE videos
             SET titre       = COALESCE($1, titre),
                 url         = COALESCE($2, url),
                 description = COALESCE($3, description)
             WHERE id = $4
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.url)
        .bind(&req.description)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(video)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
