use sqlx::PgPool;
use uuid::Uuid;

use crate::models::blog::{
    Blog, BlogCategorie, CreateBlogCategorieRequest, CreateBlogRequest, UpdateBlogRequest,
};

pub struct BlogService;

impl BlogService {
    // ── Catégories ──────────────────────────────────────────────────────────

    pub async fn list_categories(pool: &PgPool) -> anyhow::Result<Vec<BlogCategorie>> {
        let categories = sqlx::query_as::<_, BlogCategorie>(
            "SELECT * FROM blog_categories ORDER BY nom",
        )
        .fetch_all(pool)
        .await?;
        Ok(categories)
    }

    pub async fn create_categorie(
        pool: &PgPool,
        req: &CreateBlogCategorieRequest,
    ) -> anyhow::Result<BlogCategorie> {
        let categorie = sqlx::query_as::<_, BlogCategorie>(
            "INSERT INTO blog_categories (nom) VALUES ($1) RETURNING *",
        )
        .bind(&req.nom)
        .fetch_one(pool)
        .await?;
        Ok(categorie)
    }

    /// Renommer une catégorie propage le nom vers `blogs.categorie_nom`.
    pub async fn rename_categorie(
        pool: &PgPool,
        id: Uuid,
        nom: &str,
    ) -> anyhow::Result<BlogCategorie> {
        let mut tx = pool.begin().await?;

        let categorie = sqlx::query_as::<_, BlogCategorie>(
            "UPDATE blog_categories SET nom = $1 WHERE id = $2 RETURNING *",
        )
        .bind(nom)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE blogs SET categorie_nom = $1 WHERE categorie_id = $2")
            .bind(nom)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(categorie)
    }

    pub async fn delete_categorie(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;

        // FK ON DELETE SET NULL détache les articles ; le libellé suit.
        sqlx::query("UPDATE blogs SET categorie_nom = NULL WHERE categorie_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM blog_categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    // ── Articles ────────────────────────────────────────────────────────────

    pub async fn list(pool: &PgPool, publies_seulement: bool) -> anyhow::Result<Vec<Blog>> {
        let blogs = if publies_seulement {
            sqlx::query_as::<_, Blog>(
                "SELECT * FROM blogs WHERE publie = TRUE ORDER BY date_publication DESC",
            )
            .fetch_all(pool)
            .await?
        } else {
            sqlx::query_as::<_, Blog>("SELECT * FROM blogs ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?
        };
        Ok(blogs)
    }

    pub async fn get(pool: &PgPool, id: Uuid) -> anyhow::Result<Option<Blog>> {
        let blog = sqlx::query_as::<_, Blog>("SELECT * FROM blogs WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(blog)
    }

    pub async fn create(
        pool: &PgPool,
        auteur_id: Uuid,
        req: &CreateBlogRequest,
    ) -> anyhow::Result<Blog> {
        let categorie_nom: Option<String> = match req.categorie_id {
            Some(id) => {
                sqlx::query_scalar("SELECT nom FROM blog_categories WHERE id = $1")
                    .bind(id)
                    .fetch_optional(pool)
                    .await?
            }
            None => None,
        };

        let auteur_nom: Option<String> =
            sqlx::query_scalar("SELECT prenom || ' ' || nom FROM users WHERE id = $1")
                .bind(auteur_id)
                .fetch_optional(pool)
                .await?;

        let publie = req.publie.unwrap_or(false);
        let blog = sqlx::query_as::<_, Blog>(
            "INSERT INTO blogs
               (titre, contenu, categorie_id, categorie_nom, auteur_id, auteur_nom,
                image_url, publie, date_publication)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                     CASE WHEN $8 THEN CURRENT_DATE ELSE NULL END)
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.contenu)
        .bind(req.categorie_id)
        .bind(categorie_nom)
        .bind(auteur_id)
        .bind(auteur_nom)
        .bind(&req.image_url)
        .bind(publie)
        .fetch_one(pool)
        .await?;
        Ok(blog)
    }

    pub async fn update(pool: &PgPool, id: Uuid, req: &UpdateBlogRequest) -> anyhow::Result<Blog> {
        let categorie_nom: Option<String> = match req.categorie_id {
            Some(cid) => {
                let nom: Option<String> =
                    sqlx::query_scalar("SELECT nom FROM blog_categories WHERE id = $1")
                        .bind(cid)
                        .fetch_optional(pool)
                        .await?;
                if nom.is_none() {
                    anyhow::bail!("Catégorie introuvable");
                }
                nom
            }
            None => None,
        };

        let blog = sqlx::query_as::<_, Blog>(
            "UPDATE blogs
             SET titre         = COALESCE($1, titre),
                 contenu       = COALESCE($2, contenu),
                 categorie_id  = COALESCE($3, categorie_id),
                 categorie_nom = COALESCE($4, categorie_nom),
                 image_url     = COALESCE($5, image_url),
                 publie        = COALESCE($6, publie),
                 date_publication = CASE
                     WHEN $6 = TRUE AND date_publication IS NULL THEN CURRENT_DATE
                     ELSE date_publication
                 END
             WHERE id = $7
             RETURNING *",
        )
        .bind(&req.titre)
        .bind(&req.contenu)
        .bind(req.categorie_id)
        .bind(categorie_nom)
        .bind(&req.image_url)
        .bind(req.publie)
        .bind(id)
        .fetch_one(pool)
        .await?;
        Ok(blog)
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
