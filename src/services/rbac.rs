//! Miroir en base de la matrice rôle → permissions.
//!
//! La matrice déclarée dans `models::role` fait autorité ; les tables
//! `roles`, `permissions` et `role_permissions` en sont une copie
//! resynchronisée au démarrage et par le seed. La synchronisation est
//! idempotente : chaque exécution remplace intégralement le jeu de
//! permissions de chaque rôle (pas de fusion partielle).

use sqlx::PgPool;
use tracing::info;

use crate::models::role::{
    all_permissions, Role, RoleRow, RoleWithPermissions, ALL_ROLES, PERMISSION_CATALOG,
};

pub struct RbacService;

impl RbacService {
    pub async fn sync(pool: &PgPool) -> anyhow::Result<()> {
        let mut tx = pool.begin().await?;

        // 1. Catalogue de permissions : upsert puis purge des orphelines.
        for (module, actions) in PERMISSION_CATALOG {
            for action in *actions {
                sqlx::query(
                    "INSERT INTO permissions (nom, module) VALUES ($1, $2)
                     ON CONFLICT (nom) DO UPDATE SET module = EXCLUDED.module",
                )
                .bind(format!("{module}.{action}"))
                .bind(module)
                .execute(&mut *tx)
                .await?;
            }
        }

        let catalog = all_permissions();
        sqlx::query("DELETE FROM permissions WHERE NOT (nom = ANY($1))")
            .bind(&catalog)
            .execute(&mut *tx)
            .await?;

        // 2. Rôles : upsert puis purge de ceux qui ne sont plus déclarés.
        let role_names: Vec<String> = ALL_ROLES.iter().map(|r| r.to_string()).collect();
        for role in ALL_ROLES {
            sqlx::query(
                "INSERT INTO roles (nom, description) VALUES ($1, $2)
                 ON CONFLICT (nom) DO UPDATE SET description = EXCLUDED.description",
            )
            .bind(role.to_string())
            .bind(role.description())
            .execute(&mut *tx)
            .await?;
        }
        sqlx::query("DELETE FROM roles WHERE NOT (nom = ANY($1))")
            .bind(&role_names)
            .execute(&mut *tx)
            .await?;

        // 3. Associations : remplacement complet, rôle par rôle.
        for role in ALL_ROLES {
            sqlx::query(
                "DELETE FROM role_permissions
                 WHERE role_id = (SELECT id FROM roles WHERE nom = $1)",
            )
            .bind(role.to_string())
            .execute(&mut *tx)
            .await?;

            let perms: Vec<String> = role.permissions().iter().cloned().collect();
            sqlx::query(
                "INSERT INTO role_permissions (role_id, permission_id)
                 SELECT r.id, p.id FROM roles r, permissions p
                 WHERE r.nom = $1 AND p.nom = ANY($2)",
            )
            .bind(role.to_string())
            .bind(&perms)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Matrice rôles/permissions synchronisée ({} rôles)", ALL_ROLES.len());
        Ok(())
    }

    pub async fn list_roles(pool: &PgPool) -> anyhow::Result<Vec<RoleRow>> {
        let roles = sqlx::query_as::<_, RoleRow>("SELECT * FROM roles ORDER BY nom")
            .fetch_all(pool)
            .await?;
        Ok(roles)
    }

    /// Permissions effectives d'un rôle, lues depuis le miroir en base.
    pub async fn role_with_permissions(
        pool: &PgPool,
        role: Role,
    ) -> anyhow::Result<RoleWithPermissions> {
        let permissions: Vec<String> = sqlx::query_scalar(
            "SELECT p.nom FROM permissions p
             JOIN role_permissions rp ON rp.permission_id = p.id
             JOIN roles r ON r.id = rp.role_id
             WHERE r.nom = $1
             ORDER BY p.nom",
        )
        .bind(role.to_string())
        .fetch_all(pool)
        .await?;

        Ok(RoleWithPermissions {
            nom: role.to_string(),
            description: role.description().to_string(),
            permissions,
        })
    }
}
