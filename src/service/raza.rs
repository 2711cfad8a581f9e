use crate::db::{DbHandle, DbRaza, DbRazaWithCount};
use crate::error::{RazasError, RazasResult};
use razas_schema::{
    Page, RazaCreate, RazaResponse, RazaUpdate, RazaWithAnimalsResponse, Validate, ValidationError,
};
use tracing::info;

const SELECT_WITH_COUNT: &str = r#"
    SELECT r.cod_raza, r.descripcion, COUNT(a.cod_animal) AS total_animales
    FROM raza r
    LEFT JOIN animal a ON a.cod_raza = r.cod_raza
"#;

/// Breed catalog operations against one profile's database.
pub struct RazaService<'a> {
    db: &'a DbHandle,
}

impl<'a> RazaService<'a> {
    pub fn new(db: &'a DbHandle) -> Self {
        Self { db }
    }

    pub async fn create(&self, raza: RazaCreate) -> RazasResult<RazaResponse> {
        raza.validate()?;
        if self.find(&raza.cod_raza).await?.is_some() {
            return Err(RazasError::already_exists(format!(
                "Raza con código {} ya existe",
                raza.cod_raza
            )));
        }

        let sql = self
            .db
            .sql("INSERT INTO raza (cod_raza, descripcion) VALUES (?, ?)");
        sqlx::query(&sql)
            .bind(&raza.cod_raza)
            .bind(&raza.descripcion)
            .execute(self.db.pool())
            .await?;

        info!(cod_raza = %raza.cod_raza, "raza created");
        Ok(RazaResponse {
            cod_raza: raza.cod_raza,
            descripcion: raza.descripcion,
        })
    }

    pub async fn get(&self, cod_raza: &str) -> RazasResult<RazaResponse> {
        self.find(cod_raza)
            .await?
            .map(RazaResponse::from)
            .ok_or_else(|| missing(cod_raza))
    }

    pub async fn get_with_count(&self, cod_raza: &str) -> RazasResult<RazaWithAnimalsResponse> {
        let query =
            format!("{SELECT_WITH_COUNT} WHERE r.cod_raza = ? GROUP BY r.cod_raza, r.descripcion");
        let sql = self.db.sql(&query);
        sqlx::query_as::<_, DbRazaWithCount>(&sql)
            .bind(cod_raza)
            .fetch_optional(self.db.pool())
            .await?
            .map(RazaWithAnimalsResponse::from)
            .ok_or_else(|| missing(cod_raza))
    }

    /// One page ordered by code, plus the total row count.
    pub async fn list(&self, page: Page) -> RazasResult<(Vec<RazaResponse>, i64)> {
        let sql = self
            .db
            .sql("SELECT cod_raza, descripcion FROM raza ORDER BY cod_raza LIMIT ? OFFSET ?");
        let rows = sqlx::query_as::<_, DbRaza>(&sql)
            .bind(page.size)
            .bind(page.skip())
            .fetch_all(self.db.pool())
            .await?;
        Ok((rows.into_iter().map(Into::into).collect(), self.count().await?))
    }

    /// One page of breeds with their animal counts, ordered by code.
    pub async fn list_with_count(&self, page: Page) -> RazasResult<Vec<RazaWithAnimalsResponse>> {
        let query = format!(
            "{SELECT_WITH_COUNT} GROUP BY r.cod_raza, r.descripcion ORDER BY r.cod_raza LIMIT ? OFFSET ?"
        );
        let sql = self.db.sql(&query);
        let rows = sqlx::query_as::<_, DbRazaWithCount>(&sql)
            .bind(page.size)
            .bind(page.skip())
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn update(&self, cod_raza: &str, update: RazaUpdate) -> RazasResult<RazaResponse> {
        update.validate()?;
        let current = self.get(cod_raza).await?;
        let Some(descripcion) = update.descripcion else {
            return Err(ValidationError::EmptyUpdate.into());
        };

        let sql = self
            .db
            .sql("UPDATE raza SET descripcion = ? WHERE cod_raza = ?");
        sqlx::query(&sql)
            .bind(&descripcion)
            .bind(cod_raza)
            .execute(self.db.pool())
            .await?;

        info!(cod_raza, "raza updated");
        Ok(RazaResponse {
            descripcion,
            ..current
        })
    }

    /// Refused while any animal still references the breed.
    pub async fn delete(&self, cod_raza: &str) -> RazasResult<()> {
        self.get(cod_raza).await?;

        let sql = self
            .db
            .sql("SELECT COUNT(*) FROM animal WHERE cod_raza = ?");
        let animals: i64 = sqlx::query_scalar(&sql)
            .bind(cod_raza)
            .fetch_one(self.db.pool())
            .await?;
        if animals > 0 {
            return Err(RazasError::Conflict(format!(
                "No se puede eliminar la raza {cod_raza} porque tiene {animals} animales asociados"
            )));
        }

        let sql = self.db.sql("DELETE FROM raza WHERE cod_raza = ?");
        sqlx::query(&sql)
            .bind(cod_raza)
            .execute(self.db.pool())
            .await?;
        info!(cod_raza, "raza deleted");
        Ok(())
    }

    pub(crate) async fn find(&self, cod_raza: &str) -> RazasResult<Option<DbRaza>> {
        let sql = self
            .db
            .sql("SELECT cod_raza, descripcion FROM raza WHERE cod_raza = ?");
        let row = sqlx::query_as::<_, DbRaza>(&sql)
            .bind(cod_raza)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row)
    }

    async fn count(&self) -> RazasResult<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM raza")
            .fetch_one(self.db.pool())
            .await?;
        Ok(total)
    }
}

fn missing(cod_raza: &str) -> RazasError {
    RazasError::not_found(format!("Raza con código {cod_raza} no encontrada"))
}
