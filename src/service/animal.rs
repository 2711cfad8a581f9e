use super::raza::RazaService;
use crate::db::{DbAnimal, DbHandle};
use crate::error::{RazasError, RazasResult};
use razas_schema::{AnimalCreate, AnimalResponse, AnimalUpdate, Page, Validate};
use tracing::info;

const SELECT_ANIMAL: &str = r#"
    SELECT a.cod_animal, a.descripcion, a.sexo, a.edad, a.cod_raza,
           a.color_pelaje, a.color_ojos, a.image, r.descripcion AS raza_descripcion
    FROM animal a
    LEFT JOIN raza r ON r.cod_raza = a.cod_raza
"#;

pub struct AnimalService<'a> {
    db: &'a DbHandle,
}

impl<'a> AnimalService<'a> {
    pub fn new(db: &'a DbHandle) -> Self {
        Self { db }
    }

    /// The referenced breed must already exist.
    pub async fn create(&self, animal: AnimalCreate) -> RazasResult<AnimalResponse> {
        animal.validate()?;
        if self.find(&animal.cod_animal).await?.is_some() {
            return Err(RazasError::already_exists(format!(
                "Animal con código {} ya existe",
                animal.cod_animal
            )));
        }
        self.require_raza(&animal.cod_raza).await?;

        let sql = self.db.sql(
            r#"
        INSERT INTO animal (
            cod_animal, descripcion, sexo, edad, cod_raza, color_pelaje, color_ojos, image
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
        );
        sqlx::query(&sql)
            .bind(&animal.cod_animal)
            .bind(&animal.descripcion)
            .bind(&animal.sexo)
            .bind(animal.edad)
            .bind(&animal.cod_raza)
            .bind(&animal.color_pelaje)
            .bind(&animal.color_ojos)
            .bind(animal.image.as_deref())
            .execute(self.db.pool())
            .await?;

        info!(cod_animal = %animal.cod_animal, cod_raza = %animal.cod_raza, "animal created");
        self.get(&animal.cod_animal).await
    }

    pub async fn get(&self, cod_animal: &str) -> RazasResult<AnimalResponse> {
        self.find(cod_animal)
            .await?
            .map(AnimalResponse::from)
            .ok_or_else(|| {
                RazasError::not_found(format!("Animal con código {cod_animal} no encontrado"))
            })
    }

    pub async fn list(&self, page: Page) -> RazasResult<(Vec<AnimalResponse>, i64)> {
        let query = format!("{SELECT_ANIMAL} ORDER BY a.cod_animal LIMIT ? OFFSET ?");
        let sql = self.db.sql(&query);
        let rows = sqlx::query_as::<_, DbAnimal>(&sql)
            .bind(page.size)
            .bind(page.skip())
            .fetch_all(self.db.pool())
            .await?;
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animal")
            .fetch_one(self.db.pool())
            .await?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Animals of one breed; the breed itself must exist.
    pub async fn list_by_raza(
        &self,
        cod_raza: &str,
        page: Page,
    ) -> RazasResult<(Vec<AnimalResponse>, i64)> {
        self.require_raza(cod_raza).await?;

        let query =
            format!("{SELECT_ANIMAL} WHERE a.cod_raza = ? ORDER BY a.cod_animal LIMIT ? OFFSET ?");
        let sql = self.db.sql(&query);
        let rows = sqlx::query_as::<_, DbAnimal>(&sql)
            .bind(cod_raza)
            .bind(page.size)
            .bind(page.skip())
            .fetch_all(self.db.pool())
            .await?;

        let sql = self
            .db
            .sql("SELECT COUNT(*) FROM animal WHERE cod_raza = ?");
        let total: i64 = sqlx::query_scalar(&sql)
            .bind(cod_raza)
            .fetch_one(self.db.pool())
            .await?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Absent fields keep their stored value.
    pub async fn update(
        &self,
        cod_animal: &str,
        update: AnimalUpdate,
    ) -> RazasResult<AnimalResponse> {
        update.validate()?;
        self.get(cod_animal).await?;
        if let Some(cod_raza) = update.cod_raza.as_deref() {
            self.require_raza(cod_raza).await?;
        }

        let sql = self.db.sql(
            r#"
        UPDATE animal SET
            descripcion = COALESCE(?, descripcion),
            sexo = COALESCE(?, sexo),
            edad = COALESCE(?, edad),
            cod_raza = COALESCE(?, cod_raza),
            color_pelaje = COALESCE(?, color_pelaje),
            color_ojos = COALESCE(?, color_ojos),
            image = COALESCE(?, image)
        WHERE cod_animal = ?
        "#,
        );
        sqlx::query(&sql)
            .bind(update.descripcion)
            .bind(update.sexo)
            .bind(update.edad)
            .bind(update.cod_raza)
            .bind(update.color_pelaje)
            .bind(update.color_ojos)
            .bind(update.image)
            .bind(cod_animal)
            .execute(self.db.pool())
            .await?;

        info!(cod_animal, "animal updated");
        self.get(cod_animal).await
    }

    pub async fn delete(&self, cod_animal: &str) -> RazasResult<()> {
        self.get(cod_animal).await?;
        let sql = self.db.sql("DELETE FROM animal WHERE cod_animal = ?");
        sqlx::query(&sql)
            .bind(cod_animal)
            .execute(self.db.pool())
            .await?;
        info!(cod_animal, "animal deleted");
        Ok(())
    }

    async fn find(&self, cod_animal: &str) -> RazasResult<Option<DbAnimal>> {
        let query = format!("{SELECT_ANIMAL} WHERE a.cod_animal = ?");
        let sql = self.db.sql(&query);
        let row = sqlx::query_as::<_, DbAnimal>(&sql)
            .bind(cod_animal)
            .fetch_optional(self.db.pool())
            .await?;
        Ok(row)
    }

    async fn require_raza(&self, cod_raza: &str) -> RazasResult<()> {
        match RazaService::new(self.db).find(cod_raza).await? {
            Some(_) => Ok(()),
            None => Err(RazasError::not_found(format!(
                "Raza con código {cod_raza} no encontrada"
            ))),
        }
    }
}
