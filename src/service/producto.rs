use crate::db::{DbHandle, DbProducto};
use crate::error::{RazasError, RazasResult};
use chrono::Utc;
use razas_dbpool::EngineKind;
use razas_schema::{ProductoCreate, ProductoResponse, ProductoUpdate, Validate};
use tracing::info;

const SELECT_PRODUCTO: &str = r#"
    SELECT id, codigo, nombre, descripcion, cantidad, precio, impuesto,
           deleted_at, created_at, updated_at
    FROM producto
"#;

const INSERT_PRODUCTO: &str = r#"
    INSERT INTO producto (
        codigo, nombre, descripcion, cantidad, precio, impuesto, created_at, updated_at
    )
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

/// Product catalog. Deleted rows stay in the table with `deleted_at` set and are
/// invisible to every read.
pub struct ProductoService<'a> {
    db: &'a DbHandle,
}

impl<'a> ProductoService<'a> {
    pub fn new(db: &'a DbHandle) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> RazasResult<Vec<ProductoResponse>> {
        let query = format!("{SELECT_PRODUCTO} WHERE deleted_at IS NULL ORDER BY id");
        let rows = sqlx::query_as::<_, DbProducto>(&query)
            .fetch_all(self.db.pool())
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn get(&self, id: i64) -> RazasResult<ProductoResponse> {
        let query = format!("{SELECT_PRODUCTO} WHERE id = ? AND deleted_at IS NULL");
        let sql = self.db.sql(&query);
        sqlx::query_as::<_, DbProducto>(&sql)
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?
            .map(ProductoResponse::from)
            .ok_or_else(|| RazasError::not_found("Producto no encontrado"))
    }

    pub async fn create(&self, body: ProductoCreate) -> RazasResult<ProductoResponse> {
        let producto = body.into_new()?;
        let now = Utc::now().to_rfc3339();

        // The sqlite `Any` mapping never reports a row id, so only MySQL reads it back.
        let id = if self.db.engine() != EngineKind::MySql {
            let query = format!("{INSERT_PRODUCTO} RETURNING id");
            let sql = self.db.sql(&query);
            sqlx::query_scalar::<_, i64>(&sql)
                .bind(&producto.codigo)
                .bind(&producto.nombre)
                .bind(&producto.descripcion)
                .bind(producto.cantidad)
                .bind(producto.precio)
                .bind(producto.impuesto)
                .bind(&now)
                .bind(&now)
                .fetch_one(self.db.pool())
                .await?
        } else {
            sqlx::query(INSERT_PRODUCTO)
                .bind(&producto.codigo)
                .bind(&producto.nombre)
                .bind(&producto.descripcion)
                .bind(producto.cantidad)
                .bind(producto.precio)
                .bind(producto.impuesto)
                .bind(&now)
                .bind(&now)
                .execute(self.db.pool())
                .await?
                .last_insert_id()
                .ok_or_else(|| {
                    RazasError::UnexpectedError("insert did not report a row id".to_string())
                })?
        };

        info!(id, codigo = %producto.codigo, "producto created");
        Ok(ProductoResponse {
            id,
            codigo: producto.codigo,
            nombre: producto.nombre,
            descripcion: producto.descripcion,
            cantidad: producto.cantidad,
            precio: producto.precio,
            impuesto: producto.impuesto,
            deleted_at: None,
        })
    }

    /// Absent fields keep their stored value; a body with no fields is rejected.
    pub async fn update(&self, id: i64, update: ProductoUpdate) -> RazasResult<ProductoResponse> {
        self.get(id).await?;
        update.validate()?;

        let sql = self.db.sql(
            r#"
        UPDATE producto SET
            codigo = COALESCE(?, codigo),
            nombre = COALESCE(?, nombre),
            descripcion = COALESCE(?, descripcion),
            cantidad = COALESCE(?, cantidad),
            precio = COALESCE(?, precio),
            impuesto = COALESCE(?, impuesto),
            updated_at = ?
        WHERE id = ? AND deleted_at IS NULL
        "#,
        );
        sqlx::query(&sql)
            .bind(update.codigo)
            .bind(update.nombre)
            .bind(update.descripcion)
            .bind(update.cantidad)
            .bind(update.precio)
            .bind(update.impuesto)
            .bind(Utc::now().to_rfc3339())
            .bind(id)
            .execute(self.db.pool())
            .await?;

        info!(id, "producto updated");
        self.get(id).await
    }

    /// Soft delete. Returns the row as it was at deletion time.
    pub async fn delete(&self, id: i64) -> RazasResult<ProductoResponse> {
        let current = self.get(id).await?;
        let now = Utc::now().to_rfc3339();

        let sql = self
            .db
            .sql("UPDATE producto SET deleted_at = ?, updated_at = ? WHERE id = ?");
        sqlx::query(&sql)
            .bind(&now)
            .bind(&now)
            .bind(id)
            .execute(self.db.pool())
            .await?;

        info!(id, "producto deleted");
        Ok(ProductoResponse {
            deleted_at: Some(now),
            ..current
        })
    }
}
