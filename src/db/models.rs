use razas_schema::{AnimalResponse, ProductoResponse, RazaResponse, RazaWithAnimalsResponse};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbRaza {
    pub cod_raza: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbRazaWithCount {
    pub cod_raza: String,
    pub descripcion: String,
    pub total_animales: i64,
}

/// An `animal` row joined with its breed's description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct DbAnimal {
    pub cod_animal: String,
    pub descripcion: String,
    pub sexo: String,
    pub edad: i64,
    pub cod_raza: String,
    pub color_pelaje: String,
    pub color_ojos: String,
    pub image: Option<String>,
    pub raza_descripcion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct DbProducto {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub cantidad: i64,
    pub precio: f64,
    pub impuesto: f64,
    /// RFC3339, set on soft delete.
    pub deleted_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<DbRaza> for RazaResponse {
    fn from(row: DbRaza) -> Self {
        RazaResponse {
            cod_raza: row.cod_raza,
            descripcion: row.descripcion,
        }
    }
}

impl From<DbRazaWithCount> for RazaWithAnimalsResponse {
    fn from(row: DbRazaWithCount) -> Self {
        RazaWithAnimalsResponse {
            cod_raza: row.cod_raza,
            descripcion: row.descripcion,
            total_animales: row.total_animales,
        }
    }
}

impl From<DbAnimal> for AnimalResponse {
    fn from(row: DbAnimal) -> Self {
        let raza = row.raza_descripcion.map(|descripcion| RazaResponse {
            cod_raza: row.cod_raza.clone(),
            descripcion,
        });
        AnimalResponse {
            cod_animal: row.cod_animal,
            descripcion: row.descripcion,
            sexo: row.sexo,
            edad: row.edad,
            cod_raza: row.cod_raza,
            color_pelaje: row.color_pelaje,
            color_ojos: row.color_ojos,
            image: row.image,
            raza,
        }
    }
}

impl From<DbProducto> for ProductoResponse {
    fn from(row: DbProducto) -> Self {
        ProductoResponse {
            id: row.id,
            codigo: row.codigo,
            nombre: row.nombre,
            descripcion: row.descripcion,
            cantidad: row.cantidad,
            precio: row.precio,
            impuesto: row.impuesto,
            deleted_at: row.deleted_at,
        }
    }
}
