use crate::raza::RazaResponse;
use crate::validation::{Validate, ValidationError, check_len, check_opt_len, check_range};
use serde::{Deserialize, Serialize};

pub const EDAD_MAX: i64 = 50;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimalCreate {
    pub cod_animal: String,
    pub descripcion: String,
    /// M/F
    pub sexo: String,
    pub edad: i64,
    pub cod_raza: String,
    pub color_pelaje: String,
    pub color_ojos: String,
    /// Stored as-is; the API does not handle uploads.
    #[serde(default)]
    pub image: Option<String>,
}

impl Validate for AnimalCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_len("cod_animal", &self.cod_animal, 1, 50)?;
        check_len("descripcion", &self.descripcion, 1, 255)?;
        check_len("sexo", &self.sexo, 1, 10)?;
        check_range("edad", self.edad, 0, EDAD_MAX)?;
        check_len("cod_raza", &self.cod_raza, 1, 50)?;
        check_len("color_pelaje", &self.color_pelaje, 1, 100)?;
        check_len("color_ojos", &self.color_ojos, 1, 100)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimalUpdate {
    pub descripcion: Option<String>,
    pub sexo: Option<String>,
    pub edad: Option<i64>,
    pub cod_raza: Option<String>,
    pub color_pelaje: Option<String>,
    pub color_ojos: Option<String>,
    pub image: Option<String>,
}

impl Validate for AnimalUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_opt_len("descripcion", self.descripcion.as_deref(), 1, 255)?;
        check_opt_len("sexo", self.sexo.as_deref(), 1, 10)?;
        if let Some(edad) = self.edad {
            check_range("edad", edad, 0, EDAD_MAX)?;
        }
        check_opt_len("cod_raza", self.cod_raza.as_deref(), 1, 50)?;
        check_opt_len("color_pelaje", self.color_pelaje.as_deref(), 1, 100)?;
        check_opt_len("color_ojos", self.color_ojos.as_deref(), 1, 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnimalResponse {
    pub cod_animal: String,
    pub descripcion: String,
    pub sexo: String,
    pub edad: i64,
    pub cod_raza: String,
    pub color_pelaje: String,
    pub color_ojos: String,
    pub image: Option<String>,
    pub raza: Option<RazaResponse>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnimalListResponse {
    pub animals: Vec<AnimalResponse>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}
