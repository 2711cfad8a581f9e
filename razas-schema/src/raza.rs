use crate::validation::{Validate, ValidationError, check_len, check_opt_len};
use serde::{Deserialize, Serialize};

pub const COD_RAZA_MAX: usize = 50;
pub const DESCRIPCION_MAX: usize = 255;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazaCreate {
    pub cod_raza: String,
    pub descripcion: String,
}

impl Validate for RazaCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_len("cod_raza", &self.cod_raza, 1, COD_RAZA_MAX)?;
        check_len("descripcion", &self.descripcion, 1, DESCRIPCION_MAX)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RazaUpdate {
    #[serde(default)]
    pub descripcion: Option<String>,
}

impl RazaUpdate {
    pub fn is_empty(&self) -> bool {
        self.descripcion.is_none()
    }
}

impl Validate for RazaUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        check_opt_len("descripcion", self.descripcion.as_deref(), 1, DESCRIPCION_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RazaResponse {
    pub cod_raza: String,
    pub descripcion: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RazaWithAnimalsResponse {
    pub cod_raza: String,
    pub descripcion: String,
    #[serde(default)]
    pub total_animales: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazaListResponse {
    pub razas: Vec<RazaResponse>,
    pub total: i64,
    pub page: i64,
    pub size: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_long_code() {
        let raza = RazaCreate {
            cod_raza: "x".repeat(COD_RAZA_MAX + 1),
            descripcion: "Labrador".to_string(),
        };
        assert!(matches!(
            raza.validate(),
            Err(ValidationError::Length { field: "cod_raza", .. })
        ));
    }

    #[test]
    fn update_accepts_missing_fields_but_not_empty_strings() {
        assert!(RazaUpdate::default().validate().is_ok());
        let update = RazaUpdate {
            descripcion: Some(String::new()),
        };
        assert!(update.validate().is_err());
    }
}
