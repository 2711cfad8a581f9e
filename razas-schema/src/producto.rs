use crate::validation::{Validate, ValidationError, check_opt_len};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/productos`. Every field is required; they are optional here so a
/// missing one is reported by name instead of as a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductoCreate {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub cantidad: Option<i64>,
    pub precio: Option<f64>,
    pub impuesto: Option<f64>,
}

/// A [`ProductoCreate`] with every field present.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProducto {
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub cantidad: i64,
    pub precio: f64,
    pub impuesto: f64,
}

impl ProductoCreate {
    pub fn into_new(self) -> Result<NewProducto, ValidationError> {
        self.validate()?;
        match self {
            ProductoCreate {
                codigo: Some(codigo),
                nombre: Some(nombre),
                descripcion: Some(descripcion),
                cantidad: Some(cantidad),
                precio: Some(precio),
                impuesto: Some(impuesto),
            } => Ok(NewProducto {
                codigo,
                nombre,
                descripcion,
                cantidad,
                precio,
                impuesto,
            }),
            other => Err(ValidationError::MissingFields(other.missing_fields())),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("codigo", self.codigo.is_none()),
            ("nombre", self.nombre.is_none()),
            ("descripcion", self.descripcion.is_none()),
            ("cantidad", self.cantidad.is_none()),
            ("precio", self.precio.is_none()),
            ("impuesto", self.impuesto.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, missing)| missing.then_some(field))
        .collect()
    }
}

impl Validate for ProductoCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }
        check_opt_len("codigo", self.codigo.as_deref(), 1, 50)?;
        check_opt_len("nombre", self.nombre.as_deref(), 1, 255)?;
        check_non_negative(self.cantidad, self.precio, self.impuesto)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ProductoUpdate {
    pub codigo: Option<String>,
    pub nombre: Option<String>,
    pub descripcion: Option<String>,
    pub cantidad: Option<i64>,
    pub precio: Option<f64>,
    pub impuesto: Option<f64>,
}

impl ProductoUpdate {
    pub fn is_empty(&self) -> bool {
        self.codigo.is_none()
            && self.nombre.is_none()
            && self.descripcion.is_none()
            && self.cantidad.is_none()
            && self.precio.is_none()
            && self.impuesto.is_none()
    }
}

impl Validate for ProductoUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        check_opt_len("codigo", self.codigo.as_deref(), 1, 50)?;
        check_opt_len("nombre", self.nombre.as_deref(), 1, 255)?;
        check_non_negative(self.cantidad, self.precio, self.impuesto)
    }
}

fn check_non_negative(
    cantidad: Option<i64>,
    precio: Option<f64>,
    impuesto: Option<f64>,
) -> Result<(), ValidationError> {
    if cantidad.is_some_and(|c| c < 0) {
        return Err(ValidationError::Negative { field: "cantidad" });
    }
    if precio.is_some_and(|p| p < 0.0) {
        return Err(ValidationError::Negative { field: "precio" });
    }
    if impuesto.is_some_and(|i| i < 0.0) {
        return Err(ValidationError::Negative { field: "impuesto" });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProductoResponse {
    pub id: i64,
    pub codigo: String,
    pub nombre: String,
    pub descripcion: String,
    pub cantidad: i64,
    pub precio: f64,
    pub impuesto: f64,
    pub deleted_at: Option<String>,
}
