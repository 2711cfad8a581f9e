use thiserror::Error as ThisError;

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("{field} debe tener entre {min} y {max} caracteres")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },

    #[error("{field} debe estar entre {min} y {max}")]
    Range {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("{field} no puede ser negativo")]
    Negative { field: &'static str },

    #[error("Faltan campos requeridos: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("No se proporcionaron datos para actualizar")]
    EmptyUpdate,
}

pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub(crate) fn check_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

pub(crate) fn check_opt_len(
    field: &'static str,
    value: Option<&str>,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| check_len(field, v, min, max))
}

pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::Range { field, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(check_len("descripcion", "ñandú", 1, 5).is_ok());
        assert_eq!(
            check_len("descripcion", "", 1, 5),
            Err(ValidationError::Length {
                field: "descripcion",
                min: 1,
                max: 5
            })
        );
    }

    #[test]
    fn missing_fields_message_lists_all() {
        let err = ValidationError::MissingFields(vec!["codigo", "precio"]);
        assert_eq!(err.to_string(), "Faltan campos requeridos: codigo, precio");
    }
}
