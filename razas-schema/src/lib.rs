pub mod animal;
pub mod envelope;
pub mod page;
pub mod producto;
pub mod raza;
pub mod validation;

pub use animal::{AnimalCreate, AnimalListResponse, AnimalResponse, AnimalUpdate};
pub use envelope::ApiEnvelope;
pub use page::{Page, PageQuery};
pub use producto::{NewProducto, ProductoCreate, ProductoResponse, ProductoUpdate};
pub use raza::{RazaCreate, RazaListResponse, RazaResponse, RazaUpdate, RazaWithAnimalsResponse};
pub use validation::{Validate, ValidationError};
