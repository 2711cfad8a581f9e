//! Entity operations over a profile's [`crate::db::DbHandle`].

pub mod animal;
pub mod producto;
pub mod raza;

pub use animal::AnimalService;
pub use producto::ProductoService;
pub use raza::RazaService;
