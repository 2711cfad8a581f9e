pub mod animales;
pub mod databases;
pub mod productos;
pub mod razas;
pub mod root;
