pub mod extract;
pub mod router;
pub mod routes;

pub use extract::DbConn;
pub use router::{RazasState, razas_router};
