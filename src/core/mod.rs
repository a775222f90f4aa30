pub mod errors;
pub mod models;
pub mod tasks;

pub use errors::MedidictError;
pub use models::{
    Language,
    ReviewRecord,
    TermField,
    TermRecord,
};
