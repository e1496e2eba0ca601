//! Servicios del sistema
//!
//! Lógica que no pertenece a un almacén concreto.

pub mod image_intake;

pub use image_intake::{ImageStore, UploadedFile};
