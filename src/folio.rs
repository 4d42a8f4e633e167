//! Main module for folio library functionality

pub mod ast;
pub mod designator;
pub mod formats;
pub mod mangling;
pub mod pipeline;
pub mod testing;
pub mod transforms;
pub mod tree;
