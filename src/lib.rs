//! # dim — a dimensional-analysis calculator core
//!
//! Evaluates arithmetic expressions whose operands carry physical units,
//! enforces dimensional correctness, converts between unit systems
//! (including affine-scaled temperature scales), and renders results in a
//! chosen unit or a canonical reduced form.
//!
//! The crate is used three ways: embedded directly as a library (this
//! crate), through the C-style ABI in [`capi`], and — behind the `wasm`
//! feature — through a WebAssembly binding in `wasm` mirroring the same
//! entry points.

pub mod ast;
pub mod capi;
pub mod catalog;
pub mod constants;
pub mod dimension;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod registry;
pub mod token;
pub mod unit;
pub mod value;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use dimension::Dimension;
pub use engine::Engine;
pub use error::{DimError, DimResult};
pub use format::FormatMode;
pub use value::{Quantity, Value};
