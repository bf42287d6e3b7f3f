//! # signifier-validation
//!
//! Structural constraint validator: evaluates JSON shape documents
//! (presence, cardinality, datatype, ranges, enumerations, patterns)
//! against an environment snapshot.

pub mod datatype;
pub mod shapes;
pub mod validator;

pub use shapes::{NodeShape, PropertyShape, ShapesDocument};
pub use validator::StructuralValidator;
