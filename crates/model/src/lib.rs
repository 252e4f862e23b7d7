//! Primitive data types used at the model/view boundary.
//!
//! Each type converts values between their external representation (what a
//! control displays or a user types) and their model representation, and
//! validates model values against a set of constraints:
//!
//! - [`StringType`] - generic string type with length and content constraints
//! - [`EdmString`] - the OData `Edm.String` primitive type, adding
//!   `nullable` handling on top of [`StringType`]

mod constraints;
mod edm_string;
mod error;
mod string;
mod value;

pub use constraints::StringConstraints;
pub use edm_string::{EdmString, EdmStringConstraints};
pub use error::{FormatError, ParseError, UnsupportedType, ValidateError};
pub use string::StringType;
pub use value::{ModelValue, PrimitiveType};
