//! Character classes and password generation.

pub mod charset;
mod generate;

pub use charset::{CharClass, Classes, DEFAULT_SYMBOLS, Registry};
pub use generate::{GenerationRequest, Password, generate, generate_password, generate_with};
