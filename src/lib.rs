//! Strong password generation with guaranteed class coverage.
//!
//! The generator draws every character and every shuffle index from a
//! cryptographically secure source. History and settings are caller-side
//! state and never touched by the generator.

pub mod error;
pub mod history;
pub mod pass;
pub mod rand;
pub mod settings;

pub use error::{Error, InvalidRequest, Result};
pub use history::History;
pub use pass::{
    CharClass, Classes, DEFAULT_SYMBOLS, GenerationRequest, Password, Registry, generate,
    generate_password, generate_with,
};
pub use settings::Settings;
