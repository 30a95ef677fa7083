//! Password generation.

use std::fmt;

use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::{debug, trace};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::charset::{CharClass, Classes, Registry};
use crate::error::{InvalidRequest, Result};
use crate::rand;

/// What to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub classes: Classes,
    /// Replaces the default symbol set when present.
    pub symbols: Option<String>,
}

impl GenerationRequest {
    pub fn new(length: usize, classes: Classes) -> Self {
        Self {
            length,
            classes,
            symbols: None,
        }
    }

    pub fn with_symbols(mut self, symbols: impl Into<String>) -> Self {
        self.symbols = Some(symbols.into());
        self
    }

    /// Check the request and build the registry it draws from.
    pub fn validate(&self) -> std::result::Result<Registry, InvalidRequest> {
        let classes = self.classes.count();
        if classes == 0 {
            return Err(InvalidRequest::NoClasses);
        }
        if self.length < classes {
            return Err(InvalidRequest::LengthTooShort {
                length: self.length,
                classes,
            });
        }

        let registry = match &self.symbols {
            Some(symbols) => Registry::with_symbols(symbols),
            None => Registry::new(),
        };
        if self.classes.symbols && registry.members_of(CharClass::Symbol).is_empty() {
            return Err(InvalidRequest::EmptySymbolSet);
        }
        Ok(registry)
    }
}

/// A generated password. Wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, which is what the request's `length` counts.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.0)
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Password(<{} chars>)", self.char_count())
    }
}

/// Generate with the operating system's secure source.
pub fn generate(request: &GenerationRequest) -> Result<Password> {
    generate_with(request, &mut OsRng)
}

/// Generate from flags, the shape front ends usually hold.
pub fn generate_password(
    length: usize,
    classes: Classes,
    symbols: Option<&str>,
) -> Result<Password> {
    let mut request = GenerationRequest::new(length, classes);
    request.symbols = symbols.map(str::to_owned);
    generate(&request)
}

/// Generate with a caller-supplied secure source.
///
/// One character is drawn from each selected class in class order, the rest
/// come from the union of all selected sets, and the whole sequence is then
/// shuffled. Fails before drawing anything if the request is invalid.
pub fn generate_with<R>(request: &GenerationRequest, rng: &mut R) -> Result<Password>
where
    R: RngCore + CryptoRng + ?Sized,
{
    let registry = request.validate()?;
    let selected = request.classes.count();

    debug!(
        length = request.length,
        classes = selected,
        custom_symbols = request.symbols.is_some(),
        "generating password"
    );

    let mut working: Zeroizing<Vec<char>> = Zeroizing::new(Vec::with_capacity(request.length));
    for class in request.classes.iter() {
        working.push(rand::choice(rng, registry.members_of(class))?);
    }

    let pool: Zeroizing<Vec<char>> = Zeroizing::new(registry.pool(&request.classes));
    trace!(pool = pool.len(), fill = request.length - selected, "filling from pool");
    for _ in selected..request.length {
        working.push(rand::choice(rng, pool.as_slice())?);
    }

    rand::shuffle(rng, working.as_mut_slice())?;

    Ok(Password(working.iter().collect()))
}
