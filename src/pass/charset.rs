//! Character classes and their member sets.

use std::fmt;

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

/// Punctuation used for the symbol class unless the caller overrides it.
pub const DEFAULT_SYMBOLS: &str = "!@#$%^&*()-_=+[]{};:,.<>?/~`";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl CharClass {
    /// Every class, in the order the generator walks them.
    pub const ALL: [CharClass; 4] = [
        CharClass::Lowercase,
        CharClass::Uppercase,
        CharClass::Digit,
        CharClass::Symbol,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CharClass::Lowercase => "lowercase",
            CharClass::Uppercase => "uppercase",
            CharClass::Digit => "digits",
            CharClass::Symbol => "symbols",
        };
        f.write_str(name)
    }
}

/// Which classes a password must draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classes {
    pub lowercase: bool,
    pub uppercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Classes {
    pub const NONE: Classes = Classes {
        lowercase: false,
        uppercase: false,
        digits: false,
        symbols: false,
    };

    pub const ALL: Classes = Classes {
        lowercase: true,
        uppercase: true,
        digits: true,
        symbols: true,
    };

    pub fn contains(&self, class: CharClass) -> bool {
        match class {
            CharClass::Lowercase => self.lowercase,
            CharClass::Uppercase => self.uppercase,
            CharClass::Digit => self.digits,
            CharClass::Symbol => self.symbols,
        }
    }

    pub fn set(&mut self, class: CharClass, on: bool) {
        match class {
            CharClass::Lowercase => self.lowercase = on,
            CharClass::Uppercase => self.uppercase = on,
            CharClass::Digit => self.digits = on,
            CharClass::Symbol => self.symbols = on,
        }
    }

    /// Selected classes in stable order: lowercase, uppercase, digits, symbols.
    pub fn iter(&self) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL.into_iter().filter(move |&c| self.contains(c))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl Default for Classes {
    fn default() -> Self {
        Classes::ALL
    }
}

impl FromIterator<CharClass> for Classes {
    fn from_iter<I: IntoIterator<Item = CharClass>>(iter: I) -> Self {
        let mut classes = Classes::NONE;
        for class in iter {
            classes.set(class, true);
        }
        classes
    }
}

/// Member sets for every class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    sets: [Vec<char>; 4],
}

impl Registry {
    pub fn new() -> Self {
        Self::with_symbols(DEFAULT_SYMBOLS)
    }

    /// Registry whose symbol class is `symbols`. Characters are kept in the
    /// given order, duplicates included.
    pub fn with_symbols(symbols: &str) -> Self {
        Self {
            sets: [
                LOWERCASE.chars().collect(),
                UPPERCASE.chars().collect(),
                DIGITS.chars().collect(),
                symbols.chars().collect(),
            ],
        }
    }

    pub fn members_of(&self, class: CharClass) -> &[char] {
        &self.sets[class.index()]
    }

    /// Union of the selected classes' sets, concatenated in class order.
    pub fn pool(&self, classes: &Classes) -> Vec<char> {
        classes
            .iter()
            .flat_map(|c| self.members_of(c).iter().copied())
            .collect()
    }

    /// Which classes contain `c`. More than one when sets overlap.
    pub fn classes_of(&self, c: char) -> impl Iterator<Item = CharClass> + '_ {
        CharClass::ALL
            .into_iter()
            .filter(move |&class| self.members_of(class).contains(&c))
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets() {
        let reg = Registry::new();
        assert_eq!(reg.members_of(CharClass::Lowercase).len(), 26);
        assert_eq!(reg.members_of(CharClass::Uppercase).len(), 26);
        assert_eq!(reg.members_of(CharClass::Digit).len(), 10);
        assert_eq!(
            reg.members_of(CharClass::Symbol).iter().collect::<String>(),
            DEFAULT_SYMBOLS
        );
        assert!(reg.members_of(CharClass::Lowercase).iter().all(char::is_ascii_lowercase));
        assert!(reg.members_of(CharClass::Digit).iter().all(char::is_ascii_digit));
    }

    #[test]
    fn symbol_override() {
        let reg = Registry::with_symbols("#€");
        assert_eq!(reg.members_of(CharClass::Symbol), &['#', '€']);
        assert_eq!(reg.members_of(CharClass::Uppercase).len(), 26);
    }

    #[test]
    fn iteration_order_is_stable() {
        let classes = Classes {
            lowercase: false,
            ..Classes::ALL
        };
        let order: Vec<_> = classes.iter().collect();
        assert_eq!(
            order,
            vec![CharClass::Uppercase, CharClass::Digit, CharClass::Symbol]
        );

        let collected: Classes = [CharClass::Symbol, CharClass::Lowercase].into_iter().collect();
        let order: Vec<_> = collected.iter().collect();
        assert_eq!(order, vec![CharClass::Lowercase, CharClass::Symbol]);
        assert_eq!(collected.count(), 2);
        assert!(Classes::NONE.is_empty());
    }

    #[test]
    fn pool_keeps_overlaps() {
        let reg = Registry::with_symbols("a1");
        let pool = reg.pool(&Classes::ALL);
        assert_eq!(pool.len(), 26 + 26 + 10 + 2);
        assert_eq!(pool.iter().filter(|&&c| c == 'a').count(), 2);

        let classes: Vec<_> = reg.classes_of('1').collect();
        assert_eq!(classes, vec![CharClass::Digit, CharClass::Symbol]);
    }
}
