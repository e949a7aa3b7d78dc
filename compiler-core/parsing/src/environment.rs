//! Named character set and regular expression macros.

use position::Position;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use syntax::{CharSet, RExp};

use crate::ParseError;

/// A mapping from macro names to values; later definitions win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroEnv<V> {
    macros: FxHashMap<SmolStr, V>,
}

pub type SetMacros = MacroEnv<CharSet>;
pub type RegexMacros = MacroEnv<RExp>;

impl<V> Default for MacroEnv<V> {
    fn default() -> MacroEnv<V> {
        let macros = FxHashMap::default();
        MacroEnv { macros }
    }
}

impl<V> MacroEnv<V> {
    pub fn lookup(&self, name: &str) -> Option<&V> {
        self.macros.get(name)
    }

    /// Defines `name`, returning the value it previously had.
    pub fn define(&mut self, name: impl Into<SmolStr>, value: V) -> Option<V> {
        self.macros.insert(name.into(), value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &V)> {
        self.macros.iter()
    }
}

impl MacroEnv<CharSet> {
    /// Resolves a `$name` reference found at `position`.
    pub fn resolve(&self, position: Position, name: &str) -> Result<CharSet, ParseError> {
        self.lookup(name).cloned().ok_or_else(|| ParseError::unknown_set_macro(position, name))
    }
}

impl MacroEnv<RExp> {
    /// Resolves a `%name` reference.
    pub fn resolve(&self, name: &str) -> Result<RExp, ParseError> {
        self.lookup(name).cloned().ok_or_else(|| ParseError::unknown_regex_macro(name))
    }
}

impl<K: Into<SmolStr>, V> FromIterator<(K, V)> for MacroEnv<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> MacroEnv<V> {
        let macros = iter.into_iter().map(|(name, value)| (name.into(), value)).collect();
        MacroEnv { macros }
    }
}

impl<K: Into<SmolStr>, V> Extend<(K, V)> for MacroEnv<V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.macros.extend(iter.into_iter().map(|(name, value)| (name.into(), value)));
    }
}
