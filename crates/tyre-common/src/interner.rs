//! String interner for identifier names.
//!
//! Every name the syntax tree carries is interned once; the rest of the
//! pipeline compares `Atom`s instead of strings.

use rustc_hash::FxHashMap;
use serde::Serialize;

/// An interned string handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Atom(pub u32);

impl Atom {
    /// The empty name. Anonymous declarations (object types, signatures) use it.
    pub const NONE: Atom = Atom(0);

    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }
}

/// Owns the interned strings. Index 0 is always the empty string.
#[derive(Debug)]
pub struct Interner {
    map: FxHashMap<Box<str>, Atom>,
    strings: Vec<Box<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    #[must_use]
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert(Box::from(""), Atom::NONE);
        Self {
            map,
            strings: vec![Box::from("")],
        }
    }

    /// Intern `text`, returning the existing atom if it was seen before.
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(&atom) = self.map.get(text) {
            return atom;
        }
        let atom = Atom(self.strings.len() as u32);
        self.strings.push(Box::from(text));
        self.map.insert(Box::from(text), atom);
        atom
    }

    /// Look up an already-interned string without inserting it.
    #[must_use]
    pub fn lookup(&self, text: &str) -> Option<Atom> {
        self.map.get(text).copied()
    }

    /// Resolve an atom back to its text. Unknown atoms resolve to "".
    #[must_use]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.strings.get(atom.0 as usize).map_or("", |s| s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.len() <= 1
    }
}
