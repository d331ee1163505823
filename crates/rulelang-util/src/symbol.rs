//! String interning for identifiers and keywords.
//!
//! Identifiers and keyword lexemes repeat constantly across a source
//! file (`if`, `let`, field names), so the tokenizer interns them into
//! a compact, `Copy` handle instead of carrying owned `String`s through
//! every AST node the visitor framework rewrites. Interning uses
//! `DashMap` rather than a `RefCell<HashMap>` so a `Symbol` stays `Sync`
//! even though nothing in this crate currently interns from more than
//! one thread — the global table is process-wide, not per-lexer.

use dashmap::DashMap;
use std::fmt;
use std::hash::{BuildHasherDefault, Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

/// A compact, interned handle to a string.
///
/// Two `Symbol`s compare equal if and only if they were interned from
/// equal strings; comparison and `Clone` are both `O(1)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `text`, returning the symbol for it.
    ///
    /// Repeated calls with equal strings return the same `Symbol`.
    pub fn intern(text: &str) -> Self {
        table().intern(text)
    }

    /// The string this symbol was interned from.
    pub fn as_str(&self) -> &'static str {
        table().resolve(*self)
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn table() -> &'static StringTable {
    static TABLE: OnceLock<StringTable> = OnceLock::new();
    TABLE.get_or_init(StringTable::new)
}

type AHashBuilder = BuildHasherDefault<ahash::AHasher>;

struct StringTable {
    by_hash: DashMap<u64, (&'static str, u32), AHashBuilder>,
    by_index: DashMap<u32, &'static str, AHashBuilder>,
    next: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            by_hash: DashMap::with_hasher(AHashBuilder::default()),
            by_index: DashMap::with_hasher(AHashBuilder::default()),
            next: AtomicU32::new(0),
        }
    }

    fn intern(&self, text: &str) -> Symbol {
        let hash = Self::hash(text);
        if let Some(entry) = self.by_hash.get(&hash) {
            if entry.0 == text {
                return Symbol(entry.1);
            }
        }

        match self.by_hash.entry(hash) {
            dashmap::mapref::entry::Entry::Occupied(entry) => {
                if entry.get().0 == text {
                    Symbol(entry.get().1)
                } else {
                    self.insert_with_probing(text, hash)
                }
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
                let index = self.next.fetch_add(1, Ordering::Relaxed);
                entry.insert((leaked, index));
                self.by_index.insert(index, leaked);
                Symbol(index)
            }
        }
    }

    /// Resolve a hash collision between `text` and whatever already
    /// occupies `original_hash`'s slot: linearly probe forward by a
    /// fixed golden-ratio stride until either `text` itself turns up
    /// (someone else interned it concurrently under a probed slot) or an
    /// empty slot is found. Never overwrites a live slot — that would
    /// silently reassign an already-issued `Symbol` to a different
    /// string.
    fn insert_with_probing(&self, text: &str, original_hash: u64) -> Symbol {
        const MAX_PROBES: u64 = 32;
        const PROBE_STRIDE: u64 = 0x9e3779b97f4a7c15;

        let mut probe_hash = original_hash;
        for _ in 0..MAX_PROBES {
            probe_hash = probe_hash.wrapping_add(PROBE_STRIDE);
            match self.by_hash.entry(probe_hash) {
                dashmap::mapref::entry::Entry::Occupied(entry) => {
                    if entry.get().0 == text {
                        return Symbol(entry.get().1);
                    }
                }
                dashmap::mapref::entry::Entry::Vacant(entry) => {
                    let leaked: &'static str = Box::leak(text.to_owned().into_boxed_str());
                    let index = self.next.fetch_add(1, Ordering::Relaxed);
                    entry.insert((leaked, index));
                    self.by_index.insert(index, leaked);
                    return Symbol(index);
                }
            }
        }

        unreachable!(
            "exhausted {MAX_PROBES} probes interning {text:?}; the process has interned \
             an implausible number of colliding strings"
        )
    }

    fn resolve(&self, symbol: Symbol) -> &'static str {
        *self
            .by_index
            .get(&symbol.0)
            .expect("Symbol always refers to a live interner entry")
    }

    fn hash(text: &str) -> u64 {
        let mut hasher = ahash::AHasher::default();
        text.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_the_same_symbol() {
        let a = Symbol::intern("field");
        let b = Symbol::intern("field");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_to_different_symbols() {
        assert_ne!(Symbol::intern("a"), Symbol::intern("b"));
    }

    #[test]
    fn round_trips_through_as_str() {
        let s = Symbol::intern("when");
        assert_eq!(s.as_str(), "when");
    }

    #[test]
    fn a_hash_collision_does_not_overwrite_the_earlier_string() {
        let table = StringTable::new();
        let shared_hash = StringTable::hash("A");

        let leaked: &'static str = Box::leak("A".to_owned().into_boxed_str());
        let a = Symbol(table.next.fetch_add(1, Ordering::Relaxed));
        table.by_hash.insert(shared_hash, (leaked, a.0));
        table.by_index.insert(a.0, leaked);

        // "B" collides with "A"'s slot by construction (not with ahash's
        // real digest); `intern` must probe to a fresh slot for "B"
        // rather than overwrite "A"'s entry.
        let b = table.insert_with_probing("B", shared_hash);

        assert_ne!(a, b);
        assert_eq!(table.resolve(a), "A");
        assert_eq!(table.resolve(b), "B");

        // "A" interned again must still find its original slot untouched.
        assert_eq!(table.intern("A"), a);
    }

    proptest::proptest! {
        #[test]
        fn interning_any_string_round_trips(text in "\\PC{1,64}") {
            let symbol = Symbol::intern(&text);
            proptest::prop_assert_eq!(symbol.as_str(), text.as_str());
        }

        #[test]
        fn equal_strings_always_intern_equal(text in "\\PC{1,64}") {
            let a = Symbol::intern(&text);
            let b = Symbol::intern(&text);
            proptest::prop_assert_eq!(a, b);
        }
    }
}
