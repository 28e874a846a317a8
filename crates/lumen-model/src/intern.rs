//! Type interning.
//!
//! Types are stored once in an insertion-ordered set; a `TypeId` is the
//! index of its data. Interning takes `&self` so queries that build new types
//! (alias expansion, substitution) can run while the model is only borrowed
//! immutably. The interner is single-threaded.

use crate::types::{TypeData, TypeId, TypeList};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use std::cell::RefCell;

pub struct TypeInterner {
    types: RefCell<IndexSet<TypeData, FxBuildHasher>>,
}

impl TypeInterner {
    pub fn new() -> Self {
        let mut types = IndexSet::with_hasher(FxBuildHasher);
        types.insert(TypeData::Nothing);
        Self {
            types: RefCell::new(types),
        }
    }

    pub fn intern(&self, data: TypeData) -> TypeId {
        let (index, _) = self.types.borrow_mut().insert_full(data);
        TypeId(index as u32)
    }

    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.types.borrow().get_index(id.0 as usize).cloned()
    }

    pub fn len(&self) -> usize {
        self.types.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Union with nested unions flattened and duplicates removed. A single
    /// member collapses to that member; no members is `Nothing`.
    pub fn union(&self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let flat = self.flatten(members, |data| match data {
            TypeData::Union(inner) => Some(inner.clone()),
            _ => None,
        });
        match flat.len() {
            0 => TypeId::NOTHING,
            1 => flat[0],
            _ => self.intern(TypeData::Union(flat)),
        }
    }

    /// Intersection, flattened and deduplicated like [`union`](Self::union).
    pub fn intersection(&self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let members: TypeList = members.into_iter().collect();
        if members.contains(&TypeId::NOTHING) {
            return TypeId::NOTHING;
        }
        let flat = self.flatten(members, |data| match data {
            TypeData::Intersection(inner) => Some(inner.clone()),
            _ => None,
        });
        match flat.len() {
            0 => TypeId::NOTHING,
            1 => flat[0],
            _ => self.intern(TypeData::Intersection(flat)),
        }
    }

    fn flatten(
        &self,
        members: impl IntoIterator<Item = TypeId>,
        nested: impl Fn(&TypeData) -> Option<TypeList>,
    ) -> TypeList {
        let mut out = TypeList::new();
        for member in members {
            let inner = self.lookup(member).as_ref().and_then(&nested);
            match inner {
                Some(inner) => {
                    for t in inner {
                        if !out.contains(&t) {
                            out.push(t);
                        }
                    }
                }
                None => {
                    if member != TypeId::NOTHING && !out.contains(&member) {
                        out.push(member);
                    }
                }
            }
        }
        out
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
