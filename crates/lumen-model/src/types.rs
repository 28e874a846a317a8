//! Produced type representation.

use crate::decl::DeclId;
use lumen_common::limits::TYPE_LIST_INLINE;
use serde::Serialize;
use smallvec::SmallVec;

/// Interned type handle. Equal ids mean structurally equal types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The bottom type; pre-registered by every interner.
    pub const NOTHING: TypeId = TypeId(0);
}

pub type TypeList = SmallVec<[TypeId; TYPE_LIST_INLINE]>;

/// Structural type data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeData {
    Nothing,
    /// A class, interface or alias applied to type arguments.
    Applied { decl: DeclId, args: TypeList },
    /// A reference to a type parameter.
    Param(DeclId),
    Union(TypeList),
    Intersection(TypeList),
}

impl TypeData {
    /// The declaration this type is headed by, for applied types and
    /// type-parameter references.
    pub fn declaration(&self) -> Option<DeclId> {
        match self {
            TypeData::Applied { decl, .. } | TypeData::Param(decl) => Some(*decl),
            _ => None,
        }
    }
}
