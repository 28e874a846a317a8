//! Declarations and packages.

use crate::types::TypeId;
use bitflags::bitflags;
use serde::Serialize;

/// Stable identity of a declaration for the lifetime of a compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeclId(pub u32);

/// Identity of a package.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PackageId(pub u32);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Package {
    /// Fully qualified name, e.g. `lumen.lang`.
    pub name: String,
}

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u32 {
        /// Declared directly in a package.
        const TOPLEVEL = 1 << 0;
        /// Declared in the body of a class or interface.
        const MEMBER = 1 << 1;
        /// A parameter of a function or class.
        const PARAMETER = 1 << 2;
        /// Reassignable binding (`variable`).
        const VARIABLE = 1 << 3;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    Value,
    Function,
    Getter,
    Class,
    Interface,
    TypeAlias,
    TypeParameter,
}

impl DeclKind {
    /// Kinds that introduce a type and may carry supertypes.
    pub const fn is_type_declaration(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::TypeAlias | Self::TypeParameter
        )
    }

    /// Kinds that can be applied to type arguments.
    pub const fn is_generic_capable(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::TypeAlias)
    }
}

/// Declaration-site variance of a type parameter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Variance {
    #[default]
    Invariant,
    /// `out T`
    Covariant,
    /// `in T`
    Contravariant,
}

impl Variance {
    /// Polarity of a position nested at `inner` inside a position of polarity
    /// `self`.
    #[must_use]
    pub const fn compose(self, inner: Variance) -> Variance {
        match (self, inner) {
            (Variance::Invariant, _) | (_, Variance::Invariant) => Variance::Invariant,
            (Variance::Covariant, v) => v,
            (Variance::Contravariant, Variance::Covariant) => Variance::Contravariant,
            (Variance::Contravariant, Variance::Contravariant) => Variance::Covariant,
        }
    }
}

/// A named, type-bearing entity.
///
/// Fields that only make sense for some kinds stay empty for the others: a
/// value has no supertypes, a class has no alias target, and so on. For a
/// type parameter, `satisfied_types` holds its upper bounds.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub flags: DeclFlags,
    pub package: PackageId,
    pub container: Option<DeclId>,
    pub type_parameters: Vec<DeclId>,
    pub extended_type: Option<TypeId>,
    pub satisfied_types: Vec<TypeId>,
    /// Supertypes removed because they made the hierarchy circular.
    pub broken_supertypes: Vec<TypeId>,
    pub alias_target: Option<TypeId>,
    /// Declared variance (type parameters only).
    pub variance: Variance,
    /// For a type parameter: the declaration whose self type it is.
    pub self_type_of: Option<DeclId>,
}

impl Declaration {
    pub fn new(name: impl Into<String>, kind: DeclKind, package: PackageId) -> Self {
        Self {
            name: name.into(),
            kind,
            flags: DeclFlags::empty(),
            package,
            container: None,
            type_parameters: Vec::new(),
            extended_type: None,
            satisfied_types: Vec::new(),
            broken_supertypes: Vec::new(),
            alias_target: None,
            variance: Variance::Invariant,
            self_type_of: None,
        }
    }

    #[inline]
    pub fn is_toplevel(&self) -> bool {
        self.flags.contains(DeclFlags::TOPLEVEL)
    }

    #[inline]
    pub fn is_member(&self) -> bool {
        self.flags.contains(DeclFlags::MEMBER)
    }

    #[inline]
    pub fn is_parameter(&self) -> bool {
        self.flags.contains(DeclFlags::PARAMETER)
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        self.flags.contains(DeclFlags::VARIABLE)
    }

    #[inline]
    pub fn is_self_type(&self) -> bool {
        self.self_type_of.is_some()
    }

    /// Whether the definite-assignment analysis should watch this
    /// declaration: a local, non-reassignable, non-parameter binding.
    pub fn needs_specification_check(&self) -> bool {
        !self.is_toplevel()
            && !self.is_member()
            && !self.is_parameter()
            && !self.is_variable()
            && !matches!(self.kind, DeclKind::TypeAlias | DeclKind::TypeParameter)
    }

    /// Extended type first, then satisfied types, in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = TypeId> + '_ {
        self.extended_type
            .into_iter()
            .chain(self.satisfied_types.iter().copied())
    }
}
