//! The `TypeModel`: packages, declarations and the type interner.

use crate::decl::{DeclFlags, DeclId, DeclKind, Declaration, Package, PackageId, Variance};
use crate::error::ModelError;
use crate::intern::TypeInterner;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{TypeData, TypeId, TypeList};
use rustc_hash::FxHashMap;

/// Name of the root of the class hierarchy.
pub const ANYTHING_NAME: &str = "Anything";
/// Name of the class every broken extended type is replaced with.
pub const BASIC_NAME: &str = "Basic";

pub struct TypeModel {
    interner: TypeInterner,
    packages: Vec<Package>,
    decls: Vec<Declaration>,
    core_package: PackageId,
    anything: DeclId,
    basic: DeclId,
}

impl TypeModel {
    /// Create a model whose core package `core_package` holds `Anything` and
    /// `Basic extends Anything`.
    pub fn new(core_package: &str) -> Self {
        let mut model = Self {
            interner: TypeInterner::new(),
            packages: Vec::new(),
            decls: Vec::new(),
            core_package: PackageId(0),
            anything: DeclId(0),
            basic: DeclId(0),
        };
        let core = model.add_package(core_package);
        model.core_package = core;
        model.anything = model.add_class(core, ANYTHING_NAME);
        model.basic = model.add_class(core, BASIC_NAME);
        let anything_type = model.type_of(model.anything);
        model.decls[model.basic.0 as usize].extended_type = Some(anything_type);
        model
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    #[inline]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.decls.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: DeclId) -> Result<&mut Declaration, ModelError> {
        self.decls
            .get_mut(id.0 as usize)
            .ok_or(ModelError::UnknownDeclaration(id))
    }

    pub fn decl(&self, id: DeclId) -> Result<&Declaration, ModelError> {
        self.get(id).ok_or(ModelError::UnknownDeclaration(id))
    }

    /// Name of a declaration, or `<unknown>` for a foreign id.
    pub fn name(&self, id: DeclId) -> &str {
        self.get(id).map_or("<unknown>", |d| d.name.as_str())
    }

    pub fn package(&self, id: PackageId) -> Option<&Package> {
        self.packages.get(id.0 as usize)
    }

    pub fn declarations(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }

    #[inline]
    pub fn lookup(&self, ty: TypeId) -> Option<TypeData> {
        self.interner.lookup(ty)
    }

    pub fn core_package(&self) -> PackageId {
        self.core_package
    }

    pub fn anything_declaration(&self) -> DeclId {
        self.anything
    }

    pub fn basic_declaration(&self) -> DeclId {
        self.basic
    }

    /// The type that replaces an extended type removed during repair.
    pub fn basic_type(&self) -> TypeId {
        self.type_of(self.basic)
    }

    /// Whether `decl` lives in a package whose qualified name starts with one
    /// of `prefixes`.
    pub fn is_in_core_package(&self, decl: DeclId, prefixes: &[String]) -> bool {
        let Some(package) = self.get(decl).and_then(|d| self.package(d.package)) else {
            return false;
        };
        prefixes
            .iter()
            .any(|prefix| package.name.starts_with(prefix.as_str()))
    }

    // =========================================================================
    // Builders
    // =========================================================================

    pub fn add_package(&mut self, name: &str) -> PackageId {
        if let Some(i) = self.packages.iter().position(|p| p.name == name) {
            return PackageId(i as u32);
        }
        self.packages.push(Package {
            name: name.to_string(),
        });
        PackageId((self.packages.len() - 1) as u32)
    }

    pub fn add_declaration(&mut self, decl: Declaration) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        tracing::trace!(?id, name = %decl.name, kind = ?decl.kind, "add_declaration");
        self.decls.push(decl);
        id
    }

    /// Add a toplevel class.
    pub fn add_class(&mut self, package: PackageId, name: &str) -> DeclId {
        let mut decl = Declaration::new(name, DeclKind::Class, package);
        decl.flags |= DeclFlags::TOPLEVEL;
        self.add_declaration(decl)
    }

    /// Add a toplevel interface.
    pub fn add_interface(&mut self, package: PackageId, name: &str) -> DeclId {
        let mut decl = Declaration::new(name, DeclKind::Interface, package);
        decl.flags |= DeclFlags::TOPLEVEL;
        self.add_declaration(decl)
    }

    /// Add a toplevel type alias; its target is set with
    /// [`set_alias_target`](Self::set_alias_target) once its parameters exist.
    pub fn add_type_alias(&mut self, package: PackageId, name: &str) -> DeclId {
        let mut decl = Declaration::new(name, DeclKind::TypeAlias, package);
        decl.flags |= DeclFlags::TOPLEVEL;
        self.add_declaration(decl)
    }

    /// Add a type parameter to `owner`'s parameter list.
    pub fn add_type_parameter(
        &mut self,
        owner: DeclId,
        name: &str,
        variance: Variance,
    ) -> Result<DeclId, ModelError> {
        let package = self.decl(owner)?.package;
        let mut decl = Declaration::new(name, DeclKind::TypeParameter, package);
        decl.container = Some(owner);
        decl.variance = variance;
        let id = self.add_declaration(decl);
        self.get_mut(owner)?.type_parameters.push(id);
        Ok(id)
    }

    /// Add a value binding. `flags` decides whether it is watched by the
    /// definite-assignment analysis.
    pub fn add_value(
        &mut self,
        package: PackageId,
        container: Option<DeclId>,
        name: &str,
        flags: DeclFlags,
    ) -> DeclId {
        self.add_local(package, container, name, DeclKind::Value, flags)
    }

    pub fn add_function(
        &mut self,
        package: PackageId,
        container: Option<DeclId>,
        name: &str,
        flags: DeclFlags,
    ) -> DeclId {
        self.add_local(package, container, name, DeclKind::Function, flags)
    }

    /// Add a value, function or getter nested in `container` (or toplevel
    /// when `container` is `None`).
    pub fn add_local(
        &mut self,
        package: PackageId,
        container: Option<DeclId>,
        name: &str,
        kind: DeclKind,
        flags: DeclFlags,
    ) -> DeclId {
        let mut decl = Declaration::new(name, kind, package);
        decl.container = container;
        decl.flags = flags;
        self.add_declaration(decl)
    }

    /// Mark `param` as the self type of its owner.
    pub fn set_self_type(&mut self, param: DeclId) -> Result<(), ModelError> {
        let decl = self.decl(param)?;
        if decl.kind != DeclKind::TypeParameter {
            return Err(ModelError::NotATypeParameter {
                name: decl.name.clone(),
            });
        }
        let owner = decl.container;
        self.get_mut(param)?.self_type_of = owner;
        Ok(())
    }

    pub fn set_extended_type(&mut self, decl: DeclId, ty: TypeId) -> Result<(), ModelError> {
        let d = self.get_mut(decl)?;
        if d.kind != DeclKind::Class {
            return Err(ModelError::NoSupertypes {
                name: d.name.clone(),
            });
        }
        d.extended_type = Some(ty);
        Ok(())
    }

    /// Append to the satisfied types of a class or interface, or to the
    /// upper bounds of a type parameter.
    pub fn add_satisfied_type(&mut self, decl: DeclId, ty: TypeId) -> Result<(), ModelError> {
        let d = self.get_mut(decl)?;
        if !matches!(
            d.kind,
            DeclKind::Class | DeclKind::Interface | DeclKind::TypeParameter
        ) {
            return Err(ModelError::NoSupertypes {
                name: d.name.clone(),
            });
        }
        d.satisfied_types.push(ty);
        Ok(())
    }

    pub fn set_alias_target(&mut self, alias: DeclId, target: TypeId) -> Result<(), ModelError> {
        let d = self.get_mut(alias)?;
        if d.kind != DeclKind::TypeAlias {
            return Err(ModelError::NoSupertypes {
                name: d.name.clone(),
            });
        }
        d.alias_target = Some(target);
        Ok(())
    }

    // =========================================================================
    // Type construction
    // =========================================================================

    /// Apply a class, interface or alias to type arguments.
    pub fn apply(&self, decl: DeclId, args: &[TypeId]) -> Result<TypeId, ModelError> {
        let d = self.decl(decl)?;
        if !d.kind.is_generic_capable() {
            return Err(ModelError::NotGeneric {
                name: d.name.clone(),
            });
        }
        if d.type_parameters.len() != args.len() {
            return Err(ModelError::ArityMismatch {
                name: d.name.clone(),
                expected: d.type_parameters.len(),
                found: args.len(),
            });
        }
        Ok(self.interner.intern(TypeData::Applied {
            decl,
            args: args.iter().copied().collect(),
        }))
    }

    /// A reference to a type parameter.
    pub fn param_type(&self, param: DeclId) -> Result<TypeId, ModelError> {
        let d = self.decl(param)?;
        if d.kind != DeclKind::TypeParameter {
            return Err(ModelError::NotATypeParameter {
                name: d.name.clone(),
            });
        }
        Ok(self.interner.intern(TypeData::Param(param)))
    }

    /// The declaration's own type: a generic declaration applied to its own
    /// type parameters, or the parameter reference for a type parameter.
    pub fn type_of(&self, decl: DeclId) -> TypeId {
        match self.get(decl) {
            Some(d) if d.kind == DeclKind::TypeParameter => {
                self.interner.intern(TypeData::Param(decl))
            }
            Some(d) => {
                let args: TypeList = d
                    .type_parameters
                    .iter()
                    .map(|&p| self.interner.intern(TypeData::Param(p)))
                    .collect();
                self.interner.intern(TypeData::Applied { decl, args })
            }
            None => TypeId::NOTHING,
        }
    }

    #[inline]
    pub fn nothing(&self) -> TypeId {
        TypeId::NOTHING
    }

    pub fn union(&self, members: &[TypeId]) -> TypeId {
        self.interner.union(members.iter().copied())
    }

    pub fn intersection(&self, members: &[TypeId]) -> TypeId {
        self.interner.intersection(members.iter().copied())
    }

    /// Supertypes of `decl` in declaration order: the extended type, then
    /// satisfied types (bounds, for a type parameter), or the alias target.
    pub fn supertypes_of(&self, decl: DeclId) -> Vec<TypeId> {
        let Some(d) = self.get(decl) else {
            return Vec::new();
        };
        if d.kind == DeclKind::TypeAlias {
            return d.alias_target.into_iter().collect();
        }
        d.supertypes().collect()
    }

    // =========================================================================
    // Substitution and alias resolution
    // =========================================================================

    /// Map from `decl`'s type parameters to `args`, position by position.
    pub(crate) fn argument_map(&self, decl: DeclId, args: &[TypeId]) -> FxHashMap<DeclId, TypeId> {
        self.get(decl)
            .map(|d| {
                d.type_parameters
                    .iter()
                    .copied()
                    .zip(args.iter().copied())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Replace type-parameter references in `ty` according to `map`.
    pub fn substitute(&self, ty: TypeId, map: &FxHashMap<DeclId, TypeId>) -> TypeId {
        if map.is_empty() {
            return ty;
        }
        match self.lookup(ty) {
            Some(TypeData::Param(p)) => map.get(&p).copied().unwrap_or(ty),
            Some(TypeData::Applied { decl, args }) => {
                let args: TypeList = args.iter().map(|&a| self.substitute(a, map)).collect();
                self.interner.intern(TypeData::Applied { decl, args })
            }
            Some(TypeData::Union(members)) => self
                .interner
                .union(members.iter().map(|&m| self.substitute(m, map))),
            Some(TypeData::Intersection(members)) => self
                .interner
                .intersection(members.iter().map(|&m| self.substitute(m, map))),
            Some(TypeData::Nothing) | None => ty,
        }
    }

    /// Expand every alias in `ty`, including aliases nested in type
    /// arguments, substituting alias arguments into alias targets.
    ///
    /// A circular alias is left unexpanded at the point where it recurs.
    pub fn resolve_aliases(&self, ty: TypeId) -> TypeId {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::AliasResolution);
        self.resolve_aliases_inner(ty, &mut guard)
    }

    fn resolve_aliases_inner(&self, ty: TypeId, guard: &mut RecursionGuard<DeclId>) -> TypeId {
        match self.lookup(ty) {
            Some(TypeData::Applied { decl, args }) => {
                let args: TypeList = args
                    .iter()
                    .map(|&a| self.resolve_aliases_inner(a, guard))
                    .collect();
                let alias_target = self
                    .get(decl)
                    .filter(|d| d.kind == DeclKind::TypeAlias)
                    .and_then(|d| d.alias_target);
                let Some(target) = alias_target else {
                    return self.interner.intern(TypeData::Applied { decl, args });
                };
                match guard.enter(decl) {
                    RecursionResult::Entered => {
                        let map = self.argument_map(decl, &args);
                        let expanded = self.substitute(target, &map);
                        let resolved = self.resolve_aliases_inner(expanded, guard);
                        guard.leave(decl);
                        resolved
                    }
                    denied => {
                        tracing::debug!(alias = %self.name(decl), ?denied, "alias expansion stopped");
                        self.interner.intern(TypeData::Applied { decl, args })
                    }
                }
            }
            Some(TypeData::Union(members)) => self.interner.union(
                members
                    .iter()
                    .map(|&m| self.resolve_aliases_inner(m, guard))
                    .collect::<TypeList>(),
            ),
            Some(TypeData::Intersection(members)) => self.interner.intersection(
                members
                    .iter()
                    .map(|&m| self.resolve_aliases_inner(m, guard))
                    .collect::<TypeList>(),
            ),
            _ => ty,
        }
    }

    // =========================================================================
    // Supertype repair
    // =========================================================================

    /// Remove the first occurrence of `ty` from `decl`'s satisfied types.
    pub fn remove_satisfied_type(&mut self, decl: DeclId, ty: TypeId) -> Result<bool, ModelError> {
        let d = self.get_mut(decl)?;
        let Some(pos) = d.satisfied_types.iter().position(|&t| t == ty) else {
            return Ok(false);
        };
        d.satisfied_types.remove(pos);
        tracing::debug!(decl = %d.name, ?ty, "removed satisfied type");
        Ok(true)
    }

    /// Replace `decl`'s extended type with the basic type.
    pub fn reset_extended_type(&mut self, decl: DeclId) -> Result<(), ModelError> {
        let basic = self.basic_type();
        let d = self.get_mut(decl)?;
        d.extended_type = Some(basic);
        tracing::debug!(decl = %d.name, "extended type reset to basic type");
        Ok(())
    }

    pub fn add_broken_supertype(&mut self, decl: DeclId, ty: TypeId) -> Result<(), ModelError> {
        self.get_mut(decl)?.broken_supertypes.push(ty);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
