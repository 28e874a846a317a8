//! Recursive supertype definitions.
//!
//! Both queries answer "does this supertype lead back to a declaration that
//! is currently being defined?" and return the declarations on the path, the
//! defining declaration first. An empty result means no recursion.
//!
//! - The **raw** walk follows declarations only and ignores type arguments.
//! - The **full** walk substitutes type arguments into each supertype before
//!   following it, so recursion that only appears through an alias or a type
//!   parameter is found too.

use crate::DefiningSet;
use crate::decl::DeclId;
use crate::model::TypeModel;
use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::types::{TypeData, TypeId};
use lumen_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE, TYPE_LIST_INLINE};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

pub(crate) type DeclList = SmallVec<[DeclId; TYPE_LIST_INLINE]>;

/// State of one raw walk. Declarations stay in `visited` after they are
/// left, so each one is expanded at most once per query.
struct RawWalk<'d> {
    defining: &'d DefiningSet,
    visited: FxHashSet<DeclId>,
    path: Vec<DeclId>,
}

/// State of one full walk. `explored` holds types whose supertypes were
/// followed to the end without reaching `defining`.
struct FullWalk<'d> {
    defining: &'d DefiningSet,
    guard: RecursionGuard<TypeId>,
    explored: FxHashSet<TypeId>,
    path: Vec<DeclId>,
}

impl TypeModel {
    /// Declarations whose raw supertype graph reaches `ty` back into
    /// `defining`.
    pub fn recursive_raw_type_definition(
        &self,
        ty: TypeId,
        defining: &DefiningSet,
    ) -> Vec<DeclId> {
        let mut walk = RawWalk {
            defining,
            visited: FxHashSet::default(),
            path: Vec::new(),
        };
        for head in self.head_declarations(ty) {
            if self.raw_walk(head, &mut walk) {
                break;
            }
        }
        tracing::trace!(?ty, found = walk.path.len(), "recursive_raw_type_definition");
        walk.path
    }

    fn raw_walk(&self, decl: DeclId, walk: &mut RawWalk<'_>) -> bool {
        if walk.defining.contains(&decl) {
            walk.path.push(decl);
            return true;
        }
        if !walk.visited.insert(decl) {
            return false;
        }
        let found = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || {
            self.supertypes_of(decl).into_iter().any(|supertype| {
                self.head_declarations(supertype)
                    .into_iter()
                    .any(|head| self.raw_walk(head, walk))
            })
        });
        if found {
            walk.path.push(decl);
        }
        found
    }

    /// Declarations through which `ty`, with type arguments substituted,
    /// leads back into `defining`.
    ///
    /// A walk that runs out of depth or iterations (supertypes that keep
    /// growing, like `Grow<T> satisfies Grow<Grow<T>>`) is assumed to be
    /// recursive; the result then lists the declarations it went through.
    pub fn recursive_type_definition(
        &self,
        ty: TypeId,
        defining: &DefiningSet,
    ) -> Vec<DeclId> {
        let mut walk = FullWalk {
            defining,
            guard: RecursionGuard::with_profile(RecursionProfile::SupertypeWalk),
            explored: FxHashSet::default(),
            path: Vec::new(),
        };
        self.full_walk(ty, &mut walk);
        let mut seen = FxHashSet::default();
        walk.path.retain(|&decl| seen.insert(decl));
        tracing::trace!(?ty, found = walk.path.len(), "recursive_type_definition");
        walk.path
    }

    fn full_walk(&self, ty: TypeId, walk: &mut FullWalk<'_>) -> bool {
        let Some(data) = self.lookup(ty) else {
            return false;
        };
        match data {
            TypeData::Nothing => false,
            TypeData::Union(members) | TypeData::Intersection(members) => members
                .iter()
                .any(|&member| self.full_walk(member, walk)),
            TypeData::Param(param) => {
                if walk.defining.contains(&param) {
                    walk.path.push(param);
                    return true;
                }
                self.full_walk_supertypes(ty, param, &[], walk)
            }
            TypeData::Applied { decl, args } => {
                if walk.defining.contains(&decl) {
                    walk.path.push(decl);
                    return true;
                }
                self.full_walk_supertypes(ty, decl, &args, walk)
            }
        }
    }

    fn full_walk_supertypes(
        &self,
        ty: TypeId,
        decl: DeclId,
        args: &[TypeId],
        walk: &mut FullWalk<'_>,
    ) -> bool {
        if walk.explored.contains(&ty) {
            return false;
        }
        match walk.guard.enter(ty) {
            RecursionResult::Entered => {}
            RecursionResult::Cycle => return false,
            denied => {
                tracing::debug!(
                    decl = %self.name(decl),
                    ?denied,
                    "supertype walk exhausted, assuming recursion"
                );
                walk.path.push(decl);
                return true;
            }
        }
        let map = self.argument_map(decl, args);
        let found = self
            .supertypes_of(decl)
            .into_iter()
            .map(|supertype| self.substitute(supertype, &map))
            .any(|supertype| self.full_walk(supertype, walk));
        walk.guard.leave(ty);
        if found {
            walk.path.push(decl);
        } else {
            walk.explored.insert(ty);
        }
        found
    }

    /// Declarations heading `ty`: the applied declaration, the referenced
    /// type parameter, or the heads of every union/intersection member.
    pub(crate) fn head_declarations(&self, ty: TypeId) -> DeclList {
        let mut heads = DeclList::new();
        self.collect_heads(ty, &mut heads);
        heads
    }

    fn collect_heads(&self, ty: TypeId, heads: &mut DeclList) {
        match self.lookup(ty) {
            Some(TypeData::Applied { decl, .. }) | Some(TypeData::Param(decl)) => {
                if !heads.contains(&decl) {
                    heads.push(decl);
                }
            }
            Some(TypeData::Union(members)) | Some(TypeData::Intersection(members)) => {
                for member in members {
                    self.collect_heads(member, heads);
                }
            }
            Some(TypeData::Nothing) | None => {}
        }
    }
}
