//! Illegal self-type occurrences.
//!
//! A self type of a declaration being defined may be passed as a type
//! argument only where the receiving parameter is itself a self type, or
//! where the argument position is covariant.

use crate::DefiningSet;
use crate::decl::{DeclId, Variance};
use crate::model::TypeModel;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::types::{TypeData, TypeId};

impl TypeModel {
    /// Self-type parameters of declarations in `defining` that appear as type
    /// arguments in an illegal position of `ty`. Each parameter is reported
    /// once.
    pub fn illegal_self_type_occurrences(
        &self,
        ty: TypeId,
        defining: &DefiningSet,
    ) -> Vec<DeclId> {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeArgumentScan);
        let mut found = Vec::new();
        self.scan_self_types(ty, Variance::Covariant, defining, &mut guard, &mut found);
        found
    }

    fn scan_self_types(
        &self,
        ty: TypeId,
        polarity: Variance,
        defining: &DefiningSet,
        guard: &mut RecursionGuard<TypeId>,
        found: &mut Vec<DeclId>,
    ) {
        let Some(data) = self.lookup(ty) else {
            return;
        };
        let (decl, args) = match data {
            TypeData::Applied { decl, args } => (decl, args),
            TypeData::Union(members) | TypeData::Intersection(members) => {
                for member in members {
                    self.scan_self_types(member, polarity, defining, guard, found);
                }
                return;
            }
            TypeData::Param(_) | TypeData::Nothing => return,
        };
        let Some(params) = self.get(decl).map(|d| d.type_parameters.clone()) else {
            return;
        };
        if guard
            .scope(ty, |guard| {
                for (&param, &arg) in params.iter().zip(args.iter()) {
                    let Some(param_decl) = self.get(param) else {
                        continue;
                    };
                    let position = polarity.compose(param_decl.variance);
                    let illegal = self
                        .defining_self_type(arg, defining)
                        .filter(|p| !found.contains(p))
                        .filter(|_| !param_decl.is_self_type() && position != Variance::Covariant);
                    if let Some(self_param) = illegal {
                        tracing::debug!(
                            param = %self.name(self_param),
                            supertype = %self.name(decl),
                            "illegal self type occurrence"
                        );
                        found.push(self_param);
                    }
                    self.scan_self_types(arg, position, defining, guard, found);
                }
            })
            .is_err()
        {
            tracing::debug!(?ty, "self type scan stopped");
        }
    }

    /// `ty` as a self-type parameter whose owner (or itself) is being defined.
    fn defining_self_type(&self, ty: TypeId, defining: &DefiningSet) -> Option<DeclId> {
        let TypeData::Param(param) = self.lookup(ty)? else {
            return None;
        };
        let owner = self.get(param)?.self_type_of?;
        (defining.contains(&owner) || defining.contains(&param)).then_some(param)
    }
}
