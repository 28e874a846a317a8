//! Decidability of subtyping under contravariance.
//!
//! Subtype checking against a supertype can fail to terminate when a type
//! with a contravariant parameter is nested in another contravariant
//! position, as in `Comparable<Comparable<T>>` with `Comparable<in Other>`.

use crate::decl::{DeclId, Variance};
use crate::model::TypeModel;
use crate::recursion::{RecursionGuard, RecursionProfile};
use crate::types::{TypeData, TypeId};

impl TypeModel {
    /// Generic declarations whose contravariant parameter is instantiated in
    /// a contravariant position of `ty`. Empty means `ty` is decidable.
    ///
    /// Aliases should be resolved first (see
    /// [`resolve_aliases`](Self::resolve_aliases)).
    pub fn check_decidability(&self, ty: TypeId) -> Vec<DeclId> {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::TypeArgumentScan);
        let mut errors = Vec::new();
        self.scan_variance(ty, Variance::Covariant, &mut guard, &mut errors);
        errors
    }

    fn scan_variance(
        &self,
        ty: TypeId,
        polarity: Variance,
        guard: &mut RecursionGuard<TypeId>,
        errors: &mut Vec<DeclId>,
    ) {
        match self.lookup(ty) {
            Some(TypeData::Applied { decl, args }) => {
                let Some(params) = self.get(decl).map(|d| d.type_parameters.clone()) else {
                    return;
                };
                let scanned = guard.scope(ty, |guard| {
                    for (&param, &arg) in params.iter().zip(args.iter()) {
                        let variance = self.get(param).map_or(Variance::Invariant, |p| p.variance);
                        if polarity == Variance::Contravariant
                            && variance == Variance::Contravariant
                        {
                            if !errors.contains(&decl) {
                                errors.push(decl);
                            }
                            continue;
                        }
                        self.scan_variance(arg, polarity.compose(variance), guard, errors);
                    }
                });
                if scanned.is_err() {
                    tracing::debug!(?ty, "variance scan stopped");
                }
            }
            Some(TypeData::Union(members)) | Some(TypeData::Intersection(members)) => {
                for member in members {
                    self.scan_variance(member, polarity, guard, errors);
                }
            }
            Some(TypeData::Param(_)) | Some(TypeData::Nothing) | None => {}
        }
    }
}
