//! Supertype decidability: circular inheritance, illegal self types and
//! undecidable variance.
//!
//! Runs once per class, interface or type constraint, after its clauses have
//! resolved to produced types. Every supertype found unsound is reported on
//! its clause and then removed from the model (an extended type is replaced
//! by the basic type), so later subtype computations see a well-founded
//! hierarchy. The check never aborts and never iterates to a fixpoint.

use crate::NodeDiagnostic;
use crate::options::CheckerOptions;
use lumen_ast::{NodeArena, NodeIndex, NodeKind};
use lumen_common::Diagnostic;
use lumen_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use lumen_model::{DeclId, DefiningSet, ModelError, TypeId, TypeModel};
use smallvec::SmallVec;

/// One supertype expression of the checked declaration.
#[derive(Clone, Copy, Debug)]
struct Supertype {
    /// `ExtendedType` or `SatisfiedTypes` clause node.
    clause: NodeIndex,
    /// The `StaticType` node inside the clause.
    node: NodeIndex,
    ty: TypeId,
    extended: bool,
}

pub struct DecidabilityChecker<'a> {
    arena: &'a NodeArena,
    model: &'a mut TypeModel,
    options: &'a CheckerOptions,
    diagnostics: Vec<NodeDiagnostic>,
}

impl<'a> DecidabilityChecker<'a> {
    pub fn new(
        arena: &'a NodeArena,
        model: &'a mut TypeModel,
        options: &'a CheckerOptions,
    ) -> Self {
        Self {
            arena,
            model,
            options,
            diagnostics: Vec::new(),
        }
    }

    /// Check the type-declaring node `node`, repairing the model in place.
    pub fn check(mut self, node: NodeIndex) -> Result<Vec<NodeDiagnostic>, ModelError> {
        let arena = self.arena;
        let Some(kind) = arena.kind(node) else {
            return Ok(self.diagnostics);
        };
        let Some(decl) = kind.declaration().filter(|_| kind.is_type_declaring()) else {
            return Ok(self.diagnostics);
        };
        let _span =
            tracing::debug_span!("decidability", decl = %self.model.name(decl)).entered();

        let supertypes = self.supertypes(kind);
        let defining: DefiningSet = std::iter::once(decl).collect();

        if self.check_raw_recursion(decl, &supertypes, &defining)? {
            return Ok(self.diagnostics);
        }

        let exempt = self
            .model
            .is_in_core_package(decl, &self.options.exempt_core_packages);
        for supertype in &supertypes {
            let mut broken = false;
            if self.check_recursion(decl, supertype, &defining) && !exempt {
                broken = true;
            }
            if self.check_self_types(decl, supertype, &defining) && !exempt {
                broken = true;
            }
            if self.check_variance(supertype) {
                broken = true;
            }
            if broken {
                self.repair(decl, supertype)?;
            }
        }
        Ok(self.diagnostics)
    }

    /// Satisfied types in order, then the extended type.
    fn supertypes(&self, kind: &NodeKind) -> SmallVec<[Supertype; 4]> {
        let (extended, satisfied) = match kind {
            NodeKind::ClassDecl {
                extended,
                satisfied,
                ..
            } => (*extended, *satisfied),
            NodeKind::InterfaceDecl { satisfied, .. }
            | NodeKind::TypeConstraint { satisfied, .. } => (NodeIndex::NONE, *satisfied),
            _ => (NodeIndex::NONE, NodeIndex::NONE),
        };

        let mut out = SmallVec::new();
        if let Some(NodeKind::SatisfiedTypes { types }) = self.arena.kind(satisfied) {
            for &node in types {
                if let Some(ty) = self.static_type(node) {
                    out.push(Supertype {
                        clause: satisfied,
                        node,
                        ty,
                        extended: false,
                    });
                }
            }
        }
        if let Some(NodeKind::ExtendedType { ty: node, .. }) = self.arena.kind(extended) {
            if let Some(ty) = self.static_type(*node) {
                out.push(Supertype {
                    clause: extended,
                    node: *node,
                    ty,
                    extended: true,
                });
            }
        }
        out
    }

    fn static_type(&self, node: NodeIndex) -> Option<TypeId> {
        match self.arena.kind(node)? {
            NodeKind::StaticType { ty } => Some(*ty),
            _ => None,
        }
    }

    /// Raw-recursion pass. Returns whether any supertype was circular, in
    /// which case the remaining checks are skipped.
    fn check_raw_recursion(
        &mut self,
        decl: DeclId,
        supertypes: &[Supertype],
        defining: &DefiningSet,
    ) -> Result<bool, ModelError> {
        let mut circular = false;
        for supertype in supertypes {
            let path = self
                .model
                .recursive_raw_type_definition(supertype.ty, defining);
            if path.is_empty() {
                continue;
            }
            circular = true;
            let name = self.model.name(decl).to_string();
            let involving = self.model.type_list(&path);
            self.report(
                supertype.clause,
                format_message(
                    diagnostic_messages::INHERITANCE_IS_CIRCULAR,
                    &[&name, &involving],
                ),
                diagnostic_codes::INHERITANCE_IS_CIRCULAR,
            );
            self.repair(decl, supertype)?;
        }
        Ok(circular)
    }

    fn check_recursion(
        &mut self,
        decl: DeclId,
        supertype: &Supertype,
        defining: &DefiningSet,
    ) -> bool {
        let path = self.model.recursive_type_definition(supertype.ty, defining);
        if path.is_empty() {
            return false;
        }
        let name = self.model.name(decl).to_string();
        let involving = self.model.type_list(&path);
        let rendered = self.model.type_name(supertype.ty);
        self.report(
            supertype.node,
            format_message(
                diagnostic_messages::INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE,
                &[&name, &involving, &rendered],
            ),
            diagnostic_codes::INHERITANCE_IS_CIRCULAR_IN_SUPERTYPE,
        );
        true
    }

    fn check_self_types(
        &mut self,
        decl: DeclId,
        supertype: &Supertype,
        defining: &DefiningSet,
    ) -> bool {
        let illegal = self
            .model
            .illegal_self_type_occurrences(supertype.ty, defining);
        if illegal.is_empty() {
            return false;
        }
        let rendered = self.model.type_name(supertype.ty);
        let name = self.model.name(decl).to_string();
        self.report(
            supertype.node,
            format_message(
                diagnostic_messages::SELF_TYPE_APPEARS_AS_ARGUMENT_IN_SUPERTYPE,
                &[&rendered, &name],
            ),
            diagnostic_codes::SELF_TYPE_APPEARS_AS_ARGUMENT_IN_SUPERTYPE,
        );
        true
    }

    /// One diagnostic per generic declaration found in a contravariant
    /// location of the alias-resolved supertype.
    fn check_variance(&mut self, supertype: &Supertype) -> bool {
        let resolved = self.model.resolve_aliases(supertype.ty);
        let errors = self.model.check_decidability(resolved);
        let rendered = self.model.type_name(supertype.ty);
        for &offender in &errors {
            let name = self.model.name(offender).to_string();
            self.report(
                supertype.node,
                format_message(
                    diagnostic_messages::CONTRAVARIANT_TYPE_PARAMETER_IN_CONTRAVARIANT_LOCATION,
                    &[&name, &rendered],
                ),
                diagnostic_codes::CONTRAVARIANT_TYPE_PARAMETER_IN_CONTRAVARIANT_LOCATION,
            );
        }
        !errors.is_empty()
    }

    /// Drop `supertype` from `decl` and record it as broken.
    fn repair(&mut self, decl: DeclId, supertype: &Supertype) -> Result<(), ModelError> {
        if supertype.extended {
            self.model.reset_extended_type(decl)?;
        } else {
            self.model.remove_satisfied_type(decl, supertype.ty)?;
        }
        self.model.add_broken_supertype(decl, supertype.ty)?;
        tracing::debug!(
            decl = %self.model.name(decl),
            supertype = %self.model.type_name(supertype.ty),
            "removed undecidable supertype"
        );
        Ok(())
    }

    fn report(&mut self, node: NodeIndex, message: String, code: u32) {
        let diagnostic = Diagnostic::error_at(
            self.arena.file_name(),
            self.arena.span(node),
            message,
            code,
        );
        self.diagnostics.push((node, diagnostic));
    }
}
