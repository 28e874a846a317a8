//! Runs both analyses over a compilation unit.

use crate::NodeDiagnostic;
use crate::decidability::DecidabilityChecker;
use crate::definite_assignment::DefiniteAssignmentChecker;
use crate::options::CheckerOptions;
use lumen_ast::{NodeArena, NodeIndex};
use lumen_common::Diagnostic;
use lumen_model::{ModelError, TypeModel};

pub struct UnitChecker<'a> {
    arena: &'a mut NodeArena,
    model: &'a mut TypeModel,
    options: CheckerOptions,
}

impl<'a> UnitChecker<'a> {
    pub fn new(arena: &'a mut NodeArena, model: &'a mut TypeModel) -> Self {
        Self::with_options(arena, model, CheckerOptions::default())
    }

    pub fn with_options(
        arena: &'a mut NodeArena,
        model: &'a mut TypeModel,
        options: CheckerOptions,
    ) -> Self {
        Self {
            arena,
            model,
            options,
        }
    }

    pub fn options(&self) -> &CheckerOptions {
        &self.options
    }

    /// Check every declaration under `root`.
    ///
    /// Type-declaring nodes are checked for decidability in post-order, so
    /// nested declarations are repaired before the declarations containing
    /// them. Then each local non-reassignable declaration gets one
    /// definite-assignment pass over its enclosing scope. The diagnostics are
    /// attached to their nodes and also returned.
    pub fn check_unit(&mut self, root: NodeIndex) -> Result<Vec<Diagnostic>, ModelError> {
        let _span = tracing::debug_span!("check_unit", file = %self.arena.file_name()).entered();
        let order = self.arena.post_order(root);
        let mut reported: Vec<NodeDiagnostic> = Vec::new();

        if self.options.check_decidability {
            for &node in &order {
                if !self.arena.kind(node).is_some_and(|k| k.is_type_declaring()) {
                    continue;
                }
                let checker = DecidabilityChecker::new(self.arena, self.model, &self.options);
                reported.extend(checker.check(node)?);
            }
        }

        if self.options.check_definite_assignment {
            for &node in &order {
                let Some(kind) = self.arena.kind(node).filter(|k| k.is_declaration()) else {
                    continue;
                };
                let Some(decl) = kind.declaration() else {
                    continue;
                };
                if !self.model.decl(decl)?.needs_specification_check() {
                    continue;
                }
                let Some(scope) = self.arena.enclosing_scope(decl) else {
                    continue;
                };
                let checker = DefiniteAssignmentChecker::new(self.arena, self.model, decl);
                reported.extend(checker.check(scope));
            }
        }

        tracing::debug!(
            nodes = order.len(),
            diagnostics = reported.len(),
            "unit checked"
        );
        let diagnostics = reported.iter().map(|(_, d)| d.clone()).collect();
        for (node, diagnostic) in reported {
            self.arena.add_diagnostic(node, diagnostic);
        }
        Ok(diagnostics)
    }
}
