//! Definite-assignment analysis for one non-reassignable local declaration.
//!
//! The checker walks the declaration's enclosing scope once, threading a
//! [`FlowState`] through the statements, and reports:
//! - reads and specifications before the declaration (3001)
//! - reads before definite assignment (3002)
//! - specifications from loops, nested bodies or the declaration itself (3003)
//! - specifications when a value may already be assigned (3004)

use crate::NodeDiagnostic;
use crate::flow_state::FlowState;
use lumen_ast::{FunctionBody, NodeArena, NodeIndex, NodeKind, Qualifier};
use lumen_common::Diagnostic;
use lumen_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use lumen_common::limits::{STACK_GROWTH_SIZE, STACK_RED_ZONE};
use lumen_model::{DeclId, TypeModel};
use smallvec::SmallVec;

pub struct DefiniteAssignmentChecker<'a> {
    arena: &'a NodeArena,
    target: DeclId,
    name: &'a str,
    state: FlowState,
    diagnostics: Vec<NodeDiagnostic>,
}

impl<'a> DefiniteAssignmentChecker<'a> {
    pub fn new(arena: &'a NodeArena, model: &'a TypeModel, target: DeclId) -> Self {
        Self {
            arena,
            target,
            name: model.name(target),
            state: FlowState::initial(),
            diagnostics: Vec::new(),
        }
    }

    /// Walk `scope` and return the diagnostics, in source order.
    pub fn check(mut self, scope: NodeIndex) -> Vec<NodeDiagnostic> {
        let _span = tracing::debug_span!("definite_assignment", decl = %self.name).entered();
        self.walk(scope);
        tracing::trace!(state = ?self.state, "final flow state");
        self.diagnostics
    }

    /// Flow state after walking `scope`, for inspection in tests and tools.
    pub fn final_state(mut self, scope: NodeIndex) -> FlowState {
        self.walk(scope);
        self.state
    }

    fn report(&mut self, node: NodeIndex, template: &str, code: u32) {
        let message = format_message(template, &[self.name]);
        let diagnostic = Diagnostic::error_at(
            self.arena.file_name(),
            self.arena.span(node),
            message,
            code,
        );
        self.diagnostics.push((node, diagnostic));
    }

    fn walk(&mut self, idx: NodeIndex) {
        if idx.is_none() {
            return;
        }
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROWTH_SIZE, || self.walk_node(idx));
    }

    fn walk_all(&mut self, nodes: &[NodeIndex]) {
        for &node in nodes {
            self.walk(node);
        }
    }

    fn walk_children(&mut self, idx: NodeIndex) {
        let children = self.arena.children(idx);
        self.walk_all(&children);
    }

    fn walk_node(&mut self, idx: NodeIndex) {
        let arena = self.arena;
        let Some(kind) = arena.kind(idx) else {
            return;
        };
        match kind {
            NodeKind::Reference { decl, qualifier } => match qualifier {
                Qualifier::Expr(primary) => self.walk(*primary),
                Qualifier::Unqualified | Qualifier::SelfRef => {
                    if *decl == self.target {
                        self.check_read(idx);
                    }
                }
            },
            NodeKind::Specifier { target, value } => self.walk_specifier(idx, *target, *value),

            NodeKind::Return { value } | NodeKind::Throw { value } => {
                self.walk(*value);
                self.state = self.state.exit();
            }
            NodeKind::Break | NodeKind::Continue => {
                self.state = self.state.exit();
            }

            NodeKind::If {
                condition,
                then_block,
                else_block,
            } => self.walk_if(*condition, *then_block, *else_block),
            NodeKind::Switch {
                subject,
                arms,
                default,
                exhaustive,
            } => self.walk_switch(*subject, arms, *default, *exhaustive),

            NodeKind::While { condition, body } => self.walk_loop(&[*condition, *body]),
            NodeKind::DoWhile { body, condition } => self.walk_loop(&[*body, *condition]),
            NodeKind::For {
                iterator,
                iterable,
                body,
                fail,
            } => {
                self.walk_loop(&[*iterator, *iterable, *body]);
                if fail.is_some() {
                    let after_loop = self.state;
                    self.walk(*fail);
                    self.state = self.state.restore_partial(after_loop);
                }
            }
            NodeKind::Try {
                block,
                catches,
                finally,
            } => self.walk_try(*block, catches, *finally),

            NodeKind::Lambda { .. } => self.walk_nested(idx),
            k if k.is_declaration() => {
                if k.declaration() == Some(self.target) {
                    self.walk_own_declaration(idx, k);
                } else {
                    self.walk_nested(idx);
                }
            }
            _ => self.walk_children(idx),
        }
    }

    fn check_read(&mut self, node: NodeIndex) {
        if !self.state.declared {
            self.report(
                node,
                diagnostic_messages::NOT_YET_DECLARED,
                diagnostic_codes::NOT_YET_DECLARED,
            );
        } else if !self.state.definite {
            self.report(
                node,
                diagnostic_messages::NOT_DEFINITELY_ASSIGNED,
                diagnostic_codes::NOT_DEFINITELY_ASSIGNED,
            );
        }
    }

    fn walk_specifier(&mut self, idx: NodeIndex, target: NodeIndex, value: NodeIndex) {
        let specifies_target = matches!(
            self.arena.kind(target),
            Some(NodeKind::Reference {
                decl,
                qualifier: Qualifier::Unqualified | Qualifier::SelfRef,
            }) if *decl == self.target
        );
        if !specifies_target {
            self.walk(target);
            self.walk(value);
            return;
        }

        let state = self.state;
        let legal = if !state.declared {
            self.report(
                idx,
                diagnostic_messages::NOT_YET_DECLARED,
                diagnostic_codes::NOT_YET_DECLARED,
            );
            false
        } else if state.barrier {
            self.report(
                idx,
                diagnostic_messages::CANNOT_SPECIFY_VALUE_FROM_HERE,
                diagnostic_codes::CANNOT_SPECIFY_VALUE_FROM_HERE,
            );
            false
        } else if state.possible {
            self.report(
                idx,
                diagnostic_messages::NOT_DEFINITELY_UNASSIGNED,
                diagnostic_codes::NOT_DEFINITELY_UNASSIGNED,
            );
            false
        } else {
            true
        };

        if legal {
            self.walk(value);
            self.state = self.state.assigned();
            self.walk(target);
        }
    }

    fn walk_if(&mut self, condition: NodeIndex, then_block: NodeIndex, else_block: NodeIndex) {
        self.walk(condition);
        let entry = self.state;

        self.walk(then_block);
        let then_state = self.state;
        self.state = entry;

        let else_state = if else_block.is_some() {
            self.walk(else_block);
            self.state
        } else {
            entry
        };
        self.state = FlowState::join(entry, &[then_state, else_state]);
    }

    fn walk_switch(
        &mut self,
        subject: NodeIndex,
        arms: &[NodeIndex],
        default: NodeIndex,
        exhaustive: bool,
    ) {
        self.walk(subject);
        let entry = self.state;
        let mut outcomes: SmallVec<[FlowState; 8]> = SmallVec::new();
        let default_arm = default.is_some().then_some(default);
        for arm in arms.iter().copied().chain(default_arm) {
            self.state = entry;
            self.walk(arm);
            outcomes.push(self.state);
        }
        if default.is_none() && !exhaustive {
            outcomes.push(entry);
        }
        self.state = FlowState::join(entry, &outcomes);
    }

    /// Loop header and body: assignment is forbidden inside, and the body may
    /// run zero times.
    fn walk_loop(&mut self, parts: &[NodeIndex]) {
        let entry = self.state;
        self.state = entry.with_barrier();
        self.walk_all(parts);
        self.state = FlowState::after_loop(entry, self.state);
    }

    fn walk_try(&mut self, block: NodeIndex, catches: &[NodeIndex], finally: NodeIndex) {
        let entry = self.state;
        self.walk(block);
        // Any statement of the try block may throw into a catch clause, so
        // with catch clauses nothing in the block is definite afterwards.
        if !catches.is_empty() {
            self.state = self.state.restore_partial(entry);
            for &catch in catches {
                self.walk(catch);
                self.state = self.state.restore_partial(entry);
            }
        }
        if finally.is_some() {
            let declared = self.state.declared;
            self.walk(finally);
            self.state.declared = declared;
        }
    }

    /// Another declaration or an anonymous function: its body cannot assign
    /// the watched value, and nothing inside leaks out.
    fn walk_nested(&mut self, idx: NodeIndex) {
        let entry = self.state;
        self.state = entry.with_barrier();
        self.walk_children(idx);
        self.state = entry;
    }

    /// The watched declaration itself.
    fn walk_own_declaration(&mut self, idx: NodeIndex, kind: &NodeKind) {
        let assigned_on_entry = matches!(
            kind,
            NodeKind::FunctionDecl {
                body: FunctionBody::Block(_),
                ..
            } | NodeKind::GetterDecl { .. }
                | NodeKind::ClassDecl { .. }
                | NodeKind::InterfaceDecl { .. }
        );
        let assigned_after = match kind {
            NodeKind::ValueDecl { initializer, .. } => initializer.is_some(),
            NodeKind::FunctionDecl {
                body: FunctionBody::Lazy(_),
                ..
            } => true,
            NodeKind::Parameter { .. } | NodeKind::Variable { .. } => true,
            _ => false,
        };

        if assigned_on_entry {
            self.state = FlowState {
                declared: true,
                ..self.state
            }
            .assigned();
        }
        let before = self.state;
        self.state = before.with_barrier();
        self.walk_children(idx);

        self.state = before.declared();
        if assigned_after {
            self.state = self.state.assigned();
        }
        tracing::trace!(state = ?self.state, "declaration passed");
    }
}

#[cfg(test)]
#[path = "../tests/definite_assignment_unit_tests.rs"]
mod tests;
