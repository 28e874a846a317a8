//! `NodeArena`: node storage, parent links, declaration/reference indexes
//! and per-node diagnostics.
//!
//! Nodes are built bottom-up: children are added before their parent, and
//! adding a parent sets the `parent` link of each of its children.

use crate::node::{FunctionBody, Node, NodeIndex, NodeKind, Qualifier};
use lumen_common::limits::TYPE_LIST_INLINE;
use lumen_common::{Diagnostic, Span};
use lumen_model::{DeclId, TypeId};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

type NodeList = SmallVec<[NodeIndex; TYPE_LIST_INLINE]>;

pub struct NodeArena {
    file_name: String,
    nodes: Vec<Node>,
    /// Declaring node of each declaration.
    declarations: FxHashMap<DeclId, NodeIndex>,
    /// Reference nodes of each declaration, in creation order.
    references: FxHashMap<DeclId, NodeList>,
    diagnostics: Vec<(NodeIndex, Diagnostic)>,
}

impl NodeArena {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            nodes: Vec::new(),
            declarations: FxHashMap::default(),
            references: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: NodeIndex) -> Option<&Node> {
        if idx.is_none() {
            return None;
        }
        self.nodes.get(idx.0 as usize)
    }

    #[inline]
    pub fn kind(&self, idx: NodeIndex) -> Option<&NodeKind> {
        self.get(idx).map(|n| &n.kind)
    }

    pub fn span(&self, idx: NodeIndex) -> Span {
        self.get(idx).map_or(Span::DUMMY, |n| n.span)
    }

    pub fn set_span(&mut self, idx: NodeIndex, span: Span) {
        if let Some(node) = self.nodes.get_mut(idx.0 as usize) {
            node.span = span;
        }
    }

    pub fn parent(&self, idx: NodeIndex) -> NodeIndex {
        self.get(idx).map_or(NodeIndex::NONE, |n| n.parent)
    }

    /// Sub-nodes of `idx` in source order.
    pub fn children(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        self.kind(idx).map(NodeKind::children).unwrap_or_default()
    }

    /// The declaration a declaration or reference node denotes. A specifier
    /// statement denotes the declaration of its target.
    pub fn declaration_of(&self, idx: NodeIndex) -> Option<DeclId> {
        match self.kind(idx)? {
            NodeKind::Specifier { target, .. } => self.declaration_of(*target),
            kind => kind.declaration(),
        }
    }

    /// The node that declares `decl`, if it is in this arena.
    pub fn declaring_node(&self, decl: DeclId) -> Option<NodeIndex> {
        self.declarations.get(&decl).copied()
    }

    /// Reference nodes that denote `decl`.
    pub fn references_to(&self, decl: DeclId) -> &[NodeIndex] {
        self.references
            .get(&decl)
            .map_or(&[][..], |refs| refs.as_slice())
    }

    /// Nodes from `idx`'s parent up to the root.
    pub fn ancestors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(Some(self.parent(idx)), |&p| Some(self.parent(p)))
            .take_while(|p| p.is_some())
    }

    pub fn is_ancestor(&self, ancestor: NodeIndex, idx: NodeIndex) -> bool {
        self.ancestors(idx).any(|a| a == ancestor)
    }

    /// Smallest block containing the declaration of `decl` and every
    /// reference to it. Falls back to the outermost ancestor when no block
    /// encloses all of them, or to the declaring node itself at the root.
    pub fn enclosing_scope(&self, decl: DeclId) -> Option<NodeIndex> {
        let declaring = self.declaring_node(decl)?;
        let refs = self.references_to(decl);
        let mut outermost = None;
        for candidate in self.ancestors(declaring) {
            outermost = Some(candidate);
            if !matches!(self.kind(candidate), Some(NodeKind::Block { .. })) {
                continue;
            }
            if refs.iter().all(|&r| self.is_ancestor(candidate, r)) {
                return Some(candidate);
            }
        }
        outermost.or(Some(declaring))
    }

    /// Every node under `root` (inclusive), children before parents.
    pub fn post_order(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![(root, false)];
        while let Some((idx, expanded)) = stack.pop() {
            if idx.is_none() {
                continue;
            }
            if expanded {
                out.push(idx);
                continue;
            }
            stack.push((idx, true));
            for child in self.children(idx).into_iter().rev() {
                stack.push((child, false));
            }
        }
        out
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub fn add_diagnostic(&mut self, idx: NodeIndex, diagnostic: Diagnostic) {
        tracing::debug!(
            node = idx.0,
            code = diagnostic.code,
            message = %diagnostic.message_text,
            "diagnostic"
        );
        self.diagnostics.push((idx, diagnostic));
    }

    /// Attach an error covering `idx`'s span.
    pub fn error(&mut self, idx: NodeIndex, message: String, code: u32) {
        let diagnostic = Diagnostic::error_at(&self.file_name, self.span(idx), message, code);
        self.add_diagnostic(idx, diagnostic);
    }

    pub fn diagnostics_for(&self, idx: NodeIndex) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics
            .iter()
            .filter(move |(node, _)| *node == idx)
            .map(|(_, d)| d)
    }

    /// All diagnostics in the order they were reported.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().map(|(_, d)| d)
    }

    pub fn diagnostic_count(&self) -> usize {
        self.diagnostics.len()
    }

    // =========================================================================
    // Node creation
    // =========================================================================

    /// Add a node, linking its children to it and indexing its declaration.
    pub fn add_node(&mut self, kind: NodeKind, span: Span) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        for child in kind.children() {
            self.set_parent(child, index);
        }
        match &kind {
            NodeKind::Reference { decl, .. } => {
                self.references.entry(*decl).or_default().push(index);
            }
            k => {
                if let Some(decl) = k.declaration() {
                    self.declarations.insert(decl, index);
                }
            }
        }
        self.nodes.push(Node {
            kind,
            span,
            parent: NodeIndex::NONE,
        });
        index
    }

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.nodes.get_mut(child.0 as usize) {
            node.parent = parent;
        }
    }

    fn add(&mut self, kind: NodeKind) -> NodeIndex {
        self.add_node(kind, Span::DUMMY)
    }

    pub fn add_block(&mut self, statements: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeKind::Block { statements })
    }

    /// `T x = initializer;` or a forward declaration `T x;` when
    /// `initializer` is `NONE`.
    pub fn add_value_decl(&mut self, decl: DeclId, initializer: NodeIndex) -> NodeIndex {
        self.add(NodeKind::ValueDecl {
            decl,
            type_clause: NodeIndex::NONE,
            initializer,
        })
    }

    pub fn add_function_decl(
        &mut self,
        decl: DeclId,
        parameters: Vec<NodeIndex>,
        body: FunctionBody,
    ) -> NodeIndex {
        self.add(NodeKind::FunctionDecl {
            decl,
            parameters,
            body,
        })
    }

    pub fn add_getter_decl(&mut self, decl: DeclId, body: NodeIndex) -> NodeIndex {
        self.add(NodeKind::GetterDecl { decl, body })
    }

    pub fn add_class_decl(
        &mut self,
        decl: DeclId,
        parameters: Vec<NodeIndex>,
        extended: NodeIndex,
        satisfied: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeKind::ClassDecl {
            decl,
            parameters,
            extended,
            satisfied,
            body,
        })
    }

    pub fn add_interface_decl(
        &mut self,
        decl: DeclId,
        satisfied: NodeIndex,
        body: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeKind::InterfaceDecl {
            decl,
            satisfied,
            body,
        })
    }

    pub fn add_type_alias_decl(&mut self, decl: DeclId, target: TypeId) -> NodeIndex {
        let target = self.add_static_type(target);
        self.add(NodeKind::TypeAliasDecl { decl, target })
    }

    pub fn add_type_constraint(&mut self, decl: DeclId, satisfied: NodeIndex) -> NodeIndex {
        self.add(NodeKind::TypeConstraint { decl, satisfied })
    }

    pub fn add_parameter(&mut self, decl: DeclId, default: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Parameter { decl, default })
    }

    pub fn add_variable(&mut self, decl: DeclId, initializer: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Variable { decl, initializer })
    }

    /// `decl = value;`
    pub fn add_specifier(&mut self, decl: DeclId, value: NodeIndex) -> NodeIndex {
        let target = self.add_reference(decl);
        self.add(NodeKind::Specifier { target, value })
    }

    pub fn add_expr_stmt(&mut self, expr: NodeIndex) -> NodeIndex {
        self.add(NodeKind::ExprStmt { expr })
    }

    pub fn add_if(
        &mut self,
        condition: NodeIndex,
        then_block: NodeIndex,
        else_block: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeKind::If {
            condition,
            then_block,
            else_block,
        })
    }

    pub fn add_switch(
        &mut self,
        subject: NodeIndex,
        arms: Vec<NodeIndex>,
        default: NodeIndex,
        exhaustive: bool,
    ) -> NodeIndex {
        self.add(NodeKind::Switch {
            subject,
            arms,
            default,
            exhaustive,
        })
    }

    pub fn add_case_arm(&mut self, pattern: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeKind::CaseArm { pattern, body })
    }

    pub fn add_while(&mut self, condition: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeKind::While { condition, body })
    }

    pub fn add_do_while(&mut self, body: NodeIndex, condition: NodeIndex) -> NodeIndex {
        self.add(NodeKind::DoWhile { body, condition })
    }

    pub fn add_for(
        &mut self,
        iterator: NodeIndex,
        iterable: NodeIndex,
        body: NodeIndex,
        fail: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeKind::For {
            iterator,
            iterable,
            body,
            fail,
        })
    }

    pub fn add_try(
        &mut self,
        block: NodeIndex,
        catches: Vec<NodeIndex>,
        finally: NodeIndex,
    ) -> NodeIndex {
        self.add(NodeKind::Try {
            block,
            catches,
            finally,
        })
    }

    pub fn add_catch(&mut self, variable: NodeIndex, body: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Catch { variable, body })
    }

    pub fn add_return(&mut self, value: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Return { value })
    }

    pub fn add_throw(&mut self, value: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Throw { value })
    }

    pub fn add_break(&mut self) -> NodeIndex {
        self.add(NodeKind::Break)
    }

    pub fn add_continue(&mut self) -> NodeIndex {
        self.add(NodeKind::Continue)
    }

    /// Unqualified reference `x`.
    pub fn add_reference(&mut self, decl: DeclId) -> NodeIndex {
        self.add_qualified_reference(decl, Qualifier::Unqualified)
    }

    pub fn add_qualified_reference(&mut self, decl: DeclId, qualifier: Qualifier) -> NodeIndex {
        self.add(NodeKind::Reference { decl, qualifier })
    }

    pub fn add_literal(&mut self) -> NodeIndex {
        self.add(NodeKind::Literal)
    }

    pub fn add_call(&mut self, callee: NodeIndex, arguments: Vec<NodeIndex>) -> NodeIndex {
        self.add(NodeKind::Call { callee, arguments })
    }

    pub fn add_binary(&mut self, left: NodeIndex, right: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Binary { left, right })
    }

    pub fn add_lambda(&mut self, parameters: Vec<NodeIndex>, body: NodeIndex) -> NodeIndex {
        self.add(NodeKind::Lambda { parameters, body })
    }

    pub fn add_static_type(&mut self, ty: TypeId) -> NodeIndex {
        self.add(NodeKind::StaticType { ty })
    }

    /// `extends T(arguments)`
    pub fn add_extended_type(&mut self, ty: TypeId, arguments: Vec<NodeIndex>) -> NodeIndex {
        let ty = self.add_static_type(ty);
        self.add(NodeKind::ExtendedType { ty, arguments })
    }

    /// `satisfies T1 & T2 & ...`
    pub fn add_satisfied_types(&mut self, types: &[TypeId]) -> NodeIndex {
        let types = types.iter().map(|&ty| self.add_static_type(ty)).collect();
        self.add(NodeKind::SatisfiedTypes { types })
    }
}
