//! Node handles and node kinds.

use lumen_common::Span;
use lumen_model::{DeclId, TypeId};
use serde::Serialize;

/// Index of a node in a [`NodeArena`](crate::NodeArena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// Absent child.
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// How a reference names its declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Qualifier {
    /// `x`
    Unqualified,
    /// `this.x`
    SelfRef,
    /// `expr.x`: the declaration is reached through another value.
    Expr(NodeIndex),
}

/// Body of a function declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FunctionBody {
    /// `{ ... }`
    Block(NodeIndex),
    /// `=> expr`
    Lazy(NodeIndex),
    /// No body; the function is specified later by a specifier statement.
    Forward,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Block {
        statements: Vec<NodeIndex>,
    },

    // Declarations
    ValueDecl {
        decl: DeclId,
        type_clause: NodeIndex,
        initializer: NodeIndex,
    },
    FunctionDecl {
        decl: DeclId,
        parameters: Vec<NodeIndex>,
        body: FunctionBody,
    },
    GetterDecl {
        decl: DeclId,
        body: NodeIndex,
    },
    ClassDecl {
        decl: DeclId,
        parameters: Vec<NodeIndex>,
        extended: NodeIndex,
        satisfied: NodeIndex,
        body: NodeIndex,
    },
    InterfaceDecl {
        decl: DeclId,
        satisfied: NodeIndex,
        body: NodeIndex,
    },
    TypeAliasDecl {
        decl: DeclId,
        target: NodeIndex,
    },
    /// `given T satisfies ...`
    TypeConstraint {
        decl: DeclId,
        satisfied: NodeIndex,
    },
    Parameter {
        decl: DeclId,
        default: NodeIndex,
    },
    /// `variable T x = ...`
    Variable {
        decl: DeclId,
        initializer: NodeIndex,
    },

    // Statements
    /// `x = value;` where `target` is a [`NodeKind::Reference`].
    Specifier {
        target: NodeIndex,
        value: NodeIndex,
    },
    ExprStmt {
        expr: NodeIndex,
    },
    If {
        condition: NodeIndex,
        then_block: NodeIndex,
        else_block: NodeIndex,
    },
    Switch {
        subject: NodeIndex,
        arms: Vec<NodeIndex>,
        default: NodeIndex,
        /// The arms cover every case of the subject's type.
        exhaustive: bool,
    },
    CaseArm {
        pattern: NodeIndex,
        body: NodeIndex,
    },
    While {
        condition: NodeIndex,
        body: NodeIndex,
    },
    DoWhile {
        body: NodeIndex,
        condition: NodeIndex,
    },
    /// `for (x in iterable) { ... } else { ... }`
    For {
        iterator: NodeIndex,
        iterable: NodeIndex,
        body: NodeIndex,
        fail: NodeIndex,
    },
    Try {
        block: NodeIndex,
        catches: Vec<NodeIndex>,
        finally: NodeIndex,
    },
    Catch {
        variable: NodeIndex,
        body: NodeIndex,
    },
    Return {
        value: NodeIndex,
    },
    Throw {
        value: NodeIndex,
    },
    Break,
    Continue,

    // Expressions
    Reference {
        decl: DeclId,
        qualifier: Qualifier,
    },
    Literal,
    Call {
        callee: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    Binary {
        left: NodeIndex,
        right: NodeIndex,
    },
    /// Anonymous function.
    Lambda {
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    },

    // Type clauses
    /// `extends Base(args)`
    ExtendedType {
        ty: NodeIndex,
        arguments: Vec<NodeIndex>,
    },
    /// `satisfies A & B`
    SatisfiedTypes {
        types: Vec<NodeIndex>,
    },
    /// A type expression resolved to a produced type.
    StaticType {
        ty: TypeId,
    },
}

impl NodeKind {
    /// The declaration a declaration or reference node denotes.
    pub fn declaration(&self) -> Option<DeclId> {
        match self {
            NodeKind::ValueDecl { decl, .. }
            | NodeKind::FunctionDecl { decl, .. }
            | NodeKind::GetterDecl { decl, .. }
            | NodeKind::ClassDecl { decl, .. }
            | NodeKind::InterfaceDecl { decl, .. }
            | NodeKind::TypeAliasDecl { decl, .. }
            | NodeKind::TypeConstraint { decl, .. }
            | NodeKind::Parameter { decl, .. }
            | NodeKind::Variable { decl, .. }
            | NodeKind::Reference { decl, .. } => Some(*decl),
            _ => None,
        }
    }

    /// Whether this node introduces a declaration.
    pub fn is_declaration(&self) -> bool {
        !matches!(self, NodeKind::Reference { .. }) && self.declaration().is_some()
    }

    /// Whether this node declares a type whose supertypes need checking.
    pub fn is_type_declaring(&self) -> bool {
        matches!(
            self,
            NodeKind::ClassDecl { .. }
                | NodeKind::InterfaceDecl { .. }
                | NodeKind::TypeConstraint { .. }
        )
    }

    /// Sub-nodes in source order, skipping absent ones.
    pub fn children(&self) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut push = |idx: NodeIndex| {
            if idx.is_some() {
                out.push(idx);
            }
        };
        match self {
            NodeKind::Block { statements } => statements.iter().copied().for_each(&mut push),
            NodeKind::ValueDecl {
                type_clause,
                initializer,
                ..
            } => {
                push(*type_clause);
                push(*initializer);
            }
            NodeKind::FunctionDecl {
                parameters, body, ..
            } => {
                parameters.iter().copied().for_each(&mut push);
                match body {
                    FunctionBody::Block(b) | FunctionBody::Lazy(b) => push(*b),
                    FunctionBody::Forward => {}
                }
            }
            NodeKind::GetterDecl { body, .. } => push(*body),
            NodeKind::ClassDecl {
                parameters,
                extended,
                satisfied,
                body,
                ..
            } => {
                parameters.iter().copied().for_each(&mut push);
                push(*extended);
                push(*satisfied);
                push(*body);
            }
            NodeKind::InterfaceDecl {
                satisfied, body, ..
            } => {
                push(*satisfied);
                push(*body);
            }
            NodeKind::TypeAliasDecl { target, .. } => push(*target),
            NodeKind::TypeConstraint { satisfied, .. } => push(*satisfied),
            NodeKind::Parameter { default, .. } => push(*default),
            NodeKind::Variable { initializer, .. } => push(*initializer),
            NodeKind::Specifier { target, value } => {
                push(*target);
                push(*value);
            }
            NodeKind::ExprStmt { expr } => push(*expr),
            NodeKind::If {
                condition,
                then_block,
                else_block,
            } => {
                push(*condition);
                push(*then_block);
                push(*else_block);
            }
            NodeKind::Switch {
                subject,
                arms,
                default,
                ..
            } => {
                push(*subject);
                arms.iter().copied().for_each(&mut push);
                push(*default);
            }
            NodeKind::CaseArm { pattern, body } => {
                push(*pattern);
                push(*body);
            }
            NodeKind::While { condition, body } => {
                push(*condition);
                push(*body);
            }
            NodeKind::DoWhile { body, condition } => {
                push(*body);
                push(*condition);
            }
            NodeKind::For {
                iterator,
                iterable,
                body,
                fail,
            } => {
                push(*iterator);
                push(*iterable);
                push(*body);
                push(*fail);
            }
            NodeKind::Try {
                block,
                catches,
                finally,
            } => {
                push(*block);
                catches.iter().copied().for_each(&mut push);
                push(*finally);
            }
            NodeKind::Catch { variable, body } => {
                push(*variable);
                push(*body);
            }
            NodeKind::Return { value } | NodeKind::Throw { value } => push(*value),
            NodeKind::Reference { qualifier, .. } => {
                if let Qualifier::Expr(q) = qualifier {
                    push(*q);
                }
            }
            NodeKind::Call { callee, arguments } => {
                push(*callee);
                arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::Binary { left, right } => {
                push(*left);
                push(*right);
            }
            NodeKind::Lambda { parameters, body } => {
                parameters.iter().copied().for_each(&mut push);
                push(*body);
            }
            NodeKind::ExtendedType { ty, arguments } => {
                push(*ty);
                arguments.iter().copied().for_each(&mut push);
            }
            NodeKind::SatisfiedTypes { types } => types.iter().copied().for_each(&mut push),
            NodeKind::Break | NodeKind::Continue | NodeKind::Literal | NodeKind::StaticType { .. } => {}
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: NodeIndex,
}
