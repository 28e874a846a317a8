//! Parent links, indexes, scopes and diagnostics of `NodeArena`.

use lumen_ast::{FunctionBody, NodeArena, NodeIndex, NodeKind, Qualifier};
use lumen_common::Span;
use lumen_model::DeclId;

const X: DeclId = DeclId(10);
const F: DeclId = DeclId(11);
const OBJ: DeclId = DeclId(12);

#[test]
fn test_children_are_linked_to_parent() {
    let mut arena = NodeArena::new("test.lm");
    let lit = arena.add_literal();
    let decl = arena.add_value_decl(X, lit);
    let block = arena.add_block(vec![decl]);

    assert_eq!(arena.parent(lit), decl);
    assert_eq!(arena.parent(decl), block);
    assert_eq!(arena.parent(block), NodeIndex::NONE);
    assert_eq!(arena.children(block), vec![decl]);
    assert_eq!(arena.children(decl), vec![lit]);
    assert_eq!(arena.ancestors(lit).collect::<Vec<_>>(), vec![decl, block]);
}

#[test]
fn test_declaration_links() {
    let mut arena = NodeArena::new("test.lm");
    let decl = arena.add_value_decl(X, NodeIndex::NONE);
    let lit = arena.add_literal();
    let spec = arena.add_specifier(X, lit);
    let read = arena.add_reference(X);

    assert_eq!(arena.declaration_of(decl), Some(X));
    assert_eq!(arena.declaration_of(spec), Some(X));
    assert_eq!(arena.declaration_of(read), Some(X));
    assert_eq!(arena.declaration_of(lit), None);
    assert_eq!(arena.declaring_node(X), Some(decl));
    assert_eq!(arena.references_to(X).len(), 2);
    assert!(arena.references_to(F).is_empty());
}

#[test]
fn test_specifier_children_are_target_then_value() {
    let mut arena = NodeArena::new("test.lm");
    let lit = arena.add_literal();
    let spec = arena.add_specifier(X, lit);
    let children = arena.children(spec);
    assert_eq!(children.len(), 2);
    assert!(matches!(
        arena.kind(children[0]),
        Some(NodeKind::Reference { decl, qualifier: Qualifier::Unqualified }) if *decl == X
    ));
    assert_eq!(children[1], lit);
}

#[test]
fn test_qualified_reference_child_is_qualifier_only() {
    let mut arena = NodeArena::new("test.lm");
    let obj = arena.add_reference(OBJ);
    let member = arena.add_qualified_reference(X, Qualifier::Expr(obj));
    let this_member = arena.add_qualified_reference(X, Qualifier::SelfRef);
    assert_eq!(arena.children(member), vec![obj]);
    assert!(arena.children(this_member).is_empty());
    assert_eq!(arena.parent(obj), member);
}

#[test]
fn test_function_body_children() {
    let mut arena = NodeArena::new("test.lm");
    let body = arena.add_block(vec![]);
    let with_block = arena.add_function_decl(F, vec![], FunctionBody::Block(body));
    assert_eq!(arena.children(with_block), vec![body]);

    let forward = arena.add_function_decl(DeclId(20), vec![], FunctionBody::Forward);
    assert!(arena.children(forward).is_empty());
}

#[test]
fn test_enclosing_scope_is_smallest_block_covering_all_references() {
    let mut arena = NodeArena::new("test.lm");
    // {
    //   value x = 1;
    //   if (c) { print(x); }
    // }
    // print(x);   <- outside the inner block only in the outer scope
    let lit = arena.add_literal();
    let decl = arena.add_value_decl(X, lit);
    let read = arena.add_reference(X);
    let stmt = arena.add_expr_stmt(read);
    let then_block = arena.add_block(vec![stmt]);
    let cond = arena.add_literal();
    let if_stmt = arena.add_if(cond, then_block, NodeIndex::NONE);
    let inner = arena.add_block(vec![decl, if_stmt]);
    assert_eq!(arena.enclosing_scope(X), Some(inner));

    let outer_read = arena.add_reference(X);
    let outer_stmt = arena.add_expr_stmt(outer_read);
    let outer = arena.add_block(vec![inner, outer_stmt]);
    assert_eq!(arena.enclosing_scope(X), Some(outer));
    assert_eq!(arena.enclosing_scope(F), None);
}

#[test]
fn test_post_order_visits_children_first() {
    let mut arena = NodeArena::new("test.lm");
    let a = arena.add_literal();
    let b = arena.add_literal();
    let bin = arena.add_binary(a, b);
    let stmt = arena.add_expr_stmt(bin);
    let block = arena.add_block(vec![stmt]);
    assert_eq!(arena.post_order(block), vec![a, b, bin, stmt, block]);
}

#[test]
fn test_diagnostics_are_attached_to_nodes() {
    let mut arena = NodeArena::new("test.lm");
    let read = arena.add_reference(X);
    let other = arena.add_literal();
    arena.set_span(read, Span::new(4, 9));
    arena.error(read, "not yet declared: x".to_string(), 3001);

    let diags: Vec<_> = arena.diagnostics_for(read).collect();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].file, "test.lm");
    assert_eq!(diags[0].start, 4);
    assert_eq!(diags[0].length, 5);
    assert_eq!(diags[0].code, 3001);
    assert_eq!(arena.diagnostics_for(other).count(), 0);
    assert_eq!(arena.all_diagnostics().count(), 1);
}

#[test]
fn test_type_clause_builders() {
    let mut arena = NodeArena::new("test.lm");
    let ty = lumen_model::TypeId(3);
    let sat = arena.add_satisfied_types(&[ty, lumen_model::TypeId(4)]);
    let children = arena.children(sat);
    assert_eq!(children.len(), 2);
    assert!(matches!(
        arena.kind(children[0]),
        Some(NodeKind::StaticType { ty: t }) if *t == ty
    ));
    let arg = arena.add_literal();
    let ext = arena.add_extended_type(ty, vec![arg]);
    assert_eq!(arena.children(ext).len(), 2);
}
