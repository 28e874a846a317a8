use super::*;
use lumen_model::DeclFlags;

fn setup() -> (TypeModel, DeclId) {
    let mut model = TypeModel::new("lumen.lang");
    let pkg = model.add_package("app");
    let outer = model.add_function(pkg, None, "run", DeclFlags::TOPLEVEL);
    let x = model.add_value(pkg, Some(outer), "x", DeclFlags::empty());
    (model, x)
}

#[test]
fn test_state_after_initialized_declaration() {
    let (model, x) = setup();
    let mut arena = NodeArena::new("test.lm");
    let lit = arena.add_literal();
    let decl = arena.add_value_decl(x, lit);
    let block = arena.add_block(vec![decl]);

    let state = DefiniteAssignmentChecker::new(&arena, &model, x).final_state(block);
    assert!(state.declared && state.definite && state.possible);
    assert!(!state.barrier && !state.exited);
}

#[test]
fn test_state_after_forward_declaration() {
    let (model, x) = setup();
    let mut arena = NodeArena::new("test.lm");
    let decl = arena.add_value_decl(x, NodeIndex::NONE);
    let block = arena.add_block(vec![decl]);

    let state = DefiniteAssignmentChecker::new(&arena, &model, x).final_state(block);
    assert!(state.declared);
    assert!(!state.definite && !state.possible);
}

#[test]
fn test_loop_body_assignment_does_not_count() {
    let (model, x) = setup();
    let mut arena = NodeArena::new("test.lm");
    let decl = arena.add_value_decl(x, NodeIndex::NONE);
    let lit = arena.add_literal();
    let spec = arena.add_specifier(x, lit);
    let body = arena.add_block(vec![spec]);
    let cond = arena.add_literal();
    let lp = arena.add_while(cond, body);
    let block = arena.add_block(vec![decl, lp]);

    let state = DefiniteAssignmentChecker::new(&arena, &model, x).final_state(block);
    assert!(!state.definite && !state.possible);
    assert!(!state.barrier);
}

#[test]
fn test_diagnostic_message_names_the_declaration() {
    let (model, x) = setup();
    let mut arena = NodeArena::new("test.lm");
    let read = arena.add_reference(x);
    let stmt = arena.add_expr_stmt(read);
    let decl = arena.add_value_decl(x, NodeIndex::NONE);
    let block = arena.add_block(vec![stmt, decl]);

    let diags = DefiniteAssignmentChecker::new(&arena, &model, x).check(block);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].0, read);
    assert_eq!(diags[0].1.message_text, "not yet declared: x");
    assert_eq!(diags[0].1.file, "test.lm");
}
