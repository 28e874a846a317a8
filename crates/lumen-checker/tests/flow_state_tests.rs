use super::*;

fn declared() -> FlowState {
    FlowState::initial().declared()
}

#[test]
fn test_initial_state_blocks_assignment() {
    let s = FlowState::initial();
    assert!(!s.declared);
    assert!(s.barrier);
    assert!(!s.definite && !s.possible && !s.exited);

    let d = s.declared();
    assert!(d.declared && !d.barrier);
}

#[test]
fn test_assignment_is_monotonic() {
    let s = declared().assigned();
    assert!(s.definite && s.possible);
    assert_eq!(s.assigned(), s);
    assert!(FlowState::join(s, &[declared()]).definite);
}

#[test]
fn test_join_if_else() {
    let entry = declared();
    let assigned = entry.assigned();

    // both branches assign
    let both = FlowState::join(entry, &[assigned, assigned]);
    assert!(both.definite && both.possible);

    // only one branch assigns
    let one = FlowState::join(entry, &[assigned, entry]);
    assert!(!one.definite && one.possible);

    // neither assigns
    let none = FlowState::join(entry, &[entry, entry]);
    assert_eq!(none, entry);
}

#[test]
fn test_join_preserves_lattice_order() {
    let entry = declared();
    let candidates = [entry, entry.assigned(), entry.exit(), entry.assigned().exit()];
    for &a in &candidates {
        for &b in &candidates {
            let joined = FlowState::join(entry, &[a, b]);
            if joined.is_reachable() {
                assert!(!joined.definite || joined.possible, "{a:?} + {b:?}");
            }
        }
    }
}

#[test]
fn test_exited_arm_is_vacuously_definite() {
    let entry = declared();
    let returned = entry.exit();
    assert!(returned.definite && !returned.possible);

    // if (c) { return; } else { x = 1; }
    let joined = FlowState::join(entry, &[returned, entry.assigned()]);
    assert!(joined.definite && joined.possible && !joined.exited);

    // if (c) { return; }  (no else)
    let joined = FlowState::join(entry, &[returned, entry]);
    assert!(!joined.definite && !joined.possible);
}

#[test]
fn test_exited_arm_keeps_possible() {
    let entry = declared();
    // if (c) { x = 1; return; }  (no else)
    let joined = FlowState::join(entry, &[entry.assigned().exit(), entry]);
    assert!(!joined.definite);
    assert!(joined.possible);
}

#[test]
fn test_join_of_exited_arms_is_exited() {
    let entry = declared();
    let joined = FlowState::join(entry, &[entry.exit(), entry.assigned().exit()]);
    assert!(joined.exited && joined.definite);
}

#[test]
fn test_join_keeps_entry_declared_and_barrier() {
    let entry = FlowState::initial();
    let arm = entry.declared().assigned();
    let joined = FlowState::join(entry, &[arm, arm]);
    assert!(!joined.declared);
    assert!(joined.barrier);
    assert!(joined.definite);
}

#[test]
fn test_join_with_no_arms_is_entry() {
    let entry = declared().assigned();
    assert_eq!(FlowState::join(entry, &[]), entry);
}

#[test]
fn test_after_loop_keeps_only_possible() {
    let entry = declared();
    let body = entry.with_barrier().assigned().exit();
    let after = FlowState::after_loop(entry, body);
    assert!(!after.definite);
    assert!(after.possible);
    assert!(!after.barrier);
    assert!(!after.exited);
}

#[test]
fn test_restore_partial() {
    let entry = declared();
    let clause = entry.assigned().exit();
    let restored = clause.restore_partial(entry);
    assert!(!restored.definite);
    assert!(restored.possible);
    assert!(!restored.exited);
    assert!(restored.declared);
}
