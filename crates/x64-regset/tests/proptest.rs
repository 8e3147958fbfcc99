//! Property-based tests using proptest.
//!
//! These check the operand and register-set invariants over randomly
//! generated operands and sets, complementing the targeted unit tests and
//! the libfuzzer-based fuzz target.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use proptest::prelude::*;
use x64_regset::catalog::*;
use x64_regset::{Mem, Operand, OperandKind, RegSet};

// ── Strategies ──────────────────────────────────────────────────────────

fn arb_kind() -> impl Strategy<Value = OperandKind> {
    prop::sample::select(vec![
        OperandKind::R64,
        OperandKind::R32,
        OperandKind::R16,
        OperandKind::R8,
        OperandKind::Rh,
        OperandKind::Xmm,
        OperandKind::Xmm0,
        OperandKind::Ymm,
        OperandKind::Eflags,
        OperandKind::Pref66,
        OperandKind::PrefRexW,
        OperandKind::Far,
    ])
}

/// Any `(kind, value)` pair, valid or not.
fn arb_operand() -> impl Strategy<Value = Operand> {
    (arb_kind(), any::<u8>()).prop_map(|(k, v)| Operand::new(k, v))
}

/// Any register or flag the text form can carry.
fn arb_member() -> impl Strategy<Value = Operand> {
    let all: Vec<Operand> = R64S
        .iter()
        .chain(&R32S)
        .chain(&R16S)
        .chain(&R8S)
        .chain(&RHS)
        .chain(&XMMS)
        .chain(&YMMS)
        .chain(&EFLAGS)
        .copied()
        .collect();
    prop::sample::select(all)
}

fn arb_set() -> impl Strategy<Value = RegSet> {
    prop::collection::vec(arb_member(), 0..24).prop_map(|v| v.into_iter().collect())
}

fn std_hash(op: &Operand) -> u64 {
    let mut h = DefaultHasher::new();
    op.hash(&mut h);
    h.finish()
}

// ── Properties ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn check_matches_declared_range(kind in arb_kind(), value in any::<u8>()) {
        let op = Operand::new(kind, value);
        let expected = match kind {
            OperandKind::Rh => value < 4,
            OperandKind::Eflags => EFLAGS.iter().any(|f| f.value() == value),
            OperandKind::Xmm0
            | OperandKind::Pref66
            | OperandKind::PrefRexW
            | OperandKind::Far => value == 0,
            _ => value < 16,
        };
        prop_assert_eq!(op.check(), expected);
    }

    #[test]
    fn eq_ord_hash_agree(a in arb_operand(), b in arb_operand()) {
        let eq = a == b;
        prop_assert_eq!(eq, a.hash_code() == b.hash_code());
        prop_assert_eq!(eq, !(a < b) && !(b < a));
        if eq {
            prop_assert_eq!(std_hash(&a), std_hash(&b));
        }
    }

    #[test]
    fn insert_then_contains(set in arb_set(), op in arb_member()) {
        let mut s = set;
        s += op;
        prop_assert!(s.contains(op));
        prop_assert!(set.is_subset(&s));
    }

    #[test]
    fn remove_undoes_insert(set in arb_set(), op in arb_member()) {
        prop_assume!(!set.contains(op));
        let mut s = set;
        s += op;
        s -= op;
        prop_assert_eq!(s, set);
    }

    #[test]
    fn union_is_bitwise_or(a in arb_set(), b in arb_set(), op in arb_member()) {
        prop_assert_eq!((a | b).contains(op), a.contains(op) || b.contains(op));
        prop_assert_eq!((a & b).contains(op), a.contains(op) && b.contains(op));
        prop_assert_eq!((a - b).contains(op), a.contains(op) && !b.contains(op));
    }

    #[test]
    fn written_text_always_reads_back(set in arb_set()) {
        let text = set.to_string();
        let back: RegSet = text.parse().unwrap();
        // Reading yields the canonical projection: a subset of the input
        // that prints identically.
        prop_assert!(back.is_subset(&set));
        prop_assert_eq!(back.to_string(), text);
    }

    #[test]
    fn memory_operand_override(base in 0usize..16, index in 0usize..16, addr32 in any::<bool>()) {
        prop_assume!(R64S[index] != RSP);
        let mut m = Mem::base(R64S[base]).with_index(R64S[index], 4);
        if addr32 {
            m = m.with_addr32();
        }
        let mut s = RegSet::empty();
        s += &m;
        let table = if addr32 { &R32S } else { &R64S };
        let expected = RegSet::empty() + table[base] + table[index];
        prop_assert_eq!(s, expected);
    }

    #[test]
    fn reader_never_panics(input in "[{} %a-z0-9\n]{0,64}") {
        let _ = input.parse::<RegSet>();
    }
}
