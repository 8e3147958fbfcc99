//! Serde round-trip tests for the public value types.

#![cfg(feature = "serde")]

use x64_regset::catalog::*;
use x64_regset::{Mem, Operand, OperandKind, ParseError, ReadLimits, RegSet, Span};

/// Helper: serialize to JSON, deserialize back, assert equality.
fn round_trip<T>(val: &T)
where
    T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + core::fmt::Debug,
{
    let json = serde_json::to_string(val).expect("serialize");
    let back: T = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(val, &back, "round-trip mismatch for JSON: {json}");
}

#[test]
fn serde_operands() {
    for op in [RAX, R9D, SP, SIL, BH, XMM0, YMM15, EFLAGS_IOPL, PREF_66, FAR] {
        round_trip(&op);
    }
    round_trip(&OperandKind::PrefRexW);
}

#[test]
fn serde_span_and_error() {
    round_trip(&Span::new(1, 5, 10, 3));
    round_trip(&ParseError::UnknownOperand {
        token: "%bogus".into(),
        span: Span::new(1, 3, 2, 6),
    });
}

#[test]
fn serde_mem_and_limits() {
    round_trip(&Mem::base(RBP).with_index(RCX, 8).with_disp(-16).with_addr32());
    round_trip(&ReadLimits::default());
}

#[test]
fn serde_reg_set_is_lossless() {
    // The text form would collapse %rax/%eax; serde keeps both.
    let set = RegSet::empty() + RAX + EAX + AL + AH + YMM1 + XMM1 + EFLAGS_ZF;
    round_trip(&set);
    round_trip(&RegSet::empty());
    round_trip(&RegSet::universe());
}

#[test]
fn serde_reg_set_rejects_non_members() {
    let json = serde_json::to_string(&vec![RAX, PREF_REX_W]).unwrap();
    assert!(serde_json::from_str::<RegSet>(&json).is_err());
    let json = serde_json::to_string(&vec![Operand::new(OperandKind::Xmm, 99)]).unwrap();
    assert!(serde_json::from_str::<RegSet>(&json).is_err());
}
