//! Canonical register constants and per-class tables.
//!
//! Every architectural register the crate models has a named constant
//! (`RAX`, `R13D`, `AH`, `YMM7`, `EFLAGS_ZF`, ...) and appears in exactly one
//! ordered class table (`R64S`, `R32S`, `R16S`, `R8S`, `RHS`, `XMMS`, `YMMS`,
//! `EFLAGS`). The tables are indexed by register number, so `R32S[i]` is the
//! 32-bit alias of `R64S[i]`. The fixed `%xmm0` operand, [`XMM0_FIXED`], is
//! the one constant outside those tables.
//!
//! AT&T spellings live here as well: [`mnemonic`] maps an operand to its
//! text and [`lookup`] maps text back to the operand.

use crate::operand::{Operand, OperandKind};

// -- 64-bit general-purpose registers --
/// `%rax`.
pub const RAX: Operand = Operand::new(OperandKind::R64, 0);
/// `%rcx`.
pub const RCX: Operand = Operand::new(OperandKind::R64, 1);
/// `%rdx`.
pub const RDX: Operand = Operand::new(OperandKind::R64, 2);
/// `%rbx`.
pub const RBX: Operand = Operand::new(OperandKind::R64, 3);
/// `%rsp`.
pub const RSP: Operand = Operand::new(OperandKind::R64, 4);
/// `%rbp`.
pub const RBP: Operand = Operand::new(OperandKind::R64, 5);
/// `%rsi`.
pub const RSI: Operand = Operand::new(OperandKind::R64, 6);
/// `%rdi`.
pub const RDI: Operand = Operand::new(OperandKind::R64, 7);
/// `%r8`.
pub const R8: Operand = Operand::new(OperandKind::R64, 8);
/// `%r9`.
pub const R9: Operand = Operand::new(OperandKind::R64, 9);
/// `%r10`.
pub const R10: Operand = Operand::new(OperandKind::R64, 10);
/// `%r11`.
pub const R11: Operand = Operand::new(OperandKind::R64, 11);
/// `%r12`.
pub const R12: Operand = Operand::new(OperandKind::R64, 12);
/// `%r13`.
pub const R13: Operand = Operand::new(OperandKind::R64, 13);
/// `%r14`.
pub const R14: Operand = Operand::new(OperandKind::R64, 14);
/// `%r15`.
pub const R15: Operand = Operand::new(OperandKind::R64, 15);

// -- 32-bit general-purpose registers --
/// `%eax`.
pub const EAX: Operand = Operand::new(OperandKind::R32, 0);
/// `%ecx`.
pub const ECX: Operand = Operand::new(OperandKind::R32, 1);
/// `%edx`.
pub const EDX: Operand = Operand::new(OperandKind::R32, 2);
/// `%ebx`.
pub const EBX: Operand = Operand::new(OperandKind::R32, 3);
/// `%esp`.
pub const ESP: Operand = Operand::new(OperandKind::R32, 4);
/// `%ebp`.
pub const EBP: Operand = Operand::new(OperandKind::R32, 5);
/// `%esi`.
pub const ESI: Operand = Operand::new(OperandKind::R32, 6);
/// `%edi`.
pub const EDI: Operand = Operand::new(OperandKind::R32, 7);
/// `%r8d`.
pub const R8D: Operand = Operand::new(OperandKind::R32, 8);
/// `%r9d`.
pub const R9D: Operand = Operand::new(OperandKind::R32, 9);
/// `%r10d`.
pub const R10D: Operand = Operand::new(OperandKind::R32, 10);
/// `%r11d`.
pub const R11D: Operand = Operand::new(OperandKind::R32, 11);
/// `%r12d`.
pub const R12D: Operand = Operand::new(OperandKind::R32, 12);
/// `%r13d`.
pub const R13D: Operand = Operand::new(OperandKind::R32, 13);
/// `%r14d`.
pub const R14D: Operand = Operand::new(OperandKind::R32, 14);
/// `%r15d`.
pub const R15D: Operand = Operand::new(OperandKind::R32, 15);

// -- 16-bit general-purpose registers --
/// `%ax`.
pub const AX: Operand = Operand::new(OperandKind::R16, 0);
/// `%cx`.
pub const CX: Operand = Operand::new(OperandKind::R16, 1);
/// `%dx`.
pub const DX: Operand = Operand::new(OperandKind::R16, 2);
/// `%bx`.
pub const BX: Operand = Operand::new(OperandKind::R16, 3);
/// `%sp`.
pub const SP: Operand = Operand::new(OperandKind::R16, 4);
/// `%bp`.
pub const BP: Operand = Operand::new(OperandKind::R16, 5);
/// `%si`.
pub const SI: Operand = Operand::new(OperandKind::R16, 6);
/// `%di`.
pub const DI: Operand = Operand::new(OperandKind::R16, 7);
/// `%r8w`.
pub const R8W: Operand = Operand::new(OperandKind::R16, 8);
/// `%r9w`.
pub const R9W: Operand = Operand::new(OperandKind::R16, 9);
/// `%r10w`.
pub const R10W: Operand = Operand::new(OperandKind::R16, 10);
/// `%r11w`.
pub const R11W: Operand = Operand::new(OperandKind::R16, 11);
/// `%r12w`.
pub const R12W: Operand = Operand::new(OperandKind::R16, 12);
/// `%r13w`.
pub const R13W: Operand = Operand::new(OperandKind::R16, 13);
/// `%r14w`.
pub const R14W: Operand = Operand::new(OperandKind::R16, 14);
/// `%r15w`.
pub const R15W: Operand = Operand::new(OperandKind::R16, 15);

// -- low-byte registers --
/// `%al`.
pub const AL: Operand = Operand::new(OperandKind::R8, 0);
/// `%cl`.
pub const CL: Operand = Operand::new(OperandKind::R8, 1);
/// `%dl`.
pub const DL: Operand = Operand::new(OperandKind::R8, 2);
/// `%bl`.
pub const BL: Operand = Operand::new(OperandKind::R8, 3);
/// `%spl`.
pub const SPL: Operand = Operand::new(OperandKind::R8, 4);
/// `%bpl`.
pub const BPL: Operand = Operand::new(OperandKind::R8, 5);
/// `%sil`.
pub const SIL: Operand = Operand::new(OperandKind::R8, 6);
/// `%dil`.
pub const DIL: Operand = Operand::new(OperandKind::R8, 7);
/// `%r8b`.
pub const R8B: Operand = Operand::new(OperandKind::R8, 8);
/// `%r9b`.
pub const R9B: Operand = Operand::new(OperandKind::R8, 9);
/// `%r10b`.
pub const R10B: Operand = Operand::new(OperandKind::R8, 10);
/// `%r11b`.
pub const R11B: Operand = Operand::new(OperandKind::R8, 11);
/// `%r12b`.
pub const R12B: Operand = Operand::new(OperandKind::R8, 12);
/// `%r13b`.
pub const R13B: Operand = Operand::new(OperandKind::R8, 13);
/// `%r14b`.
pub const R14B: Operand = Operand::new(OperandKind::R8, 14);
/// `%r15b`.
pub const R15B: Operand = Operand::new(OperandKind::R8, 15);

// -- high-byte registers --
/// `%ah`.
pub const AH: Operand = Operand::new(OperandKind::Rh, 0);
/// `%ch`.
pub const CH: Operand = Operand::new(OperandKind::Rh, 1);
/// `%dh`.
pub const DH: Operand = Operand::new(OperandKind::Rh, 2);
/// `%bh`.
pub const BH: Operand = Operand::new(OperandKind::Rh, 3);

// -- SSE registers --
/// `%xmm0`.
pub const XMM0: Operand = Operand::new(OperandKind::Xmm, 0);
/// `%xmm1`.
pub const XMM1: Operand = Operand::new(OperandKind::Xmm, 1);
/// `%xmm2`.
pub const XMM2: Operand = Operand::new(OperandKind::Xmm, 2);
/// `%xmm3`.
pub const XMM3: Operand = Operand::new(OperandKind::Xmm, 3);
/// `%xmm4`.
pub const XMM4: Operand = Operand::new(OperandKind::Xmm, 4);
/// `%xmm5`.
pub const XMM5: Operand = Operand::new(OperandKind::Xmm, 5);
/// `%xmm6`.
pub const XMM6: Operand = Operand::new(OperandKind::Xmm, 6);
/// `%xmm7`.
pub const XMM7: Operand = Operand::new(OperandKind::Xmm, 7);
/// `%xmm8`.
pub const XMM8: Operand = Operand::new(OperandKind::Xmm, 8);
/// `%xmm9`.
pub const XMM9: Operand = Operand::new(OperandKind::Xmm, 9);
/// `%xmm10`.
pub const XMM10: Operand = Operand::new(OperandKind::Xmm, 10);
/// `%xmm11`.
pub const XMM11: Operand = Operand::new(OperandKind::Xmm, 11);
/// `%xmm12`.
pub const XMM12: Operand = Operand::new(OperandKind::Xmm, 12);
/// `%xmm13`.
pub const XMM13: Operand = Operand::new(OperandKind::Xmm, 13);
/// `%xmm14`.
pub const XMM14: Operand = Operand::new(OperandKind::Xmm, 14);
/// `%xmm15`.
pub const XMM15: Operand = Operand::new(OperandKind::Xmm, 15);
/// The fixed `%xmm0` operand. Prints as `%xmm0` and shares its register
/// slot, but is a distinct kind.
pub const XMM0_FIXED: Operand = Operand::new(OperandKind::Xmm0, 0);

// -- AVX registers --
/// `%ymm0`.
pub const YMM0: Operand = Operand::new(OperandKind::Ymm, 0);
/// `%ymm1`.
pub const YMM1: Operand = Operand::new(OperandKind::Ymm, 1);
/// `%ymm2`.
pub const YMM2: Operand = Operand::new(OperandKind::Ymm, 2);
/// `%ymm3`.
pub const YMM3: Operand = Operand::new(OperandKind::Ymm, 3);
/// `%ymm4`.
pub const YMM4: Operand = Operand::new(OperandKind::Ymm, 4);
/// `%ymm5`.
pub const YMM5: Operand = Operand::new(OperandKind::Ymm, 5);
/// `%ymm6`.
pub const YMM6: Operand = Operand::new(OperandKind::Ymm, 6);
/// `%ymm7`.
pub const YMM7: Operand = Operand::new(OperandKind::Ymm, 7);
/// `%ymm8`.
pub const YMM8: Operand = Operand::new(OperandKind::Ymm, 8);
/// `%ymm9`.
pub const YMM9: Operand = Operand::new(OperandKind::Ymm, 9);
/// `%ymm10`.
pub const YMM10: Operand = Operand::new(OperandKind::Ymm, 10);
/// `%ymm11`.
pub const YMM11: Operand = Operand::new(OperandKind::Ymm, 11);
/// `%ymm12`.
pub const YMM12: Operand = Operand::new(OperandKind::Ymm, 12);
/// `%ymm13`.
pub const YMM13: Operand = Operand::new(OperandKind::Ymm, 13);
/// `%ymm14`.
pub const YMM14: Operand = Operand::new(OperandKind::Ymm, 14);
/// `%ymm15`.
pub const YMM15: Operand = Operand::new(OperandKind::Ymm, 15);

// -- RFLAGS bits --
/// `%cf` (bit 0).
pub const EFLAGS_CF: Operand = Operand::new(OperandKind::Eflags, 0);
/// `%res1` (bit 1).
pub const EFLAGS_RES1: Operand = Operand::new(OperandKind::Eflags, 1);
/// `%pf` (bit 2).
pub const EFLAGS_PF: Operand = Operand::new(OperandKind::Eflags, 2);
/// `%res3` (bit 3).
pub const EFLAGS_RES3: Operand = Operand::new(OperandKind::Eflags, 3);
/// `%af` (bit 4).
pub const EFLAGS_AF: Operand = Operand::new(OperandKind::Eflags, 4);
/// `%res5` (bit 5).
pub const EFLAGS_RES5: Operand = Operand::new(OperandKind::Eflags, 5);
/// `%zf` (bit 6).
pub const EFLAGS_ZF: Operand = Operand::new(OperandKind::Eflags, 6);
/// `%sf` (bit 7).
pub const EFLAGS_SF: Operand = Operand::new(OperandKind::Eflags, 7);
/// `%tf` (bit 8).
pub const EFLAGS_TF: Operand = Operand::new(OperandKind::Eflags, 8);
/// `%if` (bit 9).
pub const EFLAGS_IF: Operand = Operand::new(OperandKind::Eflags, 9);
/// `%df` (bit 10).
pub const EFLAGS_DF: Operand = Operand::new(OperandKind::Eflags, 10);
/// `%of` (bit 11).
pub const EFLAGS_OF: Operand = Operand::new(OperandKind::Eflags, 11);
/// `%iopl` (bit 12–13).
pub const EFLAGS_IOPL: Operand = Operand::new(OperandKind::Eflags, 12);
/// `%nt` (bit 14).
pub const EFLAGS_NT: Operand = Operand::new(OperandKind::Eflags, 14);
/// `%res15` (bit 15).
pub const EFLAGS_RES15: Operand = Operand::new(OperandKind::Eflags, 15);
/// `%rf` (bit 16).
pub const EFLAGS_RF: Operand = Operand::new(OperandKind::Eflags, 16);
/// `%vm` (bit 17).
pub const EFLAGS_VM: Operand = Operand::new(OperandKind::Eflags, 17);
/// `%ac` (bit 18).
pub const EFLAGS_AC: Operand = Operand::new(OperandKind::Eflags, 18);
/// `%vif` (bit 19).
pub const EFLAGS_VIF: Operand = Operand::new(OperandKind::Eflags, 19);
/// `%vip` (bit 20).
pub const EFLAGS_VIP: Operand = Operand::new(OperandKind::Eflags, 20);
/// `%id` (bit 21).
pub const EFLAGS_ID: Operand = Operand::new(OperandKind::Eflags, 21);

/// 64-bit registers, indexed by register number.
pub const R64S: [Operand; 16] = [
    RAX,
    RCX,
    RDX,
    RBX,
    RSP,
    RBP,
    RSI,
    RDI,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
];

/// 32-bit registers, indexed by register number.
pub const R32S: [Operand; 16] = [
    EAX,
    ECX,
    EDX,
    EBX,
    ESP,
    EBP,
    ESI,
    EDI,
    R8D,
    R9D,
    R10D,
    R11D,
    R12D,
    R13D,
    R14D,
    R15D,
];

/// 16-bit registers, indexed by register number.
pub const R16S: [Operand; 16] = [
    AX,
    CX,
    DX,
    BX,
    SP,
    BP,
    SI,
    DI,
    R8W,
    R9W,
    R10W,
    R11W,
    R12W,
    R13W,
    R14W,
    R15W,
];

/// Low-byte registers, indexed by register number.
pub const R8S: [Operand; 16] = [
    AL,
    CL,
    DL,
    BL,
    SPL,
    BPL,
    SIL,
    DIL,
    R8B,
    R9B,
    R10B,
    R11B,
    R12B,
    R13B,
    R14B,
    R15B,
];

/// High-byte registers, indexed by the number of the register they alias.
pub const RHS: [Operand; 4] = [
    AH,
    CH,
    DH,
    BH,
];

/// SSE registers, indexed by register number.
pub const XMMS: [Operand; 16] = [
    XMM0,
    XMM1,
    XMM2,
    XMM3,
    XMM4,
    XMM5,
    XMM6,
    XMM7,
    XMM8,
    XMM9,
    XMM10,
    XMM11,
    XMM12,
    XMM13,
    XMM14,
    XMM15,
];

/// AVX registers, indexed by register number.
pub const YMMS: [Operand; 16] = [
    YMM0,
    YMM1,
    YMM2,
    YMM3,
    YMM4,
    YMM5,
    YMM6,
    YMM7,
    YMM8,
    YMM9,
    YMM10,
    YMM11,
    YMM12,
    YMM13,
    YMM14,
    YMM15,
];

/// Every RFLAGS flag in bit order. Multi-bit fields appear once.
pub const EFLAGS: [Operand; 21] = [
    EFLAGS_CF,
    EFLAGS_RES1,
    EFLAGS_PF,
    EFLAGS_RES3,
    EFLAGS_AF,
    EFLAGS_RES5,
    EFLAGS_ZF,
    EFLAGS_SF,
    EFLAGS_TF,
    EFLAGS_IF,
    EFLAGS_DF,
    EFLAGS_OF,
    EFLAGS_IOPL,
    EFLAGS_NT,
    EFLAGS_RES15,
    EFLAGS_RF,
    EFLAGS_VM,
    EFLAGS_AC,
    EFLAGS_VIF,
    EFLAGS_VIP,
    EFLAGS_ID,
];

const R64_NAMES: [&str; 16] = [
    "%rax", "%rcx", "%rdx", "%rbx", "%rsp", "%rbp", "%rsi", "%rdi", "%r8", "%r9", "%r10",
    "%r11", "%r12", "%r13", "%r14", "%r15",
];

const R32_NAMES: [&str; 16] = [
    "%eax", "%ecx", "%edx", "%ebx", "%esp", "%ebp", "%esi", "%edi", "%r8d", "%r9d", "%r10d",
    "%r11d", "%r12d", "%r13d", "%r14d", "%r15d",
];

const R16_NAMES: [&str; 16] = [
    "%ax", "%cx", "%dx", "%bx", "%sp", "%bp", "%si", "%di", "%r8w", "%r9w", "%r10w", "%r11w",
    "%r12w", "%r13w", "%r14w", "%r15w",
];

const R8_NAMES: [&str; 16] = [
    "%al", "%cl", "%dl", "%bl", "%spl", "%bpl", "%sil", "%dil", "%r8b", "%r9b", "%r10b",
    "%r11b", "%r12b", "%r13b", "%r14b", "%r15b",
];

const RH_NAMES: [&str; 4] = [
    "%ah", "%ch", "%dh", "%bh",
];

const XMM_NAMES: [&str; 16] = [
    "%xmm0", "%xmm1", "%xmm2", "%xmm3", "%xmm4", "%xmm5", "%xmm6", "%xmm7", "%xmm8", "%xmm9",
    "%xmm10", "%xmm11", "%xmm12", "%xmm13", "%xmm14", "%xmm15",
];

const YMM_NAMES: [&str; 16] = [
    "%ymm0", "%ymm1", "%ymm2", "%ymm3", "%ymm4", "%ymm5", "%ymm6", "%ymm7", "%ymm8", "%ymm9",
    "%ymm10", "%ymm11", "%ymm12", "%ymm13", "%ymm14", "%ymm15",
];

/// Flag mnemonics indexed by bit; bit 13 is the upper half of `%iopl`.
const FLAG_NAMES: [&str; 22] = [
    "%cf", "%res1", "%pf", "%res3", "%af", "%res5", "%zf", "%sf", "%tf", "%if", "%df", "%of",
    "%iopl", "", "%nt", "%res15", "%rf", "%vm", "%ac", "%vif", "%vip", "%id",
];

/// Declared width of the flag starting at each bit; 0 marks a bit that
/// does not start a flag.
const FLAG_WIDTHS: [u8; 22] = [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 2, 0, 1, 1, 1, 1, 1, 1, 1, 1];

/// Register classes in reader precedence, each with its spellings.
/// Flags are resolved last, from [`FLAG_NAMES`].
const READ_ORDER: [(&[&str], &[Operand]); 7] = [
    (&R64_NAMES, &R64S),
    (&R32_NAMES, &R32S),
    (&R16_NAMES, &R16S),
    (&R8_NAMES, &R8S),
    (&RH_NAMES, &RHS),
    (&YMM_NAMES, &YMMS),
    (&XMM_NAMES, &XMMS),
];

/// Resolve an AT&T mnemonic to its operand by exact, case-sensitive match.
///
/// Classes are tried in reader precedence: 64-bit, 32-bit, 16-bit,
/// low-byte, high-byte, YMM, XMM, then flags. `%xmm0` therefore resolves
/// to [`XMM0`], never [`XMM0_FIXED`]. Modifiers have no mnemonic.
#[must_use]
pub fn lookup(mnemonic: &str) -> Option<Operand> {
    READ_ORDER
        .iter()
        .find_map(|&(names, ops)| {
            names
                .iter()
                .position(|&n| n == mnemonic)
                .map(|i| ops[i])
        })
        .or_else(|| {
            FLAG_NAMES
                .iter()
                .position(|&n| !n.is_empty() && n == mnemonic)
                .map(|bit| Operand::new(OperandKind::Eflags, bit as u8))
        })
}

// -- modifiers --
/// The 0x66 operand/address-size override modifier.
pub const PREF_66: Operand = Operand::new(OperandKind::Pref66, 0);
/// The REX.W modifier.
pub const PREF_REX_W: Operand = Operand::new(OperandKind::PrefRexW, 0);
/// The far-transfer modifier.
pub const FAR: Operand = Operand::new(OperandKind::Far, 0);

/// AT&T mnemonic of a register or flag; `None` for modifiers and values
/// that fail [`Operand::check`].
#[must_use]
pub fn mnemonic(op: Operand) -> Option<&'static str> {
    let i = usize::from(op.value());
    let name = match op.kind() {
        OperandKind::R64 => R64_NAMES.get(i),
        OperandKind::R32 => R32_NAMES.get(i),
        OperandKind::R16 => R16_NAMES.get(i),
        OperandKind::R8 => R8_NAMES.get(i),
        OperandKind::Rh => RH_NAMES.get(i),
        OperandKind::Xmm => XMM_NAMES.get(i),
        OperandKind::Xmm0 => XMM_NAMES[..1].get(i),
        OperandKind::Ymm => YMM_NAMES.get(i),
        OperandKind::Eflags => FLAG_NAMES.get(i).filter(|n| !n.is_empty()),
        OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far => None,
    };
    name.copied()
}

/// Width of the flag whose lowest bit is `bit`, or `None` if no flag
/// starts there.
#[must_use]
pub fn flag_width(bit: u8) -> Option<u8> {
    FLAG_WIDTHS
        .get(usize::from(bit))
        .copied()
        .filter(|&w| w != 0)
}

/// Number of RFLAGS bits covered by [`EFLAGS`].
pub const EFLAGS_BITS: usize = FLAG_WIDTHS.len();

/// The class table for a register kind. Empty for modifiers.
#[must_use]
pub fn class_table(kind: OperandKind) -> &'static [Operand] {
    match kind {
        OperandKind::R64 => &R64S,
        OperandKind::R32 => &R32S,
        OperandKind::R16 => &R16S,
        OperandKind::R8 => &R8S,
        OperandKind::Rh => &RHS,
        OperandKind::Xmm => &XMMS,
        OperandKind::Xmm0 => core::slice::from_ref(&XMM0_FIXED),
        OperandKind::Ymm => &YMMS,
        OperandKind::Eflags => &EFLAGS,
        OperandKind::Pref66 | OperandKind::PrefRexW | OperandKind::Far => &[],
    }
}
