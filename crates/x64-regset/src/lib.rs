//! # x64-regset: x86-64 operands and register sets
//!
//! `x64-regset` models the operand universe an x86-64 encoder works with:
//! general-purpose, vector and flag registers, the modifier pseudo-operands
//! that select between encodings of a mnemonic, and [`RegSet`], a compact
//! set of registers used to describe what an instruction reads or writes.
//!
//! ## Quick Start
//!
//! ```rust
//! use x64_regset::{catalog::*, Mem, RegSet};
//!
//! let mut set = RegSet::empty();
//! set += RAX;
//! set += &Mem::base(RBX).with_index(RCX, 8).with_addr32();
//! assert_eq!(set.to_string(), "{ %rax %ecx %ebx }");
//!
//! let parsed: RegSet = "{ %rax %ecx %ebx }".parse().unwrap();
//! assert_eq!(parsed, set);
//! ```
//!
//! ## Features
//!
//! - **Alias-aware**: every width of every register is tracked on its own;
//!   the text writer collapses aliases to the widest one present.
//! - **Address-size override**: memory operands under a 32-bit override
//!   contribute the 32-bit aliases of their address registers.
//! - **`no_std` + `alloc`**: the `std` feature only adds `std::error::Error`.
//! - **`serde`**: optional, lossless serialization of operands and sets.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Pedantic lint policy ─────────────────────────────────────────────────
// Register numbers are narrow integers that are widened to table indices
// and bit positions all over the crate; those casts are intentional.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_lossless,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::uninlined_format_args,
    clippy::doc_markdown,
    clippy::needless_range_loop,
    clippy::missing_errors_doc
)]

extern crate alloc;

/// Conversions between aliases of one physical register.
pub mod alias;
/// Named register constants, class tables and AT&T spellings.
pub mod catalog;
/// Error types and source-span diagnostics.
pub mod error;
/// Whitespace tokenizer with span tracking.
pub mod lexer;
/// Memory operands and the address registers they read.
pub mod mem;
/// The `(kind, value)` operand model.
pub mod operand;
/// Bit-packed register sets and their text form.
pub mod reg_set;

// Re-exports
pub use error::{ParseError, Span};
pub use lexer::{Token, Tokens};
pub use mem::{address_registers, Mem, MemoryRef};
pub use operand::{Operand, OperandKind};
pub use reg_set::{ReadLimits, RegSet};
