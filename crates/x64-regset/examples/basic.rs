//! Basic register-set example: builds sets by hand, from memory operands
//! and from text, and shows the canonical text form.
//!
//! Run with: `cargo run --example basic`

use x64_regset::catalog::*;
use x64_regset::{Mem, RegSet, Tokens};

fn main() {
    println!("=== x64_regset basic example ===\n");

    // --- Building by hand ---
    println!("1. Inserting registers and flags:");
    let mut set = RegSet::empty();
    set += RAX;
    set += CL;
    set += CH;
    set += YMM2;
    set += EFLAGS_ZF;
    println!("   {}", set);

    // --- Memory operands ---
    println!("\n2. Address registers of a memory operand:");
    let m = Mem::base(RBP).with_index(RSI, 4).with_disp(-8);
    let mut regs = RegSet::empty();
    regs += &m;
    println!("   {:<20} reads {}", m.to_string(), regs);
    let m32 = m.with_addr32();
    let mut regs = RegSet::empty();
    regs += &m32;
    println!("   {:<20} reads {}", m32.to_string(), regs);

    // --- Canonical form ---
    println!("\n3. Wider aliases mask narrower ones when printed:");
    let overlapping = RegSet::empty() + RAX + EAX + AL;
    println!("   members:   {:?}", overlapping);
    println!("   canonical: {}", overlapping);

    // --- Reading ---
    println!("\n4. Reading several sets from one input:");
    let mut tokens = Tokens::new("{ %rdi %rsi } { %xmm0 %cf }\n{ %bogus }");
    let mut set = RegSet::empty();
    loop {
        match set.read_text(&mut tokens) {
            Ok(()) => println!("   read {}", set),
            Err(e) => {
                println!("   stopped: {}", e);
                break;
            }
        }
    }

    // --- ABI sets ---
    println!("\n5. System V AMD64 register classes:");
    println!("   callee-saved: {}", RegSet::linux_callee_save());
    println!("   parameters:   {}", RegSet::linux_call_parameters());
    println!("   return:       {}", RegSet::linux_call_return());
}
