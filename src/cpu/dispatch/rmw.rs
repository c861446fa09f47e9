//! Read-modify-write family: shifts, rotates, and memory INC/DEC.
//!
//! Accumulator forms mutate the register directly. Memory forms go through
//! the canonical read / dummy-write-old / write-new bus sequence in
//! `execute::rmw`, which is observable when the target is a device register.

use crate::bus::Bus;
use crate::cpu::addressing::{Resolved, Target};
use crate::cpu::execute;
use crate::cpu::state::CpuState;
use crate::cpu::table::Mnemonic;

pub(crate) fn exec(cpu: &mut CpuState, bus: &mut Bus, m: Mnemonic, operand: &Resolved) {
    match operand.target {
        Target::Accumulator => {
            let v = cpu.a;
            let r = match m {
                Mnemonic::Asl => execute::asl(cpu, v),
                Mnemonic::Lsr => execute::lsr(cpu, v),
                Mnemonic::Rol => execute::rol(cpu, v),
                Mnemonic::Ror => execute::ror(cpu, v),
                _ => return, // INC/DEC have no accumulator form
            };
            cpu.a = r;
        }
        Target::Address(addr) => {
            match m {
                Mnemonic::Asl => execute::rmw(cpu, bus, addr, execute::asl),
                Mnemonic::Lsr => execute::rmw(cpu, bus, addr, execute::lsr),
                Mnemonic::Rol => execute::rmw(cpu, bus, addr, execute::rol),
                Mnemonic::Ror => execute::rmw(cpu, bus, addr, execute::ror),
                Mnemonic::Inc => execute::rmw(cpu, bus, addr, |c, old| {
                    let r = old.wrapping_add(1);
                    c.update_zn(r);
                    r
                }),
                Mnemonic::Dec => execute::rmw(cpu, bus, addr, |c, old| {
                    let r = old.wrapping_sub(1);
                    c.update_zn(r);
                    r
                }),
                _ => return,
            };
        }
        _ => {}
    }
}
