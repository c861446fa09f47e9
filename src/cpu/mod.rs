/*!
cpu - public façade for the 2A03 core.

Module structure:

```text
    state.rs        - architectural registers + flags (the register file)
    interrupt.rs    - NMI/IRQ pending state and the vector constants
    table.rs        - static 256-entry opcode table
    addressing.rs   - addressing-mode resolver (operand location + page cross)
    execute.rs      - shared ALU / RMW semantic primitives
    dispatch/       - per-category handlers and the step orchestrator
```

`Cpu` owns the register file and the interrupt controller. It never stores
the bus: the driver passes `&mut Bus` into `reset`/`step`/`tick`, keeping the
bus free for other components (PPU DMA, mapper IRQ counters) between calls.

Two clocking styles are supported:
- `step` executes exactly one instruction and returns its cycle count, for
  drivers that batch other components per instruction.
- `tick` advances exactly one clock cycle and reports instruction
  boundaries, for drivers interleaving at the hardware's 3-dots-per-cycle
  ratio. Internally the instruction executes on its first cycle and the
  remaining cycles count down; boundaries are the only points where the two
  styles may be mixed.
*/

pub mod addressing;
pub mod dispatch;
pub mod execute;
pub mod interrupt;
pub mod state;
pub mod table;


pub use addressing::AddrMode;
pub use interrupt::{IRQ_VECTOR, InterruptController, NMI_VECTOR, RESET_VECTOR};
pub use state::{
    BREAK, CARRY, CpuState, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO,
};
pub use table::{Mnemonic, Opcode, decode};

use log::debug;

use crate::bus::Bus;
use interrupt::INTERRUPT_ENTRY_CYCLES;

/// The 2A03 execution engine: register file, interrupt controller, and
/// cycle accounting.
pub struct Cpu {
    state: CpuState,
    interrupts: InterruptController,
    /// Total cycles elapsed since power-on (reset primes it with the
    /// 7-cycle power-on sequence).
    cycles: u64,
    /// Cycles left before the in-flight instruction retires (tick mode).
    pending: u32,
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    /// Construct a CPU in the power-on register state. Call [`Cpu::reset`]
    /// before stepping so PC is loaded from the reset vector.
    pub fn new() -> Self {
        Self {
            state: CpuState::new(),
            interrupts: InterruptController::new(),
            cycles: 0,
            pending: 0,
        }
    }

    /// Pull the reset line: power-on register values, PC from $FFFC/$FFFD,
    /// pending interrupts dropped. Callable at any time; the real line is
    /// wired straight to the console's reset button.
    pub fn reset(&mut self, bus: &mut Bus) {
        self.state.reset(bus);
        self.interrupts.clear_all();
        self.pending = 0;
        self.cycles = INTERRUPT_ENTRY_CYCLES as u64;
        debug!("reset -> PC=${:04X}", self.state.pc);
    }

    // ---------------------------------------------------------------------
    // Clocking
    // ---------------------------------------------------------------------

    /// Execute exactly one instruction (or service one interrupt) and
    /// return the cycles elapsed.
    ///
    /// If the caller previously advanced mid-instruction with [`Cpu::tick`],
    /// the remaining cycles of that instruction are consumed first and
    /// returned, so the two styles stay consistent at boundaries.
    pub fn step(&mut self, bus: &mut Bus) -> u32 {
        if self.pending > 0 {
            let rest = self.pending;
            self.pending = 0;
            self.cycles += rest as u64;
            return rest;
        }
        let cycles = dispatch::step(&mut self.state, &mut self.interrupts, bus);
        self.cycles += cycles as u64;
        cycles
    }

    /// Advance exactly one clock cycle. Returns true when this cycle
    /// reached an instruction boundary.
    ///
    /// The instruction's side effects are applied on its first cycle; the
    /// remaining cycles only burn time, which is indistinguishable from the
    /// outside because the bus mutation order within one instruction is not
    /// observable mid-flight.
    pub fn tick(&mut self, bus: &mut Bus) -> bool {
        if self.pending == 0 {
            self.pending = dispatch::step(&mut self.state, &mut self.interrupts, bus);
            if self.pending == 0 {
                // Jammed: nothing executes and no time passes.
                return true;
            }
        }
        self.pending -= 1;
        self.cycles += 1;
        self.pending == 0
    }

    /// Convenience: run up to `max_instructions` or until halted.
    pub fn run(&mut self, bus: &mut Bus, max_instructions: usize) {
        for _ in 0..max_instructions {
            if self.is_halted() {
                break;
            }
            self.step(bus);
        }
    }

    // ---------------------------------------------------------------------
    // Interrupt lines (the only external mutation entry points)
    // ---------------------------------------------------------------------

    /// Latch an NMI edge (PPU vblank). Serviced at the next boundary
    /// regardless of the I flag.
    pub fn assert_nmi(&mut self) {
        self.interrupts.assert_nmi();
    }

    /// Hold the IRQ line for one source (APU frame counter, mapper, ...).
    pub fn assert_irq(&mut self, source_id: u8) {
        self.interrupts.assert_irq(source_id);
    }

    /// Release the IRQ line for one source.
    pub fn clear_irq(&mut self, source_id: u8) {
        self.interrupts.clear_irq(source_id);
    }

    // ---------------------------------------------------------------------
    // Inspection (drivers, debuggers, tests)
    // ---------------------------------------------------------------------

    /// Total cycles elapsed since power-on.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// True once a jam opcode wedged the CPU (only reset recovers).
    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    pub fn a(&self) -> u8 {
        self.state.a
    }
    pub fn x(&self) -> u8 {
        self.state.x
    }
    pub fn y(&self) -> u8 {
        self.state.y
    }
    pub fn sp(&self) -> u8 {
        self.state.sp
    }
    pub fn pc(&self) -> u16 {
        self.state.pc
    }
    pub fn status(&self) -> u8 {
        self.state.status
    }

    /// Immutable view of the register file.
    pub fn state(&self) -> &CpuState {
        &self.state
    }

    /// Mutable register file access for debuggers and test harnesses.
    pub fn state_mut(&mut self) -> &mut CpuState {
        &mut self.state
    }
}
