use crate::error::Chip8Error;
use crate::framebuffer::FrameBuffer;
use crate::memory::{Memory, GLYPH_HEIGHT, PROGRAM_ADDR};
use crate::opcode::Instruction;
use log::{debug, warn};

/// general-purpose registers V0-VF
pub const NUM_REGISTERS: usize = 16;

/// nesting limit for 2NNN calls
pub const STACK_DEPTH: usize = 16;

/// keys 0-F on the hex pad
pub const NUM_KEYS: usize = 16;

/// VF doubles as the carry/borrow/collision flag
const FLAG: usize = 0xf;

/// The virtual machine: memory, register bank, call stack, timer pair,
/// framebuffer and the key state fed in by the host.
///
/// `step()` runs exactly one fetch-decode-execute cycle followed by one
/// timer decrement pass. Pacing between steps is the host's problem; the
/// machine only guarantees the 1:1 coupling of instructions to timer ticks.
#[derive(Debug)]
pub struct Machine {
    memory: Memory,
    v: [u8; NUM_REGISTERS],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: usize,
    delay_timer: u8,
    sound_timer: u8,
    keys: [bool; NUM_KEYS],
    framebuffer: FrameBuffer,
}

impl Machine {
    /// build a machine with `program` loaded at 0x200 and PC pointing at its
    /// first instruction
    pub fn new(program: &[u8]) -> Result<Self, Chip8Error> {
        Ok(Machine {
            memory: Memory::with_program(program)?,
            v: [0; NUM_REGISTERS],
            i: 0,
            pc: PROGRAM_ADDR,
            stack: [0; STACK_DEPTH],
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            keys: [false; NUM_KEYS],
            framebuffer: FrameBuffer::new(),
        })
    }

    /// one instruction plus one timer tick; reports whether the framebuffer
    /// has a frame the host hasn't consumed yet
    pub fn step(&mut self) -> Result<bool, Chip8Error> {
        let word = self.memory.read_word(self.pc)?;
        debug!("fetch {:#06x} at pc={:#06x}", word, self.pc);

        match Instruction::decode(word) {
            Some(instruction) => self.execute(instruction)?,
            None => {
                warn!("opcode {:#06x} not implemented, skipping", word);
                self.pc += 2;
            }
        }
        self.tick_timers();

        Ok(self.framebuffer.is_dirty())
    }

    /// the 64x32 pixel grid, clearing the dirty flag
    pub fn frame(&mut self) -> &[u8] {
        self.framebuffer.take_frame()
    }

    /// true while the sound timer is running; the host owns the speaker
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }

    /// replace the held-key state; the machine only ever reads it
    pub fn set_keys(&mut self, keys: [bool; NUM_KEYS]) {
        self.keys = keys;
    }

    /// one decrement pass: each nonzero timer goes down by one, saturating
    /// at zero
    fn tick_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    fn execute(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        use Instruction::*;

        match instruction {
            ClearScreen => {
                self.framebuffer.clear();
                self.pc += 2;
            }
            Return => {
                if self.sp == 0 {
                    return Err(Chip8Error::StackUnderflow);
                }
                self.sp -= 1;
                // resume at the instruction after the matching 2NNN
                self.pc = self.stack[self.sp] + 2;
            }
            Jump(nnn) => self.pc = nnn,
            Call(nnn) => {
                if self.sp == STACK_DEPTH {
                    return Err(Chip8Error::StackOverflow);
                }
                self.stack[self.sp] = self.pc;
                self.sp += 1;
                self.pc = nnn;
            }
            SkipEqImm { x, kk } => self.skip_if(self.v[x] == kk),
            SkipNeImm { x, kk } => self.skip_if(self.v[x] != kk),
            SkipEqReg { x, y } => self.skip_if(self.v[x] == self.v[y]),
            SkipNeReg { x, y } => self.skip_if(self.v[x] != self.v[y]),
            LoadImm { x, kk } => {
                self.v[x] = kk;
                self.pc += 2;
            }
            AddImm { x, kk } => {
                // no carry flag from the immediate add
                self.v[x] = self.v[x].wrapping_add(kk);
                self.pc += 2;
            }
            Copy { x, y } => {
                self.v[x] = self.v[y];
                self.pc += 2;
            }
            Or { x, y } => {
                self.v[x] |= self.v[y];
                self.pc += 2;
            }
            And { x, y } => {
                self.v[x] &= self.v[y];
                self.pc += 2;
            }
            Xor { x, y } => {
                self.v[x] ^= self.v[y];
                self.pc += 2;
            }
            Add { x, y } => self.alu(x, alu_add(self.v[x], self.v[y])),
            Sub { x, y } => self.alu(x, alu_sub(self.v[x], self.v[y])),
            SubReversed { x, y } => self.alu(x, alu_sub(self.v[y], self.v[x])),
            ShiftRight { x, y } => self.alu(x, alu_shift_right(self.v[x], self.v[y])),
            ShiftLeft { x, y } => self.alu(x, alu_shift_left(self.v[x], self.v[y])),
            LoadIndex(nnn) => {
                self.i = nnn;
                self.pc += 2;
            }
            JumpIndexed(nnn) => self.pc = nnn + self.v[0] as u16,
            Random { x, kk } => {
                self.v[x] = rand::random::<u8>() & kk;
                self.pc += 2;
            }
            Draw { x, y, n } => {
                let rows = self.memory.read_slice(self.i, n as usize)?;
                self.v[FLAG] = self.framebuffer.draw_sprite(self.v[x], self.v[y], rows);
                self.pc += 2;
            }
            SkipKeyHeld { x } => self.skip_if(self.keys[(self.v[x] & 0xf) as usize]),
            SkipKeyNotHeld { x } => self.skip_if(!self.keys[(self.v[x] & 0xf) as usize]),
            ReadDelay { x } => {
                self.v[x] = self.delay_timer;
                self.pc += 2;
            }
            SetDelay { x } => {
                self.delay_timer = self.v[x];
                self.pc += 2;
            }
            SetSound { x } => {
                self.sound_timer = self.v[x];
                self.pc += 2;
            }
            AddIndex { x } => {
                self.i = self.i.wrapping_add(self.v[x] as u16);
                self.pc += 2;
            }
            LoadGlyph { x } => {
                self.i = self.v[x] as u16 * GLYPH_HEIGHT;
                self.pc += 2;
            }
            StoreBcd { x } => {
                let value = self.v[x];
                self.memory.write_byte(self.i, value / 100)?;
                self.memory.write_byte(self.i + 1, (value / 10) % 10)?;
                self.memory.write_byte(self.i + 2, value % 10)?;
                self.pc += 2;
            }
            StoreRegisters { x } => {
                for r in 0..=x {
                    self.memory.write_byte(self.i + r as u16, self.v[r])?;
                }
                self.pc += 2;
            }
            LoadRegisters { x } => {
                for r in 0..=x {
                    self.v[r] = self.memory.read_byte(self.i + r as u16)?;
                }
                self.pc += 2;
            }
        }
        Ok(())
    }

    /// conditional-skip opcodes hop over the next instruction
    fn skip_if(&mut self, condition: bool) {
        self.pc += if condition { 4 } else { 2 };
    }

    /// land an ALU result and mirror its flag into VF. The flag is written
    /// first so an instruction targeting VF itself keeps the result, as on
    /// the original interpreter.
    fn alu(&mut self, x: usize, (result, flag): (u8, u8)) {
        self.v[FLAG] = flag;
        self.v[x] = result;
        self.pc += 2;
    }
}

// ALU operations compute on the pre-instruction register values and hand
// back an explicit (result, flag) pair rather than poking VF themselves.

/// 8XY4: flag is the carry out of the 8-bit add
fn alu_add(vx: u8, vy: u8) -> (u8, u8) {
    let (result, carry) = vx.overflowing_add(vy);
    (result, carry as u8)
}

/// 8XY5/8XY7: flag 1 iff the minuend is strictly greater (equal sets 0)
fn alu_sub(minuend: u8, subtrahend: u8) -> (u8, u8) {
    (
        minuend.wrapping_sub(subtrahend),
        (minuend > subtrahend) as u8,
    )
}

/// 8XY6: shifts Vy, flags Vx's low bit. The Vy source matches the original
/// interpreter, not the commonly documented ISA.
fn alu_shift_right(vx: u8, vy: u8) -> (u8, u8) {
    (vy >> 1, vx & 0x1)
}

/// 8XYE: shifts Vy, flags Vx's high bit
fn alu_shift_left(vx: u8, vy: u8) -> (u8, u8) {
    (vy << 1, vx >> 7)
}
