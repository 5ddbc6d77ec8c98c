/// A decoded instruction word.
///
/// The top nibble picks one of 16 primary groups; groups 0x0, 0x8, 0xE and
/// 0xF sub-classify on the low byte or low nibble. Words that don't map to
/// any variant decode to `None` and the machine treats them as two-byte
/// no-ops. Groups 5 and 9 dispatch on the top nibble alone, so the low
/// nibble of 5XYN/9XYN is ignored, as the original interpreter did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XKK
    SkipEqImm { x: usize, kk: u8 },
    /// 4XKK
    SkipNeImm { x: usize, kk: u8 },
    /// 5XY0
    SkipEqReg { x: usize, y: usize },
    /// 6XKK
    LoadImm { x: usize, kk: u8 },
    /// 7XKK
    AddImm { x: usize, kk: u8 },
    /// 8XY0
    Copy { x: usize, y: usize },
    /// 8XY1
    Or { x: usize, y: usize },
    /// 8XY2
    And { x: usize, y: usize },
    /// 8XY3
    Xor { x: usize, y: usize },
    /// 8XY4
    Add { x: usize, y: usize },
    /// 8XY5
    Sub { x: usize, y: usize },
    /// 8XY6
    ShiftRight { x: usize, y: usize },
    /// 8XY7
    SubReversed { x: usize, y: usize },
    /// 8XYE
    ShiftLeft { x: usize, y: usize },
    /// 9XY0
    SkipNeReg { x: usize, y: usize },
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpIndexed(u16),
    /// CXKK
    Random { x: usize, kk: u8 },
    /// DXYN
    Draw { x: usize, y: usize, n: u8 },
    /// EX9E
    SkipKeyHeld { x: usize },
    /// EXA1
    SkipKeyNotHeld { x: usize },
    /// FX07
    ReadDelay { x: usize },
    /// FX15
    SetDelay { x: usize },
    /// FX18
    SetSound { x: usize },
    /// FX1E
    AddIndex { x: usize },
    /// FX29
    LoadGlyph { x: usize },
    /// FX33
    StoreBcd { x: usize },
    /// FX55
    StoreRegisters { x: usize },
    /// FX65
    LoadRegisters { x: usize },
}

impl Instruction {
    pub fn decode(word: u16) -> Option<Instruction> {
        use Instruction::*;

        let nnn = word & 0x0fff;
        let kk = (word & 0x00ff) as u8;
        let n = (word & 0x000f) as u8;
        let x = ((word & 0x0f00) >> 8) as usize;
        let y = ((word & 0x00f0) >> 4) as usize;

        match word >> 12 {
            0x0 => match kk {
                0xe0 => Some(ClearScreen),
                0xee => Some(Return),
                _ => None,
            },
            0x1 => Some(Jump(nnn)),
            0x2 => Some(Call(nnn)),
            0x3 => Some(SkipEqImm { x, kk }),
            0x4 => Some(SkipNeImm { x, kk }),
            0x5 => Some(SkipEqReg { x, y }),
            0x6 => Some(LoadImm { x, kk }),
            0x7 => Some(AddImm { x, kk }),
            0x8 => match n {
                0x0 => Some(Copy { x, y }),
                0x1 => Some(Or { x, y }),
                0x2 => Some(And { x, y }),
                0x3 => Some(Xor { x, y }),
                0x4 => Some(Add { x, y }),
                0x5 => Some(Sub { x, y }),
                0x6 => Some(ShiftRight { x, y }),
                0x7 => Some(SubReversed { x, y }),
                0xe => Some(ShiftLeft { x, y }),
                _ => None,
            },
            0x9 => Some(SkipNeReg { x, y }),
            0xa => Some(LoadIndex(nnn)),
            0xb => Some(JumpIndexed(nnn)),
            0xc => Some(Random { x, kk }),
            0xd => Some(Draw { x, y, n }),
            0xe => match kk {
                0x9e => Some(SkipKeyHeld { x }),
                0xa1 => Some(SkipKeyNotHeld { x }),
                _ => None,
            },
            0xf => match kk {
                0x07 => Some(ReadDelay { x }),
                0x15 => Some(SetDelay { x }),
                0x18 => Some(SetSound { x }),
                0x1e => Some(AddIndex { x }),
                0x29 => Some(LoadGlyph { x }),
                0x33 => Some(StoreBcd { x }),
                0x55 => Some(StoreRegisters { x }),
                0x65 => Some(LoadRegisters { x }),
                _ => None,
            },
            _ => unreachable!("u16 >> 12 is a nibble"),
        }
    }
}
