use crate::error::Chip8Error;

// NB. addresses are u16 as per the chip-8; lengths are usize to stop endless casting

/// how much RAM we have
pub const RAM_SIZE_BYTES: usize = 4096;

/// where the glyph table lives (16 sprites of 5 bytes, digits 0-F)
pub const GLYPH_ADDR: u16 = 0x000;

/// bytes per glyph sprite, so FX29 can find digit d at d * GLYPH_HEIGHT
pub const GLYPH_HEIGHT: u16 = 5;

/// where the program is loaded
pub const PROGRAM_ADDR: u16 = 0x200;

/// biggest program image that fits between 0x200 and the top of RAM
pub const MAX_PROGRAM_BYTES: usize = RAM_SIZE_BYTES - PROGRAM_ADDR as usize;

/// The CHIP-8 memory map:
///   0x000-0x04f  glyph table
///   0x050-0x1ff  reserved (historically the interpreter itself)
///   0x200-0xfff  program image
///
/// Every accessor is bounds-checked; an address past 0xfff is a fault, not a
/// wraparound.
#[derive(Debug)]
pub struct Memory {
    bytes: Box<[u8; RAM_SIZE_BYTES]>,
}

impl Memory {
    /// fresh memory with the glyph table baked in and a program image copied
    /// to 0x200
    pub fn with_program(program: &[u8]) -> Result<Self, Chip8Error> {
        if program.len() > MAX_PROGRAM_BYTES {
            return Err(Chip8Error::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_BYTES,
            });
        }
        let mut bytes = Box::new([0u8; RAM_SIZE_BYTES]);
        let g = GLYPH_ADDR as usize;
        bytes[g..g + GLYPH_TABLE.len()].copy_from_slice(&GLYPH_TABLE);
        let p = PROGRAM_ADDR as usize;
        bytes[p..p + program.len()].copy_from_slice(program);
        Ok(Memory { bytes })
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8, Chip8Error> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds { addr })
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), Chip8Error> {
        match self.bytes.get_mut(addr as usize) {
            Some(b) => {
                *b = value;
                Ok(())
            }
            None => Err(Chip8Error::MemoryOutOfBounds { addr }),
        }
    }

    /// get a two-byte word, high byte first (instruction fetch)
    pub fn read_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let hi = self.read_byte(addr)?;
        let lo = self.read_byte(addr.wrapping_add(1))?;
        Ok(((hi as u16) << 8) | lo as u16)
    }

    /// a r/o slice of memory (sprite rows for DXYN)
    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error> {
        let a = addr as usize;
        self.bytes
            .get(a..a + len)
            .ok_or(Chip8Error::MemoryOutOfBounds { addr })
    }
}

#[rustfmt::skip]
const GLYPH_TABLE: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed_above_glyphs() {
        let m = Memory::with_program(&[]).unwrap();
        // NB. below 0x050 we bake in the glyph table
        assert_eq!(m.bytes[0x050..], [0; RAM_SIZE_BYTES - 0x050]);
    }

    #[test]
    fn test_glyph_table_baked_in() {
        let m = Memory::with_program(&[]).unwrap();
        // digit 0 occupies the first five bytes
        assert_eq!(m.read_slice(0, 5).unwrap(), &[0xF0, 0x90, 0x90, 0x90, 0xF0]);
        // digit F occupies the last five
        assert_eq!(
            m.read_slice(0x4b, 5).unwrap(),
            &[0xF0, 0x80, 0xF0, 0x80, 0x80]
        );
    }

    #[test]
    fn test_program_load_ok() {
        let m = Memory::with_program(&[0x00, 0xe0]).unwrap();
        assert_eq!(m.read_slice(0x200, 2).unwrap(), &[0x00, 0xe0]);
    }

    #[test]
    fn test_program_max_size_ok() {
        let m = Memory::with_program(&[0xff; MAX_PROGRAM_BYTES]).unwrap();
        assert_eq!(m.read_byte(0xfff).unwrap(), 0xff);
    }

    #[test]
    fn test_program_too_large_rejected() {
        let e = Memory::with_program(&[0; MAX_PROGRAM_BYTES + 1]).unwrap_err();
        assert_eq!(
            e,
            Chip8Error::ProgramTooLarge {
                size: MAX_PROGRAM_BYTES + 1,
                max: MAX_PROGRAM_BYTES,
            }
        );
    }

    #[test]
    fn test_read_write_round_trip() {
        let mut m = Memory::with_program(&[]).unwrap();
        m.write_byte(0x300, 0xab).unwrap();
        assert_eq!(m.read_byte(0x300).unwrap(), 0xab);
    }

    #[test]
    fn test_read_word_big_endian() {
        let m = Memory::with_program(&[0x12, 0x34]).unwrap();
        assert_eq!(m.read_word(0x200).unwrap(), 0x1234);
    }

    #[test]
    fn test_out_of_bounds_read_is_error() {
        let m = Memory::with_program(&[]).unwrap();
        assert_eq!(
            m.read_byte(0x1000).unwrap_err(),
            Chip8Error::MemoryOutOfBounds { addr: 0x1000 }
        );
    }

    #[test]
    fn test_out_of_bounds_slice_is_error() {
        let m = Memory::with_program(&[]).unwrap();
        assert!(m.read_slice(0xffe, 3).is_err());
    }

    #[test]
    fn test_out_of_bounds_write_is_error() {
        let mut m = Memory::with_program(&[]).unwrap();
        assert!(m.write_byte(0x1000, 1).is_err());
    }
}
