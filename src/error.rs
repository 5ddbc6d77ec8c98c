use thiserror::Error;

/// Fatal machine faults. Anything here terminates the run; recoverable
/// oddities (unrecognised opcodes) are logged and skipped instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    #[error("program image is {size} bytes, maximum is {max}")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("memory access out of bounds at {addr:#06x}")]
    MemoryOutOfBounds { addr: u16 },

    #[error("call stack overflow (more than 16 nested calls)")]
    StackOverflow,

    #[error("call stack underflow (return with no call in flight)")]
    StackUnderflow,
}
