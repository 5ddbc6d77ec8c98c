///
/// ## Design
///
/// * the machine core owns memory, registers, call stack, timers and the
///   framebuffer; it consumes a program image and a 16-key held-state vector
///   and exposes a frame plus a "sound on" signal
/// * one `step()` = one fetch/decode/execute + one timer tick; wall-clock
///   pacing lives entirely in the host loop
/// * instruction words decode into an enum first, so the 35-entry dispatch
///   table is testable without a machine
/// * anything the original interpreter left unguarded (call stack depth,
///   memory bounds, oversized programs) is a reported error here; anything
///   it merely warned about (unknown opcodes) stays a logged two-byte no-op
/// * display, input and sound sit behind traits so alternatives can be
///   plugged in; the in-tree ones render to a TUI canvas, poll crossterm key
///   events and drive the PC speaker
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod sound;
