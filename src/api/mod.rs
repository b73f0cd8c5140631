//! Public entry points for foreign function interfaces.

pub mod ffi;
