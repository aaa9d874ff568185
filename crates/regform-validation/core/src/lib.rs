//! regform Validation Core
//!
//! The registration rule set and the primitive checks behind it.
//! Compiled into the server for authoritative validation and into the
//! WASM bindings for instant client-side feedback, so both sides agree.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod email;
pub mod phone;
pub mod rules;
pub mod string;

pub use email::*;
pub use phone::*;
pub use rules::*;
pub use string::*;
