#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod arithmetic;
pub mod bits;
mod const_helpers;
pub mod curve;
pub mod eddsa;
pub mod encoding;
pub mod error;
pub mod field;
pub mod hash;

pub use error::{Error, Result};
