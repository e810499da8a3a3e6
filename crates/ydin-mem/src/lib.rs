//! Freestanding dynamic-array primitives.
//!
//! [`HeapVec`] is a growable contiguous sequence with explicit capacity
//! control, backed by [`HeapArray`], a move-only owner of one heap
//! allocation that frees memory but never destroys elements. Element
//! lifetime is the container's job: construction is a placement write into
//! a raw slot, destruction an in-place drop.
//!
//! Misuse is never reported as a value. The one checked precondition,
//! `remove_last` on an empty vector, halts through [`fatal_assert!`];
//! unchecked access is spelled `unsafe`; allocation failure halts through
//! the global allocation error handler.
#![cfg_attr(not(any(feature = "std", test)), no_std)]

extern crate alloc;

pub mod trap;

mod heap_array;
mod heap_vec;

pub use heap_array::HeapArray;
pub use heap_vec::HeapVec;
