//! `Reflect` implementations for standard library and ecosystem types.

mod collections;
mod json;
mod pointers;
mod primitives;
mod time;
