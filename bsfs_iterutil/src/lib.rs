//! Iterator utilities that are not provided by the `std` crate.

pub use self::pages::*;

mod pages;
