//! Facade over the BaseSpace REST API.
//!
//! The browsing engine only ever talks to the backend
//! through the [`Api`] trait defined here.
//! [`HttpApi`] implements it against the real service
//! using blocking HTTP requests;
//! tests implement it in memory.
//!
//! Response bodies differ between API versions and object types.
//! They are read once into a [`Payload`],
//! so that nothing downstream needs to know
//! which field name a particular endpoint happens to use.

pub use self::api::*;
pub use self::config::*;
pub use self::error::*;
pub use self::http::*;
pub use self::payload::*;

mod api;
mod config;
mod error;
mod http;
mod payload;
