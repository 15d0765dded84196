//! Static shape of the BaseSpace resource graph.
//!
//! The graph alternates between two kinds of nodes.
//! _Category_ nodes have fixed names such as `projects` or `files`,
//! and each owns exactly one kind of entity.
//! _Entity_ nodes stand for concrete backend objects,
//! which are addressed in paths by their identifiers,
//! and each owns a fixed set of categories (none, for leaves).
//!
//! Nothing in this crate talks to the network.
//! The tables are built into the binary and never change,
//! so they can be shared freely between threads.
//!
//! ```text
//! user
//! └── projects/{project}
//!     ├── appresults/{appresult}/files/{file}
//!     ├── samples/{sample}/files/{file}
//!     ├── biosamples/{biosample}/datasets/{dataset}/sequenced files/{file}
//!     └── appsessions/{appsession}/datasets/{dataset}/sequenced files/{file}
//! ```

pub use self::identifier::*;
pub use self::node::*;

mod identifier;
mod node;
