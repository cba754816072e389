//! Where values come from.
//!
//! Every typed accessor resolves its key through a single [`ReadEnv`]
//! implementation. Production code uses [`SystemEnv`]; tests swap in
//! [`InMemoryEnv`] so they never touch the process environment.
//!
//! ```
//! use trogon_env::env::{ReadEnv, SystemEnv};
//!
//! fn database_url<E: ReadEnv>(env: &E) -> String {
//!     env.var("DATABASE_URL")
//!         .unwrap_or_else(|_| "postgres://localhost".to_string())
//! }
//!
//! let url = database_url(&SystemEnv);
//! ```
//!
//! ```ignore
//! use trogon_env::env::InMemoryEnv;
//!
//! let env = InMemoryEnv::new();
//! env.set("DATABASE_URL", "postgres://test"); // &self, no `mut` needed
//!
//! assert_eq!(database_url(&env), "postgres://test");
//! ```

mod in_memory;
mod lookup_fn;
mod read_env;
mod system;

#[cfg(any(test, feature = "test-support"))]
pub use in_memory::InMemoryEnv;
pub use lookup_fn::LookupFn;
pub use read_env::ReadEnv;
pub use system::SystemEnv;
