//! # Behemoth Repository
//!
//! Profile persistence on MySQL through SQLx.
//!
//! ```text
//! ProfileStore
//!   ↓  Arc<dyn ProfileRepository>      (domain interface)
//! MySqlProfileRepository               (MySQL / SQLx)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! MySQL
//! ```

pub mod mysql;
pub mod pool;
pub mod traits;

pub use mysql::*;
pub use pool::*;
pub use traits::*;
