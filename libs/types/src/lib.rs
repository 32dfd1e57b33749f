//! Types library for the Casablanca Bourse REST facade
//!
//! This library provides the domain types shared by the upstream adapter and
//! the HTTP gateway. Every value here is an immutable snapshot: requests
//! build fresh values and nothing is mutated after construction.
//!
//! # Modules
//! - `ids`: Opaque upstream identifiers (BuildId, InstrumentId)
//! - `numeric`: Lenient decimal decoding of upstream JSON values
//! - `quote`: Live equity quote
//! - `index`: Live market index snapshot
//! - `history`: Historical session bars and date ranges
//! - `errors`: Error taxonomy

// Public modules
pub mod ids;
pub mod numeric;
pub mod quote;
pub mod index;
pub mod history;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::quote::*;
    pub use crate::index::*;
    pub use crate::history::*;
    pub use crate::errors::*;
}
