//! CLI command implementations.
//!
//! | Module   | Commands handled |
//! |----------|------------------|
//! | `create` | `Create`         |
//! | `plan`   | `Plan`           |

pub mod create;
pub mod plan;

pub use create::cmd_create;
pub use plan::cmd_plan;
