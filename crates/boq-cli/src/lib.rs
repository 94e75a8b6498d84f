//! Library components of the `boq` command.

pub mod logging;
pub mod overrides;
