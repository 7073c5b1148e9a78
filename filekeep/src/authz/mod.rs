//! User roles and per-path authorization.
//!
//! This module decides who may touch what. [`Role`] and [`UserContext`]
//! centralize capability checks (Guest is read-only everywhere), and
//! [`Authorizer`] maps a `(user, virtual path)` pair to the physical
//! root the path is allowed to resolve against, consulting the user's
//! internal tree, imported roots, and favorite categories in order.
//!
//! Authorization is deliberately separate from physical containment:
//! every [`Grant`] is still resolved through the containment-checking
//! resolver before any filesystem operation runs.

mod authorizer;
mod role;

pub use authorizer::{remove_stale_roots, Authorizer, Grant, GrantScope};
pub use role::{Role, UserContext};
