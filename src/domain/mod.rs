//! Domain layer: the URL data model and the resolver contract.
//!
//! - [`entities`] - [`entities::ParsedUrl`] and the normalization rule set
//! - [`resolver`] - The [`resolver::Resolver`] trait implemented in
//!   [`crate::infrastructure::dns`]
//!
//! Nothing here depends on the infrastructure layer.

pub mod entities;
pub mod resolver;

pub use resolver::Resolver;

#[cfg(test)]
pub use resolver::MockResolver;
