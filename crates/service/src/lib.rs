//! Service layer providing the cafe directory's business rules on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.

pub mod errors;
#[cfg(test)]
pub mod test_support;
pub mod db;
pub mod cafe;
