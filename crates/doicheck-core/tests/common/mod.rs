pub mod fake_registry;
pub mod fixtures;
