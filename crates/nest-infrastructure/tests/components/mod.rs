//! Component Registry Tests
//!
//! Layered lookups and write restrictions of child registries.

mod registry_test;
