//! Selection Tests
//!
//! Constructor scoring across the scope chain.

mod scorer_test;
