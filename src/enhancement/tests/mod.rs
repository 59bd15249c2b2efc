//! Unit tests for the enhancement module.

mod enhancer_tests;
