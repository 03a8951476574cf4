//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one orchestrator
//! against recording mocks.  All tests run on the host with no real
//! hardware required.

// Links the std critical-section impl used by the embassy-sync queues.
use critical_section as _;

mod mocks;
mod presenter_tests;
