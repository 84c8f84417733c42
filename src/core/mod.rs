//! Core business logic for Kurs.
//!
//! - [`pipeline`] - run orchestration and the run summary
//! - [`transform`] - deterministic source-record to target-row mappings
//!
//! # Run Workflow
//!
//! 1. **Connect**: open the pool, single attempt
//! 2. **Teardown** (reinit only): drop cataloged objects in reverse order
//! 3. **Ensure schema**: create cataloged objects in dependency order
//! 4. **Currencies**: fetch reference data, transform, upsert
//! 5. **Item prices**: read ordered batches, transform with checkpoint,
//!    upsert
//! 6. **Rates**: fetch historical quotes per referenced date, re-base,
//!    upsert
//! 7. **Report**: log the run summary

pub mod pipeline;
pub mod transform;
