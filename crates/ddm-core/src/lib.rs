//! `ddm-core` — foundational types for the `ddm` trial simulator.
//!
//! This crate is a dependency of every other `ddm-*` crate.  It intentionally
//! has no `ddm-*` dependencies and minimal external ones (only `rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`params`] | `DiffusionParams` — the model parameters and their checks |
//! | [`rng`]    | process-wide seed, `TrialRng` (per-partition stream)      |
//! | [`error`]  | `ParamError`, `ParamResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.          |

pub mod error;
pub mod params;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ParamError, ParamResult};
pub use params::{DEFAULT_CRITERIA, DiffusionParams};
pub use rng::{DEFAULT_SEED, TrialRng, global_seed, set_seed};
