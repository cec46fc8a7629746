// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Two-worker pipeline — scoped worker threads and the coordinator that joins them.

pub mod coordinator;
pub mod worker;

pub use coordinator::{Coordinator, RunReport, Stage};
pub use worker::{WorkerOutcome, WorkerResult};
