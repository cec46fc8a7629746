// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// External collaborators — image decode/encode and comparison figures.

pub mod codec;
pub mod figures;

pub use codec::{FsCodec, ImageCodec};
pub use figures::{ComparisonFigures, FigureInputs, FigureRenderer};
