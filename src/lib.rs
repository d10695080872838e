// Copyright 2026 Pagesift Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pagesift: heuristic HTML record extraction.
//!
//! Exposes the extraction engine, the page fetcher, the REST surface, and
//! the export formatters for integration testing and embedding.

pub mod error;
pub mod export;
pub mod extract;
pub mod fetch;
pub mod rest;
