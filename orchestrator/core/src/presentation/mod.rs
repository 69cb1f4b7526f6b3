// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Presentation Layer (`codementor-core`)
//!
//! HTTP surface that translates frontend requests into application service
//! calls. **No business logic lives here**; all real work is delegated to
//! [`crate::application::classroom`].
//!
//! | Module | Transport | Description |
//! |--------|-----------|-------------|
//! | [`api`] | HTTP (Axum) | JSON routes plus static frontend fallback |

pub mod api;
