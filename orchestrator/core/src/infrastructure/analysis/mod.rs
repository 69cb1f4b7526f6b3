// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Code Analysis Infrastructure - Anti-Corruption Layer Implementations
//
// Adapters translating between the CodeAnalyzer domain interface and
// external correction services.

pub mod ollama;

pub use ollama::OllamaAnalysisGateway;
