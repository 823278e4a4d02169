// Copyright 2025 the Groove Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runnable demos for the Groove crates. See the `examples/` directory;
//! there is no library surface here.
