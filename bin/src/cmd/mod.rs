//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod evaluate;
pub(crate) mod metrics;
pub(crate) mod score;
pub(crate) mod sectors;
