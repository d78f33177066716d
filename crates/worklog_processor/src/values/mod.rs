/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Derived data.
//!
//! Pure functions from raw records to augmented records and aggregate
//! statistics. Each one documents the fields it reads and the fields it
//! adds; none of them mutates its input.

pub mod allocations;
pub mod citations;
pub mod names;
pub mod publication;
pub mod repositories;
pub mod talks;

pub use allocations::{compute_observing_experience, compute_time_allocations, format_quantity};
pub use citations::{compute_cite_stats, h_index, parse_ads_cites, AdsCites};
pub use names::{best_url, canonicalize_name, month_abbrev, surname, MONTHS, NBSP};
pub use publication::{cite_info, my_index, partition_pubs, PubGroups};
pub use repositories::{compute_repo_stats, process_repositories};
pub use talks::{compute_team_talks, is_team_talk};
