/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Declarative macros for building records in tests and fixtures.

/// Build a [`crate::Record`] from a section tag and `field => value` pairs.
///
/// ```rust
/// let rec = worklog_core::record!("pub", "title" => "Galaxies", "mypos" => "1");
/// assert_eq!(rec.field("title"), Some("Galaxies"));
/// ```
#[macro_export]
macro_rules! record {
    ($section:expr $(, $key:expr => $val:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut rec = $crate::Record::new($section);
        $( rec.set($key, $val); )*
        rec
    }};
}

/// Build a [`crate::Holder`] from `field => value` pairs.
#[macro_export]
macro_rules! holder {
    ($($key:expr => $val:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut h = $crate::Holder::new();
        $( h.set($key, $val); )*
        h
    }};
}
