/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! Personal names, dates and links shared by the derived-data builders.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use worklog_core::Record;

/// Non-breaking space.
pub const NBSP: char = '\u{a0}';

pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub const ADS_ABS_BASE: &str = "http://ui.adsabs.harvard.edu/abs/";
pub const DOI_BASE: &str = "http://dx.doi.org/";
pub const ARXIV_ABS_BASE: &str = "http://arxiv.org/abs/";
pub const GITHUB_BASE: &str = "https://github.com/";

/// Bytes left unencoded in URL path components: unreserved characters and `/`.
const PATH_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Three-letter abbreviation of a 1-based month number.
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

/// Convert "First Middle Last" into "Last, F.M.".
///
/// The surname is the last whitespace-separated token, with underscores
/// standing in for spaces inside multi-word surnames. Initials are the
/// capital letters and hyphens of the given names. In a hyphenated given
/// name, a lowercase letter that starts it or follows a hyphen counts too, so
/// "jean-paul" yields "J.-P." while the particle in "Tomás de Jesús" does not.
///
/// ```rust
/// use worklog_processor::values::canonicalize_name;
///
/// assert_eq!(canonicalize_name("Peter K. G. Williams"), "Williams, P.K.G.");
/// assert_eq!(canonicalize_name("Jean-Paul Smith"), "Smith, J.-P.");
/// assert_eq!(canonicalize_name("Ana van_der_Berg"), "van der Berg, A.");
/// ```
pub fn canonicalize_name(name: &str) -> String {
    let bits: Vec<&str> = name.split_whitespace().collect();
    let Some((last, given)) = bits.split_last() else {
        return String::new();
    };
    let surname = last.replace('_', " ");

    let mut initials: Vec<String> = Vec::new();
    for token in given {
        let hyphenated = token.contains('-');
        let mut prev = None;
        for (j, c) in token.chars().enumerate() {
            if c.is_uppercase() || c == '-' {
                initials.push(c.to_string());
            } else if c.is_alphabetic() && hyphenated && (j == 0 || prev == Some('-')) {
                initials.push(c.to_uppercase().collect());
            }
            prev = Some(c);
        }
    }

    if initials.is_empty() {
        return surname;
    }

    let joined = format!("{}.", initials.join("."));
    format!("{}, {}", surname, joined.replace(".-.", ".-"))
}

/// The surname of a "First Middle Last" name.
pub fn surname(name: &str) -> String {
    name.split_whitespace()
        .last()
        .unwrap_or_default()
        .replace('_', " ")
}

/// Append a path component to a base URL, percent-encoding everything but
/// unreserved characters. Slashes inside the component are kept as path
/// separators.
pub fn quote_onto(base: &str, component: &str) -> String {
    format!("{}{}", base, utf8_percent_encode(component, PATH_COMPONENT))
}

/// The most useful link for a publication: ADS, then DOI, then an explicit
/// URL, then arXiv.
pub fn best_url(record: &Record) -> Option<String> {
    if let Some(bibcode) = record.field("bibcode") {
        return Some(quote_onto(ADS_ABS_BASE, bibcode));
    }
    if let Some(doi) = record.field("doi") {
        return Some(quote_onto(DOI_BASE, doi));
    }
    if let Some(url) = record.field("url") {
        return Some(url.to_string());
    }
    record
        .field("arxiv")
        .map(|arxiv| quote_onto(ARXIV_ABS_BASE, arxiv))
}

#[cfg(test)]
mod tests {
    use super::*;
    use worklog_core::record;

    #[test]
    fn test_canonicalize_simple() {
        assert_eq!(canonicalize_name("Jane Smith"), "Smith, J.");
        assert_eq!(canonicalize_name("  Peter K. G. Williams "), "Williams, P.K.G.");
    }

    #[test]
    fn test_canonicalize_hyphenated_given_names() {
        assert_eq!(canonicalize_name("Jean-Paul Smith"), "Smith, J.-P.");
        assert_eq!(canonicalize_name("jean-paul Smith"), "Smith, J.-P.");
    }

    #[test]
    fn test_canonicalize_skips_lowercase_particles() {
        assert_eq!(canonicalize_name("Tomás de Jesús"), "Jesús, T.");
        assert_eq!(canonicalize_name("Ana de la Cruz"), "Cruz, A.");
    }

    #[test]
    fn test_canonicalize_multiword_surname() {
        assert_eq!(
            canonicalize_name("Natascha M. Förster_Schreiber"),
            "Förster Schreiber, N.M."
        );
    }

    #[test]
    fn test_canonicalize_degenerate() {
        assert_eq!(canonicalize_name("Collaboration"), "Collaboration");
        assert_eq!(canonicalize_name("   "), "");
    }

    #[test]
    fn test_surname() {
        assert_eq!(surname("Peter K. G. Williams"), "Williams");
        assert_eq!(surname("Ana van_der_Berg"), "van der Berg");
        assert_eq!(surname(""), "");
    }

    #[test]
    fn test_month_abbrev() {
        assert_eq!(month_abbrev(1), Some("Jan"));
        assert_eq!(month_abbrev(12), Some("Dec"));
        assert_eq!(month_abbrev(0), None);
        assert_eq!(month_abbrev(13), None);
    }

    #[test]
    fn test_best_url_precedence() {
        let rec = record!("pub",
            "bibcode" => "2020ApJ...900....1S",
            "doi" => "10.3847/1538-4357/abcdef",
            "arxiv" => "2001.00001");
        assert_eq!(
            best_url(&rec).unwrap(),
            "http://ui.adsabs.harvard.edu/abs/2020ApJ...900....1S"
        );

        let rec = record!("pub", "doi" => "10.3847/1538-4357/abcdef", "arxiv" => "2001.00001");
        assert_eq!(
            best_url(&rec).unwrap(),
            "http://dx.doi.org/10.3847/1538-4357/abcdef"
        );

        let rec = record!("pub", "url" => "https://example.org/paper", "arxiv" => "2001.00001");
        assert_eq!(best_url(&rec).unwrap(), "https://example.org/paper");

        let rec = record!("pub", "arxiv" => "2001.00001");
        assert_eq!(best_url(&rec).unwrap(), "http://arxiv.org/abs/2001.00001");

        assert_eq!(best_url(&record!("pub", "title" => "x")), None);
    }

    #[test]
    fn test_quote_onto_encodes() {
        assert_eq!(
            quote_onto(GITHUB_BASE, "some user/repo name"),
            "https://github.com/some%20user/repo%20name"
        );
    }

    #[test]
    fn test_bibcode_with_ampersand_is_encoded() {
        let rec = record!("pub", "bibcode" => "2020A&A...640A..10S");
        assert_eq!(
            best_url(&rec).unwrap(),
            "http://ui.adsabs.harvard.edu/abs/2020A%26A...640A..10S"
        );
        assert_eq!(quote_onto(DOI_BASE, "10.1000/a(b)"), "http://dx.doi.org/10.1000/a%28b%29");
    }
}
