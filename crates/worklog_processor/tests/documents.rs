/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

mod common;
use common::*;

use worklog_core::{record, Dialect};
use worklog_processor::{process_template, standard_commands, ProcessorError};

fn two_pubs() -> Vec<worklog_core::Record> {
    vec![
        make_pub("Jane Smith; Al Jones", "", "Dust", "2020/03", "ApJ 900 1"),
        make_pub("Kim Lee; Bo Park", "", "Gas", "2021/06", "MNRAS 500 2"),
    ]
}

#[test]
fn test_publication_list_latex() {
    let out = render(
        Dialect::Latex,
        two_pubs(),
        "FORMAT |short_authors| (|year|)\nPUBLIST refereed",
    )
    .unwrap();
    assert_eq!(out, "Smith, J. \\& Jones, A. (2020)\nLee, K. \\& Park, B. (2021)\n");
}

#[test]
fn test_publication_list_html_numbers() {
    let out = render(
        Dialect::Html,
        two_pubs(),
        "<ol>\nFORMAT <li value=\"|rev_number|\">|short_authors|, |title|</li>\nPUBLIST refereed_rev\n</ol>",
    )
    .unwrap();
    assert_eq!(
        out,
        "<ol>\n\
         <li value=\"2\">Lee, K. &amp; Park, B., Gas</li>\n\
         <li value=\"1\">Smith, J. &amp; Jones, A., Dust</li>\n\
         </ol>\n"
    );
}

#[test]
fn test_self_is_marked_in_every_dialect() {
    let pubs = vec![make_pub("Jane Smith; Al Jones", "2", "Dust", "2020/03", "ApJ 900 1")];
    let template = "FORMAT |full_authors|\nPUBLIST all";

    assert_eq!(
        render(Dialect::Latex, pubs.clone(), template).unwrap(),
        "Smith, J., \\textbf{\\underline{Jones, A.}}\n"
    );
    assert_eq!(
        render(Dialect::Html, pubs.clone(), template).unwrap(),
        "Smith, J., <b><u>Jones, A.</u></b>\n"
    );
    assert_eq!(
        render(Dialect::Markdown, pubs, template).unwrap(),
        "Smith, J., **<u>Jones, A.</u>**\n"
    );
}

#[test]
fn test_cite_stats_span_yields_one_line() {
    let mut pubs = two_pubs();
    pubs[0].set("adscites", "2024/01/02 10");
    pubs[1].set("adscites", "2024/01/03 4");

    let out = render(
        Dialect::Html,
        pubs,
        "<p>\nBEGIN_SUBST cite_stats\n|refpubs| papers, h = |hindex|, as of |monthstr| |year|\nEND\n</p>",
    )
    .unwrap();
    assert_eq!(out, "<p>\n2 papers, h = 2, as of Jan 2024\n</p>\n");
}

#[test]
fn test_citestats_tex_template() {
    let mut pubs = two_pubs();
    pubs[0].set("adscites", "2024/01/02 10");
    let out = render(Dialect::Latex, pubs, "CITESTATS_TEX cites.tex").unwrap();
    assert_eq!(out, "h-index 1, 10 citations\n");
}

#[test]
fn test_allocations_and_unit_mismatch() {
    let items = vec![
        make_proposal("VLA", "10 hr"),
        make_proposal("VLA", "5.5 hr"),
        make_proposal("SUMMARY: Radio", "15.5 hr"),
    ];
    let out = render(
        Dialect::Html,
        items,
        "FORMAT |facil|: |total| |unit|\nTALLOCLIST",
    )
    .unwrap();
    assert_eq!(out, "VLA: 15.5 hr\n<i>Radio</i>: 15.5 hr\n");

    let err = make_context(
        Dialect::Html,
        vec![make_proposal("VLA", "10 hr"), make_proposal("VLA", "2 nght")],
    )
    .unwrap_err();
    assert!(matches!(err, ProcessorError::DisagreeingUnits { .. }));
    assert!(err.to_string().contains("VLA"));
}

#[test]
fn test_misc_list_with_alternates() {
    let items = vec![
        record!("outreach", "title" => "Planetarium show", "url" => "https://example.org/show"),
        record!("outreach", "title" => "School visit", "url" => ""),
        record!("service", "title" => "Referee", "url" => ""),
    ];
    let template = "FORMAT - [|title|](|url|)\n\
                    FORMAT_ALT - |title|\n\
                    FORMAT_ALT_FLAG_CHECK url\n\
                    RMISCLIST outreach,service";
    let out = render(Dialect::Markdown, items, template).unwrap();
    assert_eq!(
        out,
        "- Referee\n- School visit\n- [Planetarium show](https://example.org/show)\n"
    );
}

#[test]
fn test_repositories() {
    let items = vec![
        make_repo("me/old", 50, 60, "2019/05/01"),
        make_repo("team/new", 1, 400, "2023/09/12"),
    ];
    let template = "FORMAT |linkname| (|commit_frac|, |date|)\n\
                    RREPOLIST repo\n\
                    BEGIN_SUBST repo_stats\n\
                    |nrepos| repositories, |usercommits| commits, |primary_stars| stars\n\
                    END";
    let out = render(Dialect::Html, items, template).unwrap();
    assert_eq!(
        out,
        "<a href=\"https://github.com/team/new\">team/new</a> (&lt;1%, 2023 Sep)\n\
         <a href=\"https://github.com/me/old\">me/old</a> (83%, 2019 May)\n\
         2 repositories, 51 commits, 10 stars\n"
    );
}

#[test]
fn test_streaming_stops_at_first_error() {
    let mut context = make_context(Dialect::Html, two_pubs()).unwrap();
    let commands = standard_commands();
    let lines: Vec<_> = process_template(
        ["header", "PUBLIST refereed", "never reached"],
        &commands,
        &mut context,
    )
    .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].as_ref().unwrap(), "header");
    assert_eq!(
        lines[1].as_ref().unwrap_err().to_string(),
        "cannot use PUBLIST command before using FORMAT"
    );
}

#[test]
fn test_missing_field_names_field_and_record() {
    let err = render(
        Dialect::Html,
        vec![record!("talk", "title" => "Colloquium")],
        "FORMAT |title| at |venue|\nRMISCLIST talk",
    )
    .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("venue"), "{message}");
    assert!(message.contains("[talk]"), "{message}");
}

#[test]
fn test_today() {
    let out = render(Dialect::Html, vec![], "Updated TODAY.\nTODAY.\nTODAY").unwrap();
    assert_eq!(out, "Updated TODAY.\nJul\u{a0}4,\u{a0}2024.\n4 Jul 2024\n");
}
