/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! The standard template commands.
//!
//! | command | arguments | effect |
//! |---|---|---|
//! | `FORMAT` | template... | set the primary formatter; clear alternates and flags |
//! | `FORMAT_ALT`, `FORMAT_ALT2` | template... or `None` | set or clear an alternate formatter |
//! | `FORMAT_ALT_FLAG_CHECK`, `FORMAT_ALT2_FLAG_CHECK` | field or `None` | set or clear a flag field |
//! | `MYABBREVNAME` | name... | abbreviated self-name for author lists |
//! | `PUBLIST` | group | one line per publication in the group |
//! | `TALLOCLIST` | | one line per facility of awarded time |
//! | `OBSEXPLIST` | | one line per facility of observing experience |
//! | `TEAMTALKLIST` | | one line per collaboration |
//! | `RMISCLIST` | sections | records of the sections, newest first |
//! | `RMISCLIST_IF`, `RMISCLIST_IF_NOT` | sections field | as above, gated on `field = y` |
//! | `RMISCLIST_CASE` | sections field value | as above, gated on `field = value` |
//! | `RREPOLIST` | sections | repositories, most recent first |
//! | `CITESTATS`, `CITESTATS_TEX` | template name | citation statistics, escaped or raw |
//! | `TODAY.`, `TODAY` | | the date as `Mon D, YYYY.` or `D Mon YYYY` |
//! | `BEGIN_SUBST` | `cite_stats` or `repo_stats` | format the block up to `END` |

use std::collections::HashSet;

use chrono::Datelike;
use worklog_core::{Holder, Record};

use crate::context::ProcessingContext;
use crate::error::{ProcessorError, Result};
use crate::interpreter::{CommandOutput, CommandTable, SpanHandler};
use crate::template::Formatter;
use crate::values::{cite_info, month_abbrev, NBSP};

/// Argument value that clears an alternate formatter or flag field.
const NONE_ARG: &str = "None";

/// A command table with every standard command registered.
pub fn standard_commands() -> CommandTable {
    let mut table = CommandTable::new();
    table
        .register("CITESTATS", cmd_cite_stats)
        .register("CITESTATS_TEX", cmd_cite_stats_tex)
        .register("FORMAT", cmd_format)
        .register("FORMAT_ALT", cmd_format_alt)
        .register("FORMAT_ALT2", cmd_format_alt2)
        .register("FORMAT_ALT_FLAG_CHECK", cmd_format_alt_flag_check)
        .register("FORMAT_ALT2_FLAG_CHECK", cmd_format_alt2_flag_check)
        .register("MYABBREVNAME", cmd_my_abbrev_name)
        .register("PUBLIST", cmd_pub_list)
        .register("TALLOCLIST", cmd_talloc_list)
        .register("OBSEXPLIST", cmd_obsexp_list)
        .register("TEAMTALKLIST", cmd_team_talk_list)
        .register("RMISCLIST", cmd_rev_misc_list)
        .register("RMISCLIST_IF", cmd_rev_misc_list_if)
        .register("RMISCLIST_IF_NOT", cmd_rev_misc_list_if_not)
        .register("RMISCLIST_CASE", cmd_rev_misc_list_case)
        .register("RREPOLIST", cmd_rev_repo_list)
        .register("TODAY.", cmd_today)
        .register("TODAY", cmd_today_invert)
        .register("BEGIN_SUBST", cmd_begin_subst);
    table
}

fn expect_args<'a, const N: usize>(
    command: &str,
    args: &[&'a str],
    expected: &str,
) -> Result<[&'a str; N]> {
    <[&str; N]>::try_from(args).map_err(|_| ProcessorError::BadArguments {
        command: command.to_string(),
        expected: expected.to_string(),
    })
}

fn sections(arg: &str) -> HashSet<&str> {
    arg.split(',').map(str::trim).collect()
}

fn cite_stats_with(ctx: &ProcessingContext, name: &str, raw: bool) -> Result<CommandOutput> {
    let stats = ctx.cite_stats()?;
    let text = ctx.resolve_template(name)?;
    let formatter = ctx.compile(raw, text.trim_end_matches('\n'));
    Ok(CommandOutput::Line(formatter.format(&stats)?))
}

fn cmd_cite_stats(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [name] = expect_args::<1>("CITESTATS", args, "a template name")?;
    cite_stats_with(ctx, name, false)
}

fn cmd_cite_stats_tex(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [name] = expect_args::<1>("CITESTATS_TEX", args, "a template name")?;
    cite_stats_with(ctx, name, true)
}

fn cmd_format(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    ctx.formatter = Some(ctx.compile(true, &args.join(" ")));
    ctx.formatter_alt = None;
    ctx.formatter_alt2 = None;
    ctx.alt_flag = None;
    ctx.alt2_flag = None;
    Ok(CommandOutput::nothing())
}

fn alternate(ctx: &ProcessingContext, args: &[&str]) -> Option<Formatter> {
    let text = args.join(" ");
    if text.trim() == NONE_ARG {
        None
    } else {
        Some(ctx.compile(true, &text))
    }
}

fn cmd_format_alt(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    ctx.formatter_alt = alternate(ctx, args);
    Ok(CommandOutput::nothing())
}

fn cmd_format_alt2(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    ctx.formatter_alt2 = alternate(ctx, args);
    Ok(CommandOutput::nothing())
}

fn flag_field(command: &str, args: &[&str]) -> Result<Option<String>> {
    let [field] = expect_args::<1>(command, args, "a field name or None")?;
    Ok((field != NONE_ARG).then(|| field.to_string()))
}

fn cmd_format_alt_flag_check(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    ctx.alt_flag = flag_field("FORMAT_ALT_FLAG_CHECK", args)?;
    Ok(CommandOutput::nothing())
}

fn cmd_format_alt2_flag_check(
    ctx: &mut ProcessingContext,
    args: &[&str],
) -> Result<CommandOutput> {
    ctx.alt2_flag = flag_field("FORMAT_ALT2_FLAG_CHECK", args)?;
    Ok(CommandOutput::nothing())
}

fn cmd_my_abbrev_name(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let name = args.join(" ");
    ctx.my_abbrev_name = (!name.is_empty()).then_some(name);
    Ok(CommandOutput::nothing())
}

fn cmd_pub_list(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [group] = expect_args::<1>("PUBLIST", args, "a publication group")?;
    let formatter = ctx.require_formatter("PUBLIST")?;
    let pubs = ctx
        .pubgroups
        .get(group)
        .ok_or_else(|| ProcessorError::UnknownGroup(group.to_string()))?;

    let npubs = pubs.len();
    let mut lines = Vec::with_capacity(npubs);
    for (num, record) in pubs.iter().enumerate() {
        let mut info = cite_info(
            record,
            ctx.my_abbrev_name.as_deref(),
            &ctx.options.advisee_marker,
        )?;
        info.set("number", num + 1);
        info.set("rev_number", npubs - num);
        lines.push(formatter.format(&info)?);
    }
    Ok(CommandOutput::Lines(lines))
}

fn format_all(ctx: &ProcessingContext, command: &str, items: &[Holder]) -> Result<CommandOutput> {
    let formatter = ctx.require_formatter(command)?;
    let lines = items
        .iter()
        .map(|item| formatter.format(item))
        .collect::<Result<Vec<_>>>()?;
    Ok(CommandOutput::Lines(lines))
}

fn cmd_talloc_list(ctx: &mut ProcessingContext, _args: &[&str]) -> Result<CommandOutput> {
    format_all(ctx, "TALLOCLIST", &ctx.time_allocs)
}

fn cmd_obsexp_list(ctx: &mut ProcessingContext, _args: &[&str]) -> Result<CommandOutput> {
    format_all(ctx, "OBSEXPLIST", &ctx.obs_exp)
}

fn cmd_team_talk_list(ctx: &mut ProcessingContext, _args: &[&str]) -> Result<CommandOutput> {
    let formatter = ctx.require_formatter("TEAMTALKLIST")?;
    let count = ctx.team_talks.len();
    let mut lines = Vec::with_capacity(count);
    for (i, talk) in ctx.team_talks.iter().enumerate() {
        let info = talk
            .clone()
            .with("end", if i + 1 < count { ";" } else { "" });
        lines.push(formatter.format(&info)?);
    }
    Ok(CommandOutput::Lines(lines))
}

/// Records of the given sections, newest (last loaded) first, that pass
/// `gate`, each formatted with the formatter its flag fields select.
fn rev_misc_list(
    ctx: &ProcessingContext,
    command: &str,
    section_arg: &str,
    gate: impl Fn(&Record) -> bool,
) -> Result<CommandOutput> {
    ctx.require_formatter(command)?;
    let wanted = sections(section_arg);
    let mut lines = Vec::new();
    for item in ctx.items.iter().rev() {
        if !wanted.contains(item.section.as_str()) || !gate(item) {
            continue;
        }
        let formatter = ctx.select_formatter(item, command)?;
        lines.push(formatter.format(item)?);
    }
    Ok(CommandOutput::Lines(lines))
}

fn cmd_rev_misc_list(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [sections] = expect_args::<1>("RMISCLIST", args, "a comma-separated section list")?;
    rev_misc_list(ctx, "RMISCLIST", sections, |_| true)
}

fn cmd_rev_misc_list_if(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [sections, gate] = expect_args::<2>("RMISCLIST_IF", args, "sections and a gate field")?;
    rev_misc_list(ctx, "RMISCLIST_IF", sections, |item| {
        item.field_or(gate, "n") == "y"
    })
}

fn cmd_rev_misc_list_if_not(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [sections, gate] = expect_args::<2>("RMISCLIST_IF_NOT", args, "sections and a gate field")?;
    rev_misc_list(ctx, "RMISCLIST_IF_NOT", sections, |item| {
        item.field_or(gate, "n") != "y"
    })
}

fn cmd_rev_misc_list_case(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [sections, gate, case] = expect_args::<3>(
        "RMISCLIST_CASE",
        args,
        "sections, a gate field and a value",
    )?;
    rev_misc_list(ctx, "RMISCLIST_CASE", sections, |item| {
        item.field_or(gate, "n") == case
    })
}

fn cmd_rev_repo_list(ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [section_arg] = expect_args::<1>("RREPOLIST", args, "a comma-separated section list")?;
    let formatter = ctx.require_formatter("RREPOLIST")?;
    let wanted = sections(section_arg);
    let lines = ctx
        .repos
        .iter()
        .rev()
        .filter(|repo| repo.section.as_deref().is_some_and(|s| wanted.contains(s)))
        .map(|repo| formatter.format(repo))
        .collect::<Result<Vec<_>>>()?;
    Ok(CommandOutput::Lines(lines))
}

fn month_name(ctx: &ProcessingContext) -> &'static str {
    month_abbrev(ctx.today().month()).unwrap_or_default()
}

fn cmd_today(ctx: &mut ProcessingContext, _args: &[&str]) -> Result<CommandOutput> {
    let today = ctx.today();
    let text = format!(
        "{}{}{},{}{}.",
        month_name(ctx),
        NBSP,
        today.day(),
        NBSP,
        today.year()
    );
    Ok(CommandOutput::Line(ctx.dialect().text(&text)))
}

fn cmd_today_invert(ctx: &mut ProcessingContext, _args: &[&str]) -> Result<CommandOutput> {
    let today = ctx.today();
    let text = format!("{} {} {}", today.day(), month_name(ctx), today.year());
    Ok(CommandOutput::Line(ctx.dialect().text(&text)))
}

/// Where a substitution block takes its fields from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SubstSource {
    CiteStats,
    RepoStats,
}

impl SubstSource {
    fn parse(name: &str) -> Result<Self> {
        match name {
            "cite_stats" => Ok(SubstSource::CiteStats),
            "repo_stats" => Ok(SubstSource::RepoStats),
            other => Err(ProcessorError::UnknownSource(other.to_string())),
        }
    }

    fn fields(self, ctx: &ProcessingContext) -> Result<Holder> {
        match self {
            SubstSource::CiteStats => ctx.cite_stats(),
            SubstSource::RepoStats => ctx.repo_stats(),
        }
    }
}

/// Collects a block of template text and formats it, raw, as one unit.
#[derive(Debug)]
struct SubstSpan {
    source: SubstSource,
    lines: Vec<String>,
}

impl SpanHandler for SubstSpan {
    fn push_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn finish(self: Box<Self>, ctx: &mut ProcessingContext) -> Result<Vec<String>> {
        let fields = self.source.fields(ctx)?;
        let formatter = ctx.compile(true, &self.lines.join("\n"));
        Ok(vec![formatter.format(&fields)?])
    }
}

fn cmd_begin_subst(_ctx: &mut ProcessingContext, args: &[&str]) -> Result<CommandOutput> {
    let [source] = expect_args::<1>("BEGIN_SUBST", args, "cite_stats or repo_stats")?;
    Ok(CommandOutput::Span(Box::new(SubstSpan {
        source: SubstSource::parse(source)?,
        lines: Vec::new(),
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ProcessingOptions;
    use crate::interpreter::render_template;
    use crate::resolver::MemoryResolver;
    use chrono::NaiveDate;
    use worklog_core::{record, Dialect};

    fn run(dialect: Dialect, items: Vec<Record>, template: &str) -> Result<String> {
        let options = ProcessingOptions::default()
            .with_dialect(dialect)
            .with_today(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        let mut ctx = ProcessingContext::new(items, options)?.with_resolver(
            MemoryResolver::with_templates([("cites.html", "<p>h = |hindex|</p>\n")]),
        );
        render_template(template, &standard_commands(), &mut ctx)
    }

    fn misc(title: &str, url: &str) -> Record {
        record!("misc", "title" => title, "url" => url, "public" => "y")
    }

    #[test]
    fn test_list_before_format_is_an_error() {
        let err = run(Dialect::Html, vec![], "PUBLIST refereed").unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot use PUBLIST command before using FORMAT"
        );
    }

    #[test]
    fn test_unknown_group() {
        let err = run(Dialect::Html, vec![], "FORMAT |title|\nPUBLIST nonsense").unwrap_err();
        assert!(matches!(err, ProcessorError::UnknownGroup(ref g) if g == "nonsense"));
    }

    #[test]
    fn test_bad_arguments() {
        let err = run(Dialect::Html, vec![], "FORMAT x\nRMISCLIST").unwrap_err();
        assert!(matches!(err, ProcessorError::BadArguments { .. }));
    }

    #[test]
    fn test_rmisclist_newest_first_with_gates() {
        let items = vec![
            misc("one", "u1"),
            record!("talk", "title" => "skipped"),
            misc("two", "u2").with("public", "n"),
            misc("three", "u3"),
        ];
        let template = "FORMAT * |title|\nRMISCLIST misc,other";
        let out = run(Dialect::Html, items.clone(), template).unwrap();
        assert_eq!(out, "* three\n* two\n* one\n");

        let template = "FORMAT |title|\nRMISCLIST_IF misc public";
        let out = run(Dialect::Html, items.clone(), template).unwrap();
        assert_eq!(out, "three\none\n");

        let template = "FORMAT |title|\nRMISCLIST_IF_NOT misc public";
        let out = run(Dialect::Html, items.clone(), template).unwrap();
        assert_eq!(out, "two\n");

        let template = "FORMAT |title|\nRMISCLIST_CASE misc public n";
        let out = run(Dialect::Html, items, template).unwrap();
        assert_eq!(out, "two\n");
    }

    #[test]
    fn test_rmisclist_alternate_formatters() {
        let items = vec![misc("one", ""), misc("two", "http://x")];
        let template = "FORMAT <a href=\"|url|\">|title|</a>\n\
                        FORMAT_ALT |title|\n\
                        FORMAT_ALT_FLAG_CHECK url\n\
                        RMISCLIST misc";
        let out = run(Dialect::Html, items.clone(), template).unwrap();
        assert_eq!(out, "<a href=\"http://x\">two</a>\none\n");

        let cleared = format!("{}\nFORMAT_ALT_FLAG_CHECK None\nRMISCLIST misc", template);
        let out = run(Dialect::Html, items.clone(), &cleared).unwrap();
        assert!(out.ends_with("<a href=\"http://x\">two</a>\n<a href=\"\">one</a>\n"));

        // FORMAT resets the alternates.
        let reset = "FORMAT_ALT |title|\nFORMAT_ALT_FLAG_CHECK url\nFORMAT [|title|]\nRMISCLIST misc";
        let out = run(Dialect::Html, items, reset).unwrap();
        assert_eq!(out, "[two]\n[one]\n");
    }

    #[test]
    fn test_missing_alternate_is_an_error() {
        let items = vec![misc("one", "")];
        let err = run(
            Dialect::Html,
            items,
            "FORMAT |title|\nFORMAT_ALT_FLAG_CHECK url\nRMISCLIST misc",
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot use RMISCLIST command before using FORMAT_ALT"
        );
    }

    #[test]
    fn test_second_alternate() {
        let items = vec![
            misc("both", "u").with("doi", "d"),
            misc("no-doi", "u").with("doi", ""),
            misc("no-url", "").with("doi", "d"),
        ];
        let template = "FORMAT P |title|\n\
                        FORMAT_ALT A |title|\n\
                        FORMAT_ALT2 B |title|\n\
                        FORMAT_ALT_FLAG_CHECK url\n\
                        FORMAT_ALT2_FLAG_CHECK doi\n\
                        RMISCLIST misc";
        let out = run(Dialect::Markdown, items, template).unwrap();
        assert_eq!(out, "A no-url\nB no-doi\nP both\n");
    }

    #[test]
    fn test_today() {
        let out = run(Dialect::Latex, vec![], "TODAY.\nTODAY").unwrap();
        assert_eq!(out, "Jul~4,~2024.\n4 Jul 2024\n");
    }

    #[test]
    fn test_cite_stats_template() {
        let items = vec![
            record!("pub", "refereed" => "y", "mypos" => "1", "adscites" => "2024/01/01 3"),
            record!("pub", "refereed" => "y", "mypos" => "2", "adscites" => "2024/01/01 2"),
        ];
        let out = run(Dialect::Html, items.clone(), "CITESTATS_TEX cites.html").unwrap();
        assert_eq!(out, "<p>h = 2</p>\n");

        let out = run(Dialect::Html, items, "CITESTATS cites.html").unwrap();
        assert_eq!(out, "&lt;p&gt;h = 2&lt;/p&gt;\n");

        let err = run(Dialect::Html, vec![], "CITESTATS missing.html").unwrap_err();
        assert!(matches!(err, ProcessorError::MissingTemplate(_)));
    }

    #[test]
    fn test_begin_subst_repo_stats() {
        let items = vec![record!("repo",
            "name" => "me/tool", "usercommits" => "8", "allcommits" => "10",
            "lastusercommit" => "2023/02/01", "stars" => "4", "forks" => "1")];
        let out = run(
            Dialect::Html,
            items,
            "BEGIN_SUBST repo_stats\n|nrepos| repos,\n|primary_stars| stars\nEND",
        )
        .unwrap();
        assert_eq!(out, "1 repos,\n4 stars\n");
    }

    #[test]
    fn test_begin_subst_unknown_source() {
        let err = run(Dialect::Html, vec![], "BEGIN_SUBST weather\nEND").unwrap_err();
        assert!(matches!(err, ProcessorError::UnknownSource(_)));
    }

    #[test]
    fn test_rrepolist_and_talks() {
        let items = vec![
            record!("repo", "name" => "a", "usercommits" => "1", "allcommits" => "1",
                "lastusercommit" => "2020/01/01"),
            record!("repo", "name" => "b", "usercommits" => "1", "allcommits" => "1",
                "lastusercommit" => "2022/01/01"),
            record!("talk", "venue" => "team", "collab" => "X", "year" => "2020"),
            record!("talk", "venue" => "team", "collab" => "Y", "year" => "2019"),
        ];
        let out = run(
            Dialect::Html,
            items,
            "FORMAT |name| (|date|)\nRREPOLIST repo\nFORMAT |collab||end|\nTEAMTALKLIST",
        )
        .unwrap();
        assert_eq!(out, "b (2022 Jan)\na (2020 Jan)\nX;\nY\n");
    }
}
