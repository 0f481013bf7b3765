//! Console and JSON renderings of the derived views.

use std::io::Write;

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use sleepdex_core::constants::{MAX_STAR_TIER, MIN_STAR_TIER};
use sleepdex_core::{AcquisitionState, RarityGroup, Rank, Record, SummaryTable};

#[derive(Debug, Serialize)]
struct RowReport<'a> {
    #[serde(flatten)]
    record: &'a Record,
    acquired: bool,
}

#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    #[serde(flatten)]
    group: &'a RarityGroup,
    acquired: usize,
    existing: usize,
}

/// Outcome of a state-changing command.
#[derive(Debug, Serialize)]
pub struct ChangeReport {
    pub action: &'static str,
    pub requested: usize,
    pub changed: usize,
    pub acquired_total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flips: Option<Flips>,
}

/// Direction split of a toggle run. An id named twice flips twice.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Flips {
    pub on: usize,
    pub off: usize,
}

pub fn summary_console(out: &mut dyn Write, table: &SummaryTable) -> Result<()> {
    write!(out, "{:<8}", "")?;
    for column in &table.columns {
        write!(out, " | {}", column.label().bold())?;
    }
    writeln!(out)?;
    for row in &table.rows {
        write!(out, "{:<8}", row.kind.label().bright_cyan())?;
        for cell in &row.cells {
            let rate = format!("{}%", cell.rate);
            let rate = if cell.total > 0 && cell.acquired == cell.total {
                rate.green()
            } else {
                rate.normal()
            };
            write!(out, " | {cell} ({rate})")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn summary_json(out: &mut dyn Write, table: &SummaryTable) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, table)?;
    writeln!(out)?;
    Ok(())
}

pub fn rows_console(out: &mut dyn Write, rows: &[&Record], state: &AcquisitionState) -> Result<()> {
    if rows.is_empty() {
        writeln!(out, "{}", "No matching records.".yellow())?;
        return Ok(());
    }
    for record in rows {
        let mark = if state.is_acquired(&record.id) {
            "[x]".green()
        } else {
            "[ ]".normal()
        };
        writeln!(
            out,
            "{mark} {:<8} {:>4} {} {} {}",
            record.id,
            record.catalog_number,
            record.name.bold(),
            record.rarity_label,
            record.style_label
        )?;
    }
    let acquired = rows.iter().filter(|r| state.is_acquired(&r.id)).count();
    writeln!(out, "{acquired} / {} acquired", rows.len())?;
    Ok(())
}

pub fn rows_json(out: &mut dyn Write, rows: &[&Record], state: &AcquisitionState) -> Result<()> {
    let report: Vec<RowReport<'_>> = rows
        .iter()
        .map(|record| RowReport {
            record,
            acquired: state.is_acquired(&record.id),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn rarity_console(
    out: &mut dyn Write,
    groups: &[RarityGroup],
    state: &AcquisitionState,
) -> Result<()> {
    for group in groups {
        let cells: Vec<String> = (MIN_STAR_TIER..=MAX_STAR_TIER)
            .map(|tier| match group.variant(tier) {
                Some(id) if state.is_acquired(id) => format!("{}", "[x]".green()),
                Some(_) => "[ ]".to_string(),
                None => " - ".to_string(),
            })
            .collect();
        let (acquired, existing) = group.progress(state);
        writeln!(
            out,
            "{:>4} {} {} {acquired}/{existing}",
            group.catalog_number,
            group.name.bold(),
            cells.join(" ")
        )?;
    }
    Ok(())
}

pub fn rarity_json(
    out: &mut dyn Write,
    groups: &[RarityGroup],
    state: &AcquisitionState,
) -> Result<()> {
    let report: Vec<GroupReport<'_>> = groups
        .iter()
        .map(|group| {
            let (acquired, existing) = group.progress(state);
            GroupReport {
                group,
                acquired,
                existing,
            }
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn ranks_console(out: &mut dyn Write, ranks: &[Rank]) -> Result<()> {
    for rank in ranks {
        writeln!(out, "{rank}")?;
    }
    Ok(())
}

pub fn ranks_json(out: &mut dyn Write, ranks: &[Rank]) -> Result<()> {
    let labels: Vec<String> = ranks.iter().map(ToString::to_string).collect();
    serde_json::to_writer_pretty(&mut *out, &labels)?;
    writeln!(out)?;
    Ok(())
}

pub fn change_console(out: &mut dyn Write, change: &ChangeReport) -> Result<()> {
    write!(
        out,
        "{} {} of {} record(s)",
        change.action.bright_cyan(),
        change.changed.to_string().green(),
        change.requested
    )?;
    if let Some(flips) = change.flips {
        write!(out, " ({} on, {} off)", flips.on, flips.off)?;
    }
    writeln!(out, "; {} acquired in total", change.acquired_total)?;
    Ok(())
}

pub fn change_json(out: &mut dyn Write, change: &ChangeReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, change)?;
    writeln!(out)?;
    Ok(())
}
