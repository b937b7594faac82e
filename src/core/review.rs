//! Human-in-the-loop approval of wide diff rows.
//!
//! The loop itself is independent from the terminal: a `DecisionProvider`
//! answers one row at a time, so tests can drive it with canned answers.

use crate::errors::AppResult;
use crate::models::{ApprovalDecision, DiffRecord, Verdict};
use indexmap::IndexMap;
use std::io::{BufRead, Write};

/// Answer to a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    Override(IndexMap<String, String>),
    /// Stop reviewing: this row and every following one stay deferred.
    SkipRest,
}

pub trait DecisionProvider {
    fn decide(&mut self, record: &DiffRecord) -> AppResult<Answer>;
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReviewSummary {
    pub decisions: Vec<ApprovalDecision>,
    pub approved: usize,
    pub overridden: usize,
    pub rejected: usize,
    pub deferred: usize,
}

impl ReviewSummary {
    /// Approved decisions (plain or overridden), in presentation order.
    pub fn approved_decisions(&self) -> Vec<ApprovalDecision> {
        self.decisions
            .iter()
            .filter(|d| d.verdict.is_approved())
            .cloned()
            .collect()
    }
}

/// Walk `records` in order, asking `provider` about each one.
pub fn review<P: DecisionProvider + ?Sized>(
    records: &[DiffRecord],
    provider: &mut P,
) -> AppResult<ReviewSummary> {
    let mut summary = ReviewSummary::default();
    let mut skipping = false;

    for record in records {
        let verdict = if skipping {
            Verdict::Deferred
        } else {
            match provider.decide(record)? {
                Answer::Yes => Verdict::Approved,
                Answer::No => Verdict::Rejected,
                Answer::Override(map) if map.is_empty() => Verdict::Approved,
                Answer::Override(map) => Verdict::ApprovedWithOverride(map),
                Answer::SkipRest => {
                    skipping = true;
                    Verdict::Deferred
                }
            }
        };

        match &verdict {
            Verdict::Approved => summary.approved += 1,
            Verdict::ApprovedWithOverride(_) => summary.overridden += 1,
            Verdict::Rejected => summary.rejected += 1,
            Verdict::Deferred => summary.deferred += 1,
        }
        summary.decisions.push(ApprovalDecision::new(record.clone(), verdict));
    }

    Ok(summary)
}

/// Approves everything; used by the direct auto-update mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoApprove;

impl DecisionProvider for AutoApprove {
    fn decide(&mut self, _record: &DiffRecord) -> AppResult<Answer> {
        Ok(Answer::Yes)
    }
}

/// Interactive provider reading answers line by line.
///
/// `y` (or an empty line) approves, `n` rejects, `o` asks for replacement
/// values, `s` skips the remaining rows. End of input counts as `s`.
pub struct TerminalProvider<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalProvider<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> AppResult<Option<String>> {
        let mut line = String::new();
        let n = self.input.read_line(&mut line)?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn show(&mut self, record: &DiffRecord) -> AppResult<()> {
        writeln!(self.output, "\n{}", "-".repeat(50))?;
        writeln!(self.output, "Row-ID : {}", record.row_id)?;
        writeln!(self.output, "Type   : {}", record.change_type.as_str())?;
        writeln!(self.output, "Fields : {}", record.changed_fields_display())?;
        for field in &record.changed_fields {
            writeln!(
                self.output,
                "{:14}: {}  →  {}",
                field,
                record.old_value(field),
                record.new_value(field)
            )?;
        }
        Ok(())
    }

    fn ask_overrides(&mut self, record: &DiffRecord) -> AppResult<IndexMap<String, String>> {
        writeln!(self.output, "Manual override. Leave blank to keep proposed value.")?;

        let mut overrides = IndexMap::new();
        for field in &record.changed_fields {
            write!(self.output, "  {} [{}]: ", field, record.new_value(field))?;
            self.output.flush()?;
            if let Some(v) = self.read_line()?
                && !v.is_empty()
            {
                overrides.insert(field.clone(), v);
            }
        }
        Ok(overrides)
    }
}

impl<R: BufRead, W: Write> DecisionProvider for TerminalProvider<R, W> {
    fn decide(&mut self, record: &DiffRecord) -> AppResult<Answer> {
        self.show(record)?;
        write!(self.output, "(y)es / (n)o / (s)kip rest / (o)verride  [y]: ")?;
        self.output.flush()?;

        let Some(answer) = self.read_line()? else {
            return Ok(Answer::SkipRest);
        };

        let answer = match answer.to_lowercase().as_str() {
            "" | "y" | "yes" => Answer::Yes,
            "s" | "skip" => Answer::SkipRest,
            "o" | "override" => Answer::Override(self.ask_overrides(record)?),
            _ => Answer::No,
        };
        Ok(answer)
    }
}
