use crate::aggregate::SummaryStatistics;
use crate::dov::{Dov, REPORT_ALPHABET};
use crate::report::{ContingencyReport, FrequencyReport, StepIncreaseReport, StepStatisticsReport};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use serde::{Deserialize, Serialize};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
    /// `&`-separated rows ready to paste into a LaTeX tabular
    Latex,
}

pub trait ReportWriter {
    fn write_frequency(&mut self, report: &FrequencyReport) -> anyhow::Result<()>;
    fn write_contingency(&mut self, report: &ContingencyReport) -> anyhow::Result<()>;
    fn write_step_statistics(&mut self, report: &StepStatisticsReport) -> anyhow::Result<()>;
    fn write_step_increases(&mut self, report: &StepIncreaseReport) -> anyhow::Result<()>;
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
        OutputFormat::Latex => Box::new(LatexWriter::new(writer)),
    }
}

const STATISTICS_HEADER: [&str; 6] = ["count", "mean", "median", "stdev", "min", "max"];

fn statistics_cells(stats: &SummaryStatistics) -> [String; 6] {
    [
        stats.count.to_string(),
        format!("{:.2}", stats.mean),
        format!("{:.2}", stats.median),
        format!("{:.2}", stats.stdev),
        format!("{:.2}", stats.min),
        format!("{:.2}", stats.max),
    ]
}

fn alphabet_labels() -> Vec<String> {
    REPORT_ALPHABET.iter().map(Dov::to_string).collect()
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_json<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_frequency(&mut self, report: &FrequencyReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_contingency(&mut self, report: &ContingencyReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_step_statistics(&mut self, report: &StepStatisticsReport) -> anyhow::Result<()> {
        self.write_json(report)
    }

    fn write_step_increases(&mut self, report: &StepIncreaseReport) -> anyhow::Result<()> {
        self.write_json(report)
    }
}

/// Rows joined by ` & ` and terminated by ` \\`.
pub struct LatexWriter<W: Write> {
    writer: W,
    delimiter: &'static str,
    end: &'static str,
}

impl<W: Write> LatexWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            delimiter: " & ",
            end: " \\\\ \n",
        }
    }

    fn row<I, S>(&mut self, cells: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let cells: Vec<String> = cells.into_iter().map(|c| c.to_string()).collect();
        write!(self.writer, "{}{}", cells.join(self.delimiter), self.end)?;
        Ok(())
    }
}

impl<W: Write> ReportWriter for LatexWriter<W> {
    fn write_frequency(&mut self, report: &FrequencyReport) -> anyhow::Result<()> {
        self.row(alphabet_labels())?;
        self.row(report.table.rows().map(|(_, count)| count))
    }

    fn write_contingency(&mut self, report: &ContingencyReport) -> anyhow::Result<()> {
        self.row(alphabet_labels())?;
        for (_, counts) in report.table.rows() {
            self.row(counts.iter())?;
        }
        Ok(())
    }

    fn write_step_statistics(&mut self, report: &StepStatisticsReport) -> anyhow::Result<()> {
        for group in &report.groups {
            writeln!(self.writer, "{}", group.kind.label())?;
            writeln!(self.writer, "Failed: {}", group.failed)?;
            if let Some(stats) = &group.statistics {
                self.row(STATISTICS_HEADER)?;
                self.row(statistics_cells(stats))?;
            }
        }
        Ok(())
    }

    fn write_step_increases(&mut self, report: &StepIncreaseReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "The number of {} steps increased for {} regexes.",
            report.kind.label(),
            report.patterns.len()
        )?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn table_row<I, S>(&mut self, cells: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        let cells: Vec<String> = cells.into_iter().map(|c| c.to_string()).collect();
        writeln!(self.writer, "| {} |", cells.join(" | "))?;
        Ok(())
    }

    fn separator(&mut self, columns: usize) -> anyhow::Result<()> {
        self.table_row(std::iter::repeat_n("---", columns))
    }
}

impl<W: Write> ReportWriter for MarkdownWriter<W> {
    fn write_frequency(&mut self, report: &FrequencyReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Degree of Vulnerability")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Source: `{}`, generated {}",
            report.source,
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer)?;
        self.table_row(["Class", "Patterns"])?;
        self.separator(2)?;
        for (dov, count) in report.table.rows() {
            self.table_row([dov.to_string(), count.to_string()])?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Total: {} patterns ({} skipped)",
            report.table.total(),
            report.skipped
        )?;
        Ok(())
    }

    fn write_contingency(&mut self, report: &ContingencyReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# Degree of Vulnerability Comparison")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Rows: `{}`, columns: `{}`",
            report.before, report.after
        )?;
        writeln!(self.writer)?;
        self.table_row(std::iter::once(String::new()).chain(alphabet_labels()))?;
        self.separator(REPORT_ALPHABET.len() + 1)?;
        for (dov, counts) in report.table.rows() {
            self.table_row(
                std::iter::once(format!("**{}**", dov))
                    .chain(counts.iter().map(|c| c.to_string())),
            )?;
        }
        writeln!(self.writer)?;
        let s = &report.summary;
        writeln!(
            self.writer,
            "Increased: {}, decreased: {}, unchanged: {}, incomparable: {}",
            s.increased, s.decreased, s.unchanged, s.incomparable
        )?;
        Ok(())
    }

    fn write_step_statistics(&mut self, report: &StepStatisticsReport) -> anyhow::Result<()> {
        writeln!(self.writer, "# {} statistics", report.measure.label())?;
        writeln!(self.writer)?;
        self.table_row(
            ["inputs", "failed"]
                .iter()
                .chain(STATISTICS_HEADER.iter()),
        )?;
        self.separator(STATISTICS_HEADER.len() + 2)?;
        for group in &report.groups {
            let stats = group
                .statistics
                .as_ref()
                .map(|s| statistics_cells(s).to_vec())
                .unwrap_or_else(|| vec!["-".to_string(); STATISTICS_HEADER.len()]);
            self.table_row(
                [group.kind.label().to_string(), group.failed.to_string()]
                    .into_iter()
                    .chain(stats),
            )?;
        }
        Ok(())
    }

    fn write_step_increases(&mut self, report: &StepIncreaseReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "# Step increases ({} inputs, threshold {})",
            report.kind.label(),
            report.threshold
        )?;
        writeln!(self.writer)?;
        self.table_row(["Pattern", "Input", "Before", "After"])?;
        self.separator(4)?;
        for pattern in &report.patterns {
            for increase in &pattern.increases {
                self.table_row([
                    format!("`{}`", pattern.pattern),
                    increase
                        .input
                        .clone()
                        .unwrap_or_else(|| format!("#{}", increase.increase.index)),
                    increase.increase.before.to_string(),
                    increase.increase.after.to_string(),
                ])?;
            }
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Steps increased for {} patterns.",
            report.patterns.len()
        )?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn new_table(header: Vec<Cell>) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(header);
        table
    }
}

/// Highlight color for a class: red for exponential, yellow for other
/// super-linear growth, dim for indeterminate results.
fn dov_color(dov: Dov) -> Option<Color> {
    match dov {
        Dov::Exponential(_) => Some(Color::Red),
        Dov::Polynomial(_) => Some(Color::Yellow),
        Dov::Unknown | Dov::Failed => Some(Color::DarkGrey),
        Dov::Constant | Dov::Linear => None,
    }
}

fn dov_cell(dov: Dov) -> Cell {
    let cell = Cell::new(dov.to_string());
    match dov_color(dov) {
        Some(color) => cell.fg(color),
        None => cell,
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_frequency(&mut self, report: &FrequencyReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Degree of Vulnerability".bold())?;
        writeln!(self.writer, "Source: {}", report.source)?;

        let mut table = Self::new_table(vec![Cell::new("Class"), Cell::new("Patterns")]);
        for (dov, count) in report.table.rows() {
            table.add_row(vec![dov_cell(dov), Cell::new(count)]);
        }
        writeln!(self.writer, "{}", table)?;

        let vulnerable: usize = report
            .table
            .rows()
            .filter(|(dov, _)| dov.is_vulnerable())
            .map(|(_, count)| count)
            .sum();
        writeln!(
            self.writer,
            "{} patterns, {} super-linear, {} skipped",
            report.table.total(),
            vulnerable.to_string().red(),
            report.skipped
        )?;
        Ok(())
    }

    fn write_contingency(&mut self, report: &ContingencyReport) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", "Degree of Vulnerability Comparison".bold())?;
        writeln!(self.writer, "Rows: {}", report.before)?;
        writeln!(self.writer, "Columns: {}", report.after)?;

        let header = std::iter::once(Cell::new(""))
            .chain(REPORT_ALPHABET.iter().map(|d| dov_cell(*d)))
            .collect();
        let mut table = Self::new_table(header);
        for (dov, counts) in report.table.rows() {
            let row: Vec<Cell> = std::iter::once(dov_cell(dov))
                .chain(counts.iter().map(Cell::new))
                .collect();
            table.add_row(row);
        }
        writeln!(self.writer, "{}", table)?;

        let s = &report.summary;
        writeln!(
            self.writer,
            "{} increased, {} decreased, {} unchanged, {} incomparable",
            s.increased.to_string().red(),
            s.decreased.to_string().green(),
            s.unchanged,
            s.incomparable
        )?;
        Ok(())
    }

    fn write_step_statistics(&mut self, report: &StepStatisticsReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{}",
            format!("Average {} per pattern", report.measure.label()).bold()
        )?;
        writeln!(self.writer, "Source: {}", report.source)?;

        let header = ["inputs", "failed"]
            .iter()
            .chain(STATISTICS_HEADER.iter())
            .map(Cell::new)
            .collect();
        let mut table = Self::new_table(header);
        for group in &report.groups {
            let mut row = vec![Cell::new(group.kind.label()), Cell::new(group.failed)];
            match &group.statistics {
                Some(stats) => row.extend(statistics_cells(stats).iter().map(Cell::new)),
                None => row.extend(STATISTICS_HEADER.iter().map(|_| Cell::new("-"))),
            }
            table.add_row(row);
        }
        writeln!(self.writer, "{}", table)?;
        Ok(())
    }

    fn write_step_increases(&mut self, report: &StepIncreaseReport) -> anyhow::Result<()> {
        for pattern in &report.patterns {
            writeln!(self.writer, "{}", pattern.pattern.bold())?;
            for increase in &pattern.increases {
                writeln!(
                    self.writer,
                    "  {:?}: {} -> {} (+{})",
                    increase.input.as_deref().unwrap_or("?"),
                    increase.increase.before,
                    increase.increase.after,
                    increase.increase.delta().to_string().red()
                )?;
            }
        }
        writeln!(
            self.writer,
            "The number of {} steps increased by more than {} for {} regexes.",
            report.kind.label(),
            report.threshold,
            report.patterns.len()
        )?;
        Ok(())
    }
}
