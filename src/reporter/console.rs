//! Console reporter with colored output

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{AnalysisResult, Category, Criterion, Finding, Severity, ValidationMatrix, Verdict};
use colored::Colorize;

const CRITERION_WIDTH: usize = 14;
const CELL_WIDTH: usize = 16;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Whether to show verbose output
    verbose: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            verbose: false,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Enable verbose output
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    /// Report a single analysis result
    pub fn report(&self, result: &AnalysisResult) {
        self.print_header(result);
        print!("{}", self.render_matrix(&result.matrix));
        println!();

        self.print_legend();

        if !result.findings.is_empty() {
            self.print_findings(&result.findings);
        }

        self.print_recommendations(&result.matrix);
        println!();
    }

    /// Report multiple results with summary
    pub fn report_many(&self, results: &[AnalysisResult], stats: &AggregateStats) {
        for result in results {
            self.report(result);
            println!("{}", "─".repeat(60));
        }

        self.print_summary(stats);
    }

    /// Report in quiet mode (one line per input)
    pub fn report_quiet(&self, result: &AnalysisResult) {
        println!("{}", self.quiet_line(result));
    }

    /// `path: F 2 / NF 1 | worst Fair | completeness Good/Good correctness Fair/Excellent ...`
    pub fn quiet_line(&self, result: &AnalysisResult) -> String {
        let cells = Criterion::ALL
            .into_iter()
            .map(|criterion| {
                let row = result.matrix.row(criterion);
                format!(
                    "{} {}/{}",
                    criterion.to_string().to_lowercase(),
                    row.functional,
                    row.non_functional
                )
            })
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            "{}: F {} / NF {} | worst {} | {}",
            result.source.display(),
            result.stats.functional,
            result.stats.non_functional,
            self.colorize_verdict(result.matrix.worst(), 0),
            cells
        )
    }

    /// The 3x2 table, one criterion per line
    pub fn render_matrix(&self, matrix: &ValidationMatrix) -> String {
        let mut out = String::new();
        let header = format!(
            "   {:<cw$}{:<w$}{:<w$}",
            "Criterion",
            "Functional",
            "Non-Functional",
            cw = CRITERION_WIDTH,
            w = CELL_WIDTH
        );
        out.push_str(&self.bold(header.trim_end()));
        out.push('\n');

        for criterion in Criterion::ALL {
            out.push_str(&format!(
                "   {:<cw$}",
                criterion.to_string(),
                cw = CRITERION_WIDTH
            ));
            for category in Category::ALL {
                out.push_str(&self.colorize_verdict(matrix.get(criterion, category), CELL_WIDTH));
            }
            let trimmed = out.trim_end().len();
            out.truncate(trimmed);
            out.push('\n');
        }
        out
    }

    fn print_header(&self, result: &AnalysisResult) {
        println!();
        println!(
            "{}",
            self.bold(&format!(
                "📋 Requirements Quality Analysis: {}",
                result.source.display()
            ))
        );
        println!(
            "   Functional: {} | Non-Functional: {} | Skipped lines: {}",
            result.stats.functional, result.stats.non_functional, result.stats.skipped_lines
        );
        println!();
    }

    fn print_legend(&self) {
        println!("   {}", self.bold("Legend:"));
        for verdict in Verdict::ALL.into_iter().rev() {
            println!("   {}", ScoreCalculator::verdict_description(verdict));
        }
        println!();
    }

    fn print_findings(&self, findings: &[Finding]) {
        println!("   {}", self.bold("Findings:"));

        let infos = findings
            .iter()
            .filter(|f| f.severity == Severity::Info)
            .count();
        let show_info = self.verbose || findings.len() <= 5;

        for category in Category::ALL {
            let in_category: Vec<&Finding> = findings
                .iter()
                .filter(|f| f.category == category)
                .filter(|f| show_info || f.severity != Severity::Info)
                .collect();
            if in_category.is_empty() {
                continue;
            }
            println!("   {}", category);
            for finding in in_category {
                self.print_finding(finding);
            }
        }

        if !show_info && infos > 0 {
            println!(
                "   {} {} additional findings (use --verbose to show)",
                self.paint("ℹ", Severity::Info),
                infos
            );
        }

        println!();
    }

    fn print_finding(&self, finding: &Finding) {
        let icon = match finding.severity {
            Severity::Error => self.paint("✗", Severity::Error),
            Severity::Warning => self.paint("⚠", Severity::Warning),
            Severity::Info => self.paint("ℹ", Severity::Info),
        };

        let location = format!("L{}", finding.line);
        println!(
            "     {} {} [{}] {}",
            icon,
            self.dimmed(&location),
            self.dimmed(&finding.kind.to_string()),
            finding.message
        );

        if self.verbose {
            if let Some(ref suggestion) = finding.suggestion {
                println!("         {} {}", self.dimmed("→"), suggestion);
            }
        }
    }

    fn print_recommendations(&self, matrix: &ValidationMatrix) {
        let recs = ScoreCalculator::recommendations(matrix);

        println!("   {}", self.bold("Recommendations:"));
        for rec in recs.iter().take(3) {
            let arrow = if self.use_colors {
                "→".cyan().to_string()
            } else {
                "→".to_string()
            };
            println!("   {} {}", arrow, rec);
        }
    }

    fn print_summary(&self, stats: &AggregateStats) {
        println!();
        println!("{}", "═".repeat(60));
        println!("{}", self.bold("Summary"));
        println!("{}", "═".repeat(60));
        println!("   Files analyzed:  {}", self.bold(&stats.files_analyzed.to_string()));
        println!(
            "   Requirements:    {} functional, {} non-functional",
            stats.functional, stats.non_functional
        );
        println!("   Skipped lines:   {}", stats.skipped_lines);
        println!("   Total findings:  {}", stats.total_findings);
        if let Some(worst) = stats.worst_verdict {
            println!("   Worst verdict:   {}", self.colorize_verdict(worst, 0));
        }
        println!();
    }

    /// Pad first so ANSI codes do not break column alignment
    fn colorize_verdict(&self, verdict: Verdict, width: usize) -> String {
        let s = format!("{:<width$}", verdict.as_str(), width = width);
        if !self.use_colors {
            return s;
        }
        match verdict {
            Verdict::Excellent => s.green().bold().to_string(),
            Verdict::Good => s.green().to_string(),
            Verdict::Sufficient => s.yellow().to_string(),
            Verdict::Fair => s.red().to_string(),
            Verdict::Poor => s.red().bold().to_string(),
        }
    }

    fn paint(&self, s: &str, severity: Severity) -> String {
        if !self.use_colors {
            return s.to_string();
        }
        match severity {
            Severity::Error => s.red().to_string(),
            Severity::Warning => s.yellow().to_string(),
            Severity::Info => s.blue().to_string(),
        }
    }

    fn bold(&self, s: &str) -> String {
        if self.use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    }

    fn dimmed(&self, s: &str) -> String {
        if self.use_colors {
            s.dimmed().to_string()
        } else {
            s.to_string()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}
