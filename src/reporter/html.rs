//! HTML reporter: generates a self-contained requirements quality report
//!
//! Everything is rendered server-side into one file with inline CSS. Every
//! interpolated string goes through [`escape_html`].

use crate::analyzer::engine::AggregateStats;
use crate::analyzer::scoring::ScoreCalculator;
use crate::{AnalysisResult, Category, Criterion, Finding, Severity, Verdict};
use chrono::Local;

/// Escape the five HTML-significant characters
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Reporter that generates a self-contained HTML document
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    /// Generate the full HTML report
    pub fn report(&self, results: &[AnalysisResult], stats: &AggregateStats) -> String {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        self.render(results, stats, &generated)
    }

    fn render(&self, results: &[AnalysisResult], stats: &AggregateStats, generated: &str) -> String {
        let mut html = String::with_capacity(16_384);
        html.push_str(Self::template_head());
        html.push_str("<header><h1>Requirements Quality Report</h1>");
        html.push_str(&format!(
            "<p class=\"meta\">{} file(s) &middot; {} functional &middot; {} non-functional &middot; {} finding(s)</p>",
            stats.files_analyzed, stats.functional, stats.non_functional, stats.total_findings
        ));
        html.push_str("</header>\n<main>\n");

        if results.is_empty() {
            html.push_str("<p class=\"empty\">No requirements analyzed.</p>\n");
        }
        for result in results {
            self.push_result(&mut html, result);
        }

        html.push_str("</main>\n<footer>Generated ");
        html.push_str(&escape_html(generated));
        html.push_str("</footer>\n</body>\n</html>\n");
        html
    }

    fn push_result(&self, html: &mut String, result: &AnalysisResult) {
        html.push_str("<section class=\"doc\">\n<h2>");
        html.push_str(&escape_html(&result.source.display().to_string()));
        html.push_str("</h2>\n");

        self.push_matrix(html, result);

        for category in Category::ALL {
            let bucket = result.requirements.bucket(category);
            html.push_str(&format!(
                "<h3>{} ({})</h3>\n",
                escape_html(&category.to_string()),
                bucket.len()
            ));
            if bucket.is_empty() {
                html.push_str("<p class=\"empty\">None</p>\n");
                continue;
            }
            html.push_str("<ol>\n");
            for req in bucket {
                html.push_str(&format!(
                    "<li value=\"{}\">{}</li>\n",
                    req.line,
                    escape_html(&req.text)
                ));
            }
            html.push_str("</ol>\n");
        }

        if !result.findings.is_empty() {
            self.push_findings(html, &result.findings);
        }

        html.push_str("<h3>Recommendations</h3>\n<ul class=\"recs\">\n");
        for rec in ScoreCalculator::recommendations(&result.matrix) {
            html.push_str(&format!("<li>{}</li>\n", escape_html(&rec)));
        }
        html.push_str("</ul>\n</section>\n");
    }

    fn push_matrix(&self, html: &mut String, result: &AnalysisResult) {
        html.push_str("<table class=\"matrix\">\n<thead><tr><th>Criterion</th>");
        for category in Category::ALL {
            html.push_str(&format!("<th>{}</th>", escape_html(&category.to_string())));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for criterion in Criterion::ALL {
            html.push_str(&format!("<tr><th>{}</th>", criterion));
            for category in Category::ALL {
                let verdict = result.matrix.get(criterion, category);
                html.push_str(&format!(
                    "<td class=\"{}\" title=\"{}\">{}</td>",
                    Self::verdict_class(verdict),
                    escape_html(ScoreCalculator::verdict_description(verdict)),
                    verdict
                ));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody>\n</table>\n");
    }

    fn push_findings(&self, html: &mut String, findings: &[Finding]) {
        html.push_str("<h3>Findings</h3>\n<ul class=\"findings\">\n");
        for finding in findings {
            let sev = match finding.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
                Severity::Info => "info",
            };
            html.push_str(&format!(
                "<li><span class=\"sev sev-{sev}\">{sev}</span> <code>L{}</code> <code>{}</code> {}",
                finding.line,
                finding.kind,
                escape_html(&finding.message),
            ));
            if let Some(ref suggestion) = finding.suggestion {
                html.push_str(&format!(
                    "<div class=\"suggestion\">{}</div>",
                    escape_html(suggestion)
                ));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    fn verdict_class(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::Excellent => "v-excellent",
            Verdict::Good => "v-good",
            Verdict::Sufficient => "v-sufficient",
            Verdict::Fair => "v-fair",
            Verdict::Poor => "v-poor",
        }
    }

    fn template_head() -> &'static str {
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Reqmatrix – Requirements Quality Report</title>
<style>
:root{--bg:#0d0d11;--surface:#16161b;--border:#2a2a32;--text:#e4e4e7;--muted:#71717a;--green:#22c55e;--lime:#84cc16;--yellow:#eab308;--orange:#f97316;--red:#ef4444;--blue:#3b82f6;--radius:8px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;background:var(--bg);color:var(--text);line-height:1.5}
header{padding:1.25rem 1.5rem;border-bottom:1px solid var(--border)}
header h1{font-size:1.125rem;font-weight:700}
.meta,footer{font-size:.8125rem;color:var(--muted)}
main{padding:1rem 1.5rem;max-width:960px}
footer{padding:1rem 1.5rem;border-top:1px solid var(--border)}
.doc{background:var(--surface);border:1px solid var(--border);border-radius:var(--radius);padding:1rem;margin-bottom:1rem}
.doc h2{font-size:1rem;margin-bottom:.75rem;word-break:break-all}
.doc h3{font-size:.8125rem;text-transform:uppercase;letter-spacing:.5px;color:var(--muted);margin:1rem 0 .375rem}
table.matrix{border-collapse:collapse;width:100%;font-size:.875rem}
table.matrix th,table.matrix td{border:1px solid var(--border);padding:.4rem .75rem;text-align:left}
table.matrix td{font-weight:600}
.v-excellent{color:var(--green)}.v-good{color:var(--lime)}.v-sufficient{color:var(--yellow)}.v-fair{color:var(--orange)}.v-poor{color:var(--red)}
ol,ul{padding-left:1.5rem;font-size:.8125rem}
li{margin-bottom:.25rem}
.sev{font-size:.6875rem;font-weight:700;padding:.1rem .375rem;border-radius:4px;text-transform:uppercase}
.sev-error{background:rgba(239,68,68,.15);color:var(--red)}
.sev-warning{background:rgba(234,179,8,.12);color:var(--yellow)}
.sev-info{background:rgba(59,130,246,.12);color:var(--blue)}
code{font-family:'SF Mono',Consolas,monospace;font-size:.75rem;color:var(--muted)}
.suggestion{font-size:.75rem;color:var(--muted);font-style:italic}
.empty{color:var(--muted);font-size:.8125rem}
</style>
</head>
<body>
"##
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}
