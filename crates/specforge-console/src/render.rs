//! Evaluation trace rendering.

use std::io::{self, Write};

use owo_colors::OwoColorize;
use specforge_core::Trace;

/// Formats a traced evaluation, one condition per line, followed by a
/// summary.
///
/// ```
/// use specforge_console::render_trace;
/// use specforge_core::Trace;
///
/// let text = render_trace(true, &Trace::default(), false);
/// assert_eq!(text, "PASSED │ 0 passed │ 0 failed\n");
/// ```
pub fn render_trace(result: bool, trace: &Trace, color: bool) -> String {
    let mut output = String::new();

    for entry in trace.entries() {
        let mark = match (entry.passed, color) {
            (true, true) => "✓".bright_green().to_string(),
            (false, true) => "✗".bright_red().to_string(),
            (true, false) => "✓".to_string(),
            (false, false) => "✗".to_string(),
        };
        output.push_str(&format!("  {} {}\n", mark, entry.condition));
    }

    let status = match (result, color) {
        (true, true) => "PASSED".bright_green().bold().to_string(),
        (false, true) => "FAILED".bright_red().bold().to_string(),
        (true, false) => "PASSED".to_string(),
        (false, false) => "FAILED".to_string(),
    };
    output.push_str(&format!(
        "{} │ {} passed │ {} failed\n",
        status,
        trace.passed().count(),
        trace.failed().count()
    ));

    output
}

/// Writes [`render_trace`] output to stdout using the console color
/// setting.
pub fn print_trace(result: bool, trace: &Trace) {
    let text = render_trace(result, trace, crate::color_enabled());
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}
