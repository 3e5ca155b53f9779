//! Colorful console output for specification evaluation.
//!
//! Provides a custom `tracing` layer that formats SpecForge events with
//! colors, and renderers for evaluation traces.
//!
//! ## Log Levels
//!
//! - **DEBUG**: Materialization of cached specifications, query summaries
//! - **TRACE**: Memo cache hits, misses and capacity pressure

mod render;


pub use render::{print_trace, render_trace};

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use specforge_config::ConsoleConfig;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static COLOR: AtomicBool = AtomicBool::new(true);

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_FILTER: &str = "specforge=info";

/// Initializes console output with default settings.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with(&ConsoleConfig::default());
}

/// Initializes console output from configuration.
///
/// `RUST_LOG` takes precedence over `config.filter`. An unparsable filter
/// falls back to [`DEFAULT_FILTER`].
pub fn init_with(config: &ConsoleConfig) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        COLOR.store(config.color, Ordering::Relaxed);

        let directive = config.filter.as_deref().unwrap_or(DEFAULT_FILTER);
        let filter = EnvFilter::builder()
            .with_default_directive(default_directive(directive))
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SpecConsoleLayer)
            .try_init();
    });
}

fn default_directive(directive: &str) -> Directive {
    directive
        .parse()
        .or_else(|_| DEFAULT_FILTER.parse())
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// Whether console output uses ANSI colors.
pub fn color_enabled() -> bool {
    COLOR.load(Ordering::Relaxed)
}

// Returns elapsed time since init.
fn elapsed_secs() -> f64 {
    EPOCH
        .get()
        .map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

/// A tracing layer that formats SpecForge events with colors.
pub struct SpecConsoleLayer;

impl<S: Subscriber> Layer<S> for SpecConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from SpecForge crates only
        if !metadata.target().starts_with("specforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level(), color_enabled());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    spec: Option<String>,
    message: Option<String>,
    nodes: Option<u64>,
    items: Option<u64>,
    matched: Option<u64>,
    purged: Option<u64>,
    capacity: Option<u64>,
    duration_ms: Option<u64>,
    result: Option<bool>,
    parallel: Option<bool>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        match field.name() {
            "event" => self.event = Some(s.trim_matches('"').to_string()),
            "spec" => self.spec = Some(s.trim_matches('"').to_string()),
            "message" => self.message = Some(s.trim_matches('"').to_string()),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "nodes" => self.nodes = Some(value),
            "items" => self.items = Some(value),
            "matched" => self.matched = Some(value),
            "purged" => self.purged = Some(value),
            "capacity" => self.capacity = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "result" => self.result = Some(value),
            "parallel" => self.parallel = Some(value),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "spec" => self.spec = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level, color: bool) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "materialize" => format_materialize(v, color),
        "query_end" => format_query_end(v, color),
        "memo_hit" | "memo_miss" => format_memo_lookup(v, event, level, color),
        "memo_purge" | "memo_full" => format_memo_pressure(v, event, color),
        _ => String::new(),
    }
}

fn format_elapsed(color: bool) -> String {
    let elapsed = format!("{:>7.3}s", elapsed_secs());
    if color {
        elapsed.bright_black().to_string()
    } else {
        elapsed
    }
}

fn format_count(n: u64, color: bool) -> String {
    let s = n.to_formatted_string(&Locale::en);
    if color {
        s.bright_yellow().to_string()
    } else {
        s
    }
}

fn format_materialize(v: &EventVisitor, color: bool) -> String {
    let spec = v.spec.as_deref().unwrap_or("?");
    let nodes = v.nodes.unwrap_or(0);
    let icon = if color {
        "⚙".bright_cyan().bold().to_string()
    } else {
        "⚙".to_string()
    };

    format!(
        "{} {} Compiled │ {} nodes │ {}",
        format_elapsed(color),
        icon,
        format_count(nodes, color),
        spec
    )
}

fn format_query_end(v: &EventVisitor, color: bool) -> String {
    let items = v.items.unwrap_or(0);
    let matched = v.matched.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let mode = if v.parallel.unwrap_or(false) {
        "parallel"
    } else {
        "sequential"
    };
    let icon = if color {
        "■".bright_green().bold().to_string()
    } else {
        "■".to_string()
    };

    let mut output = format!(
        "{} {} Query ({}) │ {} of {} matched │ {}",
        format_elapsed(color),
        icon,
        mode,
        format_count(matched, color),
        format_count(items, color),
        format_duration_ms(duration)
    );
    if let Some(spec) = &v.spec {
        output.push_str(&format!(" │ {}", spec));
    }
    output
}

fn format_memo_lookup(v: &EventVisitor, event: &str, level: Level, color: bool) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let label = if event == "memo_hit" { "hit" } else { "miss" };
    let mark = match v.result {
        Some(true) => "✓",
        Some(false) => "✗",
        None => "·",
    };
    let mark = match (color, v.result) {
        (true, Some(true)) => mark.bright_green().to_string(),
        (true, Some(false)) => mark.bright_red().to_string(),
        _ => mark.to_string(),
    };

    format!("{} {} Memo {}", format_elapsed(color), mark, label)
}

fn format_memo_pressure(v: &EventVisitor, event: &str, color: bool) -> String {
    let detail = if event == "memo_purge" {
        format!("purged {} dead entries", format_count(v.purged.unwrap_or(0), color))
    } else {
        format!(
            "full at {} entries, result not cached",
            format_count(v.capacity.unwrap_or(0), color)
        )
    };
    let icon = if color {
        "!".yellow().bold().to_string()
    } else {
        "!".to_string()
    };

    format!("{} {} Memo {}", format_elapsed(color), icon, detail)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}
