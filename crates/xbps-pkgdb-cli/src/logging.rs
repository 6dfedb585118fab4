use nu_ansi_term::Color::{Blue, Magenta, Red, Yellow};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{
        self,
        format::{FmtSpan, Writer},
        FmtContext, FormatEvent, FormatFields, MakeWriter,
    },
    registry::LookupSpan,
};

use crate::{cli::Args, utils::Colored};

/// Fields the formatter renders: the message, and the `pkgname` carried by
/// per-package events.
#[derive(Default)]
struct EventFields {
    message: Option<String>,
    pkgname: Option<String>,
}

impl tracing::field::Visit for EventFields {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        match field.name() {
            "pkgname" => self.pkgname = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "pkgname" => self.pkgname = Some(format!("{value:?}")),
            "message" => self.message = Some(format!("{value:?}")),
            _ => {}
        }
    }
}

fn level_tag(level: Level) -> Option<Colored<&'static str>> {
    match level {
        Level::TRACE => Some(Colored(Magenta, "[TRACE]")),
        Level::DEBUG => Some(Colored(Blue, "[DEBUG]")),
        Level::INFO => None,
        Level::WARN => Some(Colored(Yellow, "[WARN]")),
        Level::ERROR => Some(Colored(Red, "[ERROR]")),
    }
}

fn format_line(level: Level, fields: EventFields) -> String {
    let body = match (fields.message, fields.pkgname) {
        (Some(message), _) => message,
        (None, Some(pkgname)) => Colored(Blue, pkgname).to_string(),
        (None, None) => String::new(),
    };

    match level_tag(level) {
        Some(tag) => format!("{tag} {body}"),
        None => body,
    }
}

/// Prints INFO events bare and tags the other levels. Events without a
/// message but with a `pkgname` field print the highlighted package name.
pub struct LevelTagFormatter;

impl<S, N> FormatEvent<S, N> for LevelTagFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut fields = EventFields::default();
        event.record(&mut fields);

        writeln!(writer, "{}", format_line(*event.metadata().level(), fields))
    }
}

struct StdioWriterBuilder;

/// Buffers a single event and writes it in one piece when dropped.
/// INFO goes to stdout so listings can be piped, everything else to stderr.
struct StdioWriter {
    buffer: Vec<u8>,
    use_stderr: bool,
}

impl StdioWriter {
    fn new(use_stderr: bool) -> Self {
        Self {
            buffer: Vec::new(),
            use_stderr,
        }
    }
}

impl std::io::Write for StdioWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for StdioWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let output = String::from_utf8_lossy(&self.buffer);
        let output = output.trim_end_matches('\n');

        if self.use_stderr {
            eprintln!("{output}");
        } else {
            println!("{output}");
        }
    }
}

impl<'a> MakeWriter<'a> for StdioWriterBuilder {
    type Writer = StdioWriter;

    fn make_writer(&'a self) -> Self::Writer {
        StdioWriter::new(false)
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        StdioWriter::new(meta.level() != &Level::INFO)
    }
}

fn filter_level(args: &Args) -> Level {
    if args.quiet {
        Level::ERROR
    } else if args.verbose >= 2 {
        Level::TRACE
    } else if args.verbose == 1 {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

pub fn setup_logging(args: &Args) {
    let level = filter_level(args);

    let builder = fmt::Subscriber::builder()
        .with_env_filter(format!("xpkgdb={level},xbps_pkgdb={level}"))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(StdioWriterBuilder)
        .compact()
        .without_time();

    let subscriber: Box<dyn Subscriber + Send + Sync> = if args.json {
        Box::new(builder.json().flatten_event(true).finish())
    } else {
        Box::new(builder.event_format(LevelTagFormatter).finish())
    };

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}
