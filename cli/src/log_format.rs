//! Plain-text event formatter for the log file: each line carries the span path it was
//! emitted under, so lookups from one CLI invocation can be grepped together.

use std::fmt;

use tracing_core::{Event, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;

/// `TIMESTAMP LEVEL [root#id > child] target: fields`.
///
/// The bracketed scope is omitted for events outside any span. The id is the root span's
/// id, which is the same for every event of one command.
#[derive(Default)]
pub struct ScopedText {
    timer: SystemTime,
}

impl ScopedText {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S, N> FormatEvent<S, N> for ScopedText
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        self.timer.format_time(&mut writer)?;
        write!(writer, " {:>5}", event.metadata().level())?;

        if let Some(scope) = ctx.event_scope() {
            write!(writer, " [")?;
            for (i, span) in scope.from_root().enumerate() {
                if i == 0 {
                    write!(writer, "{}#{}", span.name(), span.id().into_u64())?;
                } else {
                    write!(writer, " > {}", span.name())?;
                }
            }
            write!(writer, "]")?;
        }

        write!(writer, " {}: ", event.metadata().target())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
