//! Log formatting that stamps simulated time instead of wall-clock time.

use std::cell::Cell;
use std::fmt;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::core::state::Ticks;

thread_local! {
    static SIM_TICK: Cell<Option<Ticks>> = const { Cell::new(None) };
}

/// Record the tick the current thread's simulation is processing.
pub fn set_sim_tick(tick: Ticks) {
    SIM_TICK.with(|cell| cell.set(Some(tick)));
}

pub fn sim_tick() -> Option<Ticks> {
    SIM_TICK.with(Cell::get)
}

/// Event formatter printing `[t=  tick] LEVEL message key=value ...`.
pub struct SimFormat;

impl<S, N> FormatEvent<S, N> for SimFormat
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
        match sim_tick() {
            Some(tick) => write!(writer, "[t={tick:>6}] ")?,
            None => write!(writer, "[t={:>6}] ", "-")?,
        }

        let level = *event.metadata().level();
        if writer.has_ansi_escapes() {
            let color = match level {
                Level::ERROR => "\x1b[31m",
                Level::WARN => "\x1b[33m",
                Level::INFO => "\x1b[32m",
                Level::DEBUG => "\x1b[34m",
                Level::TRACE => "\x1b[35m",
            };
            write!(writer, "{color}{level:>5}\x1b[0m ")?;
        } else {
            write!(writer, "{level:>5} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
