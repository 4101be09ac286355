use std::fmt::{self, Write as _};

use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

type Sink = Box<dyn Fn(&Level, &str) + Send + Sync>;

/// Writes one line per event to the browser console (stderr off the web).
pub struct ConsoleLayer {
    sink: Sink,
}

impl ConsoleLayer {
    pub fn new() -> Self {
        Self::with_sink(write_console)
    }

    pub fn with_sink(sink: impl Fn(&Level, &str) + Send + Sync + 'static) -> Self {
        Self { sink: Box::new(sink) }
    }
}

impl Default for ConsoleLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        let mut line = EventLine::default();
        event.record(&mut line);
        let text = format!("{} {}: {}{}", meta.level(), meta.target(), line.message, line.fields);
        (self.sink)(meta.level(), &text);
    }
}

#[derive(Default)]
struct EventLine {
    message: String,
    fields: String,
}

impl Visit for EventLine {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

fn write_console(level: &Level, line: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        let value = wasm_bindgen::JsValue::from_str(line);
        match *level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            _ => web_sys::console::log_1(&value),
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = level;
        eprintln!("{}", line);
    }
}

/// Install the console subscriber. A second call keeps the first subscriber.
pub fn init(level: LevelFilter) {
    let installed = tracing_subscriber::registry()
        .with(level)
        .with(ConsoleLayer::new())
        .try_init();
    if installed.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
