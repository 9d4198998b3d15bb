use tracing::{subscriber::set_global_default, Level, Subscriber};
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{filter::Targets, fmt::MakeWriter, layer::SubscriberExt, Registry};

const PKG_NAME: &str = env!("CARGO_PKG_NAME");
const CRATE_NAME: &str = env!("CARGO_CRATE_NAME");

pub struct TraceSettings<W>
where
    W: for<'a> MakeWriter<'a>,
{
    pub level: Level,
    pub writer: W,
}

pub fn get_subscriber<W>(settings: TraceSettings<W>) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = Targets::new()
        .with_target(CRATE_NAME, settings.level)
        .with_default(Level::WARN);
    let formatting_layer = BunyanFormattingLayer::new(PKG_NAME.to_string(), settings.writer);

    Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber<S>(subscriber: S)
where
    S: Subscriber + Send + Sync,
{
    LogTracer::init().expect("failed to set log tracer");
    set_global_default(subscriber).expect("failed to set subscriber");
}
