use std::time::Duration;

use clap::Parser;
use futures::future::BoxFuture;
use oxide_ticker::{
    App, CounterConfig, CounterModel, Document, MvuRuntime, Node, Renderer, Root, TokioTimer,
    DEFAULT_MOUNT_TARGET,
};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Render a counter that grows by a fixed amount on every tick.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Amount added to the count on every tick.
    #[arg(long, env = "TICKER_AMOUNT", default_value_t = 1)]
    amount: u64,

    /// Milliseconds between ticks.
    #[arg(long, env = "TICKER_INTERVAL_MS", default_value_t = 1000)]
    interval_ms: u64,

    /// Unmount after this many ticks instead of running until interrupted.
    #[arg(long)]
    ticks: Option<u64>,

    /// Id of the document container to mount into.
    #[arg(long, default_value = DEFAULT_MOUNT_TARGET)]
    mount_target: String,
}

impl From<Args> for CounterConfig {
    fn from(args: Args) -> Self {
        Self {
            amount: args.amount,
            tick_interval: Duration::from_millis(args.interval_ms),
            mount_target: args.mount_target,
        }
    }
}

/// Commits each page to the document root and echoes it to stdout.
struct Console {
    root: Root,
    rendered: flume::Sender<()>,
}

impl Renderer<Node> for Console {
    fn render(&mut self, node: Node) {
        println!("{node}");
        self.root.render(node);
        self.rendered.send(()).ok();
    }
}

/// Renders to wait for before unmounting; the first one is the mount, not a tick.
fn renders_before_unmount(ticks: u64) -> u64 {
    ticks.saturating_add(1)
}

fn init_log() {
    let mut filter = EnvFilter::default();

    if cfg!(debug_assertions) {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    if let Ok(env) = std::env::var("RUST_LOG") {
        if let Ok(env) = env.parse() {
            filter = filter.add_directive(env);
        }
    }

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), oxide_ticker::Error> {
    init_log();

    let args = Args::parse();
    let ticks = args.ticks;
    let config = CounterConfig::from(args);
    config.validate()?;

    let document = Document::with_containers([DEFAULT_MOUNT_TARGET]);
    let root = document.create_root(&config.mount_target)?;

    let (rendered, renders) = flume::unbounded();
    let renderer = Console { root, rendered };
    let spawner = |future: BoxFuture<'static, ()>| {
        tokio::spawn(future);
    };

    let mut runtime = MvuRuntime::new(
        CounterModel::default(),
        App::from_config(&config),
        renderer,
        spawner,
        TokioTimer,
    );

    if let Some(ticks) = ticks {
        let unmount = runtime.unmount_handle();
        tokio::spawn(async move {
            let mut remaining = renders_before_unmount(ticks);
            while remaining > 0 && renders.recv_async().await.is_ok() {
                remaining -= 1;
            }
            unmount.unmount();
        });
    }

    let unmount = runtime.unmount_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            unmount.unmount();
        }
    });

    tracing::info!(
        amount = config.amount,
        interval = ?config.tick_interval,
        target = %config.mount_target,
        "mounting"
    );
    runtime.run().await;

    let final_count = document
        .contents(&config.mount_target)
        .and_then(|page| page.find("h1").map(Node::text_content));
    tracing::info!(count = ?final_count, "unmounted");

    Ok(())
}
