mod command;

fn main() -> anyhow::Result<()> {
    // stdout is the JSON response channel, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    command::run()
}
