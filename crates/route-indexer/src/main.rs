use {clap::Parser, observe::config::Config, route_indexer::arguments::Arguments};

#[tokio::main]
async fn main() {
    let args = Arguments::parse();
    observe::tracing::initialize(&Config::new(&args.log_filter, args.use_json_logs));
    tracing::info!("running route indexer with validated arguments:\n{}", args);
    if let Err(err) = route_indexer::run(args).await {
        tracing::error!(?err, "failed to index routes");
        std::process::exit(1);
    }
}
