extern crate anyhow;
extern crate flexi_logger;
extern crate getopts;
extern crate reqwest;
extern crate time;
extern crate tiny_http;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod codecard;
mod config;
mod path;
mod result;
mod server;

use anyhow::Context;

fn start_logging(log_dir: Option<&str>) -> anyhow::Result<flexi_logger::LoggerHandle> {
    let logger = flexi_logger::Logger::try_with_env_or_str("info")
        .context("while parsing RUST_LOG")?
        .format(flexi_logger::detailed_format);

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(flexi_logger::FileSpec::default().directory(dir))
            .duplicate_to_stderr(flexi_logger::Duplicate::Info),
        None => logger,
    };

    return logger.start().context("while starting logger");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = match config::from_env_and_args(&args).context("while reading configuration")? {
        config::Invocation::Help(usage) => {
            print!("{}", usage);
            return Ok(());
        },
        config::Invocation::Run(config) => config,
    };

    let _logger = start_logging(config.log_dir.as_ref().map(String::as_str))?;

    info!("PATH Code Card server started. {:?}", config);

    let feed = path::FeedClient::new(&config.feed_url, config.feed_timeout)
        .context("while building feed client")?;

    server::run(config.port, config.workers, feed)
        .with_context(|| format!("while serving on port {}", config.port))?;

    return Ok(());
}
