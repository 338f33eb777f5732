extern crate getopts;

use crate::path;
use crate::result;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_FEED_TIMEOUT_SECS: u64 = 10;
const DEFAULT_WORKERS: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub feed_url: String,
    pub feed_timeout: std::time::Duration,
    pub workers: usize,
    pub log_dir: Option<String>,
}

pub enum Invocation {
    Run(Config),
    Help(String),
}

fn options() -> getopts::Options {
    let mut opts = getopts::Options::new();
    opts.optopt("p", "port", "Port to listen on. Overrides $PORT.", "PORT");
    opts.optopt("u", "feed-url", "Upstream PATH realtime feed.", "URL");
    opts.optopt("t", "feed-timeout", "Upstream fetch timeout.", "SECONDS");
    opts.optopt("w", "workers", "Number of request handling threads.", "N");
    opts.optopt("l", "log-dir", "Also write logs to files in this directory.", "DIR");
    opts.optflag("h", "help", "Print this help.");
    return opts;
}

pub fn from_env_and_args(args: &[String]) -> result::PathCardResult<Invocation> {
    return parse(args, |key| std::env::var(key).ok());
}

fn parse_number<T: std::str::FromStr>(what: &str, value: &str) -> result::PathCardResult<T> {
    return value.trim().parse::<T>().map_err(|_| result::config_error(
        &format!("Invalid {}: '{}'", what, value)));
}

fn parse<F: Fn(&str) -> Option<String>>(args: &[String], env: F) -> result::PathCardResult<Invocation> {
    let opts = options();
    let program = args.get(0).map(String::as_str).unwrap_or("pathcard");

    let matches = opts.parse(args.iter().skip(1))
        .map_err(|err| result::config_error(&format!("{}", err)))?;

    if matches.opt_present("help") {
        let brief = format!("Usage: {} [options]", program);
        return Ok(Invocation::Help(opts.usage(&brief)));
    }

    let port = match matches.opt_str("port").or_else(|| env("PORT")) {
        Some(ref p) if !p.is_empty() => parse_number::<u16>("port", p)?,
        _ => DEFAULT_PORT,
    };

    let feed_timeout_secs = match matches.opt_str("feed-timeout") {
        Some(t) => parse_number::<u64>("feed timeout", &t)?,
        None => DEFAULT_FEED_TIMEOUT_SECS,
    };
    if feed_timeout_secs == 0 {
        return Err(result::config_error("Feed timeout must be at least 1 second"));
    }

    let workers = match matches.opt_str("workers") {
        Some(w) => parse_number::<usize>("worker count", &w)?,
        None => DEFAULT_WORKERS,
    };
    if workers == 0 {
        return Err(result::config_error("Need at least one worker"));
    }

    return Ok(Invocation::Run(Config{
        port: port,
        feed_url: matches.opt_str("feed-url").unwrap_or(path::DEFAULT_FEED_URL.to_string()),
        feed_timeout: std::time::Duration::from_secs(feed_timeout_secs),
        workers: workers,
        log_dir: matches.opt_str("log-dir"),
    }));
}

#[cfg(test)]
mod tests {
    use super::Invocation;

    fn args(rest: &[&str]) -> Vec<String> {
        let mut v = vec!["pathcard".to_string()];
        v.extend(rest.iter().map(|s| s.to_string()));
        return v;
    }

    fn run_config(rest: &[&str], port_env: Option<&str>) -> super::Config {
        let env = |key: &str| if key == "PORT" { port_env.map(|p| p.to_string()) } else { None };
        match super::parse(&args(rest), env).expect("parse") {
            Invocation::Run(config) => return config,
            Invocation::Help(_) => panic!("unexpected help"),
        }
    }

    #[test]
    fn defaults() {
        let config = run_config(&[], None);

        assert_eq!(8080, config.port);
        assert_eq!("https://path.api.razza.dev/v1/stations/fourteenth_street/realtime", config.feed_url);
        assert_eq!(std::time::Duration::from_secs(10), config.feed_timeout);
        assert_eq!(4, config.workers);
        assert_eq!(None, config.log_dir);
    }

    #[test]
    fn port_from_env() {
        assert_eq!(9090, run_config(&[], Some("9090")).port);
        assert_eq!(8080, run_config(&[], Some("")).port);
    }

    #[test]
    fn flag_overrides_env() {
        assert_eq!(7070, run_config(&["--port", "7070"], Some("9090")).port);
        assert_eq!(7070, run_config(&["-p", "7070"], None).port);
    }

    #[test]
    fn all_flags() {
        let config = run_config(&["-u", "http://localhost:1234/feed", "-t", "3", "-w", "8", "-l", "/tmp/logs"], None);

        assert_eq!("http://localhost:1234/feed", config.feed_url);
        assert_eq!(std::time::Duration::from_secs(3), config.feed_timeout);
        assert_eq!(8, config.workers);
        assert_eq!(Some("/tmp/logs".to_string()), config.log_dir);
    }

    #[test]
    fn bad_values() {
        let no_env = |_: &str| -> Option<String> { None };

        assert!(super::parse(&args(&[]), |_: &str| Some("eighty".to_string())).is_err());
        assert!(super::parse(&args(&["--port", "70000"]), no_env).is_err());
        assert!(super::parse(&args(&["--workers", "0"]), no_env).is_err());
        assert!(super::parse(&args(&["--feed-timeout", "0"]), no_env).is_err());
        assert!(super::parse(&args(&["--feed-timeout", "-1"]), no_env).is_err());
        assert!(super::parse(&args(&["--bogus"]), no_env).is_err());
    }

    #[test]
    fn help() {
        match super::parse(&args(&["--help"]), |_: &str| -> Option<String> { None }).expect("parse") {
            Invocation::Help(usage) => {
                assert!(usage.starts_with("Usage: pathcard [options]"));
                assert!(usage.contains("--feed-url"));
            },
            Invocation::Run(_) => panic!("expected help"),
        }
    }
}
