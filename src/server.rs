extern crate serde_json;
extern crate time;
extern crate tiny_http;

use crate::codecard;
use crate::path;
use crate::result;

#[derive(Debug, PartialEq)]
pub struct CardResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

pub fn run(port: u16, workers: usize, feed: path::FeedClient) -> result::PathCardResult<()> {
    let addr = format!("0.0.0.0:{}", port);
    let server = tiny_http::Server::http(&addr)
        .map_err(|err| result::make_error(&format!("Couldn't listen on {}: {}", addr, err)))?;

    info!("Serving Code Card JSON on {} with {} workers, feed {}", addr, workers, feed.url());

    let server = std::sync::Arc::new(server);
    let feed = std::sync::Arc::new(feed);

    let mut handles = vec![];
    for i in 0..workers {
        let server = server.clone();
        let feed = feed.clone();
        handles.push(std::thread::Builder::new()
                     .name(format!("worker-{}", i))
                     .spawn(move || worker_loop(&server, &feed))?);
    }

    for handle in handles {
        if handle.join().is_err() {
            error!("Worker thread panicked");
        }
    }

    return Ok(());
}

fn worker_loop(server: &tiny_http::Server, feed: &path::FeedClient) {
    loop {
        match server.recv() {
            Ok(request) => handle_request(request, feed),
            Err(err) => {
                error!("Stopping worker, couldn't receive request: {}", err);
                return;
            }
        }
    }
}

fn handle_request(request: tiny_http::Request, feed: &path::FeedClient) {
    info!("Received a request: {} {}", request.method(), request.url());
    debug!("{}", describe_request(&request));

    let response = build_response(
        request.url(), || feed.upcoming_trains(), time::OffsetDateTime::now_utc());

    // from_data, not from_string: the latter already carries a text/plain Content-Type.
    let mut http_response = tiny_http::Response::from_data(response.body.into_bytes())
        .with_status_code(response.status);
    match content_type_header(response.content_type) {
        Ok(header) => http_response.add_header(header),
        Err(err) => warn!("{}", err),
    }

    if let Err(err) = request.respond(http_response) {
        warn!("Couldn't write response: {}", err);
    }
}

fn content_type_header(content_type: &str) -> result::PathCardResult<tiny_http::Header> {
    return tiny_http::Header::from_bytes(&b"Content-Type"[..], content_type.as_bytes())
        .map_err(|_| result::make_error(&format!("Bad Content-Type header: {}", content_type)));
}

fn describe_request(request: &tiny_http::Request) -> String {
    let version = request.http_version();
    let headers: Vec<(String, String)> = request.headers().iter()
        .map(|h| (h.field.to_string(), h.value.to_string()))
        .collect();

    return format_request(&request.method().to_string(),
                          request.url(),
                          &format!("HTTP/{}.{}", version.0, version.1),
                          &headers);
}

fn format_request(method: &str, url: &str, protocol: &str, headers: &[(String, String)]) -> String {
    let mut lines = vec![format!("{} {} {}", method, url, protocol)];
    for (name, value) in headers {
        lines.push(format!("{}: {}", name.to_lowercase(), value));
    }
    return lines.join("\n");
}

/// Turns one inbound request into the card, or a plain-text 500 if the
/// feed couldn't be fetched or decoded.
pub fn build_response<F>(url: &str, fetch_fn: F, now: time::OffsetDateTime) -> CardResponse
where F: FnOnce() -> result::PathCardResult<Vec<path::UpcomingTrain>> {
    match render_card(url, fetch_fn, now) {
        Ok(json) => {
            return CardResponse{
                status: 200,
                content_type: "application/json",
                body: json,
            };
        },
        Err(err) => {
            error!("Request for {} failed: {}", url, err);
            return CardResponse{
                status: 500,
                content_type: "text/plain; charset=utf-8",
                body: format!("{}", err),
            };
        },
    }
}

fn render_card<F>(url: &str, fetch_fn: F, now: time::OffsetDateTime) -> result::PathCardResult<String>
where F: FnOnce() -> result::PathCardResult<Vec<path::UpcomingTrain>> {
    let direction = codecard::Direction::from_path(url);
    let trains = fetch_fn()?;
    debug!("Upstream trains: {:?}", trains);

    let card = codecard::make_card(&trains, direction, now);
    return serde_json::to_string(&card)
        .map_err(result::PathCardError::SerializationError);
}
