// Realtime arrivals for PATH's 14th Street station, from
// https://www.reddit.com/r/jerseycity/comments/bb4041/programmatic_realtime_path_data/
//
// Sample record:
// {"lineName":"33rd Street via Hoboken","lineColors":["#4D92FB","#FF9900"],
//  "projectedArrival":"2019-09-22T02:51:11Z","lastUpdated":"2019-09-22T02:46:51Z",
//  "status":"ON_TIME","headsign":"33rd Street via Hoboken",
//  "route":"JSQ_33_HOB","routeDisplayName":"Journal Square - 33rd Street (via Hoboken)",
//  "direction":"TO_NY"}
extern crate reqwest;
extern crate serde;
extern crate serde_json;
extern crate time;

use crate::result;

pub const DEFAULT_FEED_URL: &'static str =
    "https://path.api.razza.dev/v1/stations/fourteenth_street/realtime";

const USER_AGENT: &'static str = "pathcard (PATH arrivals for Code Card)";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingTrain {
    pub line_name: String,
    #[serde(default)]
    pub line_colors: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub projected_arrival: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: time::OffsetDateTime,
    pub status: String,
    pub route: String,
    pub route_display_name: String,
    pub headsign: String,
    pub direction: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PathResponse {
    #[serde(default)]
    upcoming_trains: Vec<UpcomingTrain>,
}

pub struct FeedClient {
    client: reqwest::blocking::Client,
    url: String,
}

impl FeedClient {
    pub fn new(url: &str, timeout: std::time::Duration) -> result::PathCardResult<FeedClient> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        return Ok(FeedClient{
            client: client,
            url: url.to_string(),
        });
    }

    pub fn url(&self) -> &str {
        return &self.url;
    }

    pub fn upcoming_trains(&self) -> result::PathCardResult<Vec<UpcomingTrain>> {
        let body = self.fetch_body()?;
        return parse_response(&body);
    }

    fn fetch_body(&self) -> result::PathCardResult<String> {
        debug!("Fetching {}", self.url);
        let response = self.client.get(&self.url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()?
            .error_for_status()?;
        return Ok(response.text()?);
    }
}

pub fn parse_response(response_body: &str) -> result::PathCardResult<Vec<UpcomingTrain>> {
    let response: PathResponse = serde_json::from_str(response_body)
        .map_err(result::PathCardError::DecodeError)?;

    return Ok(response.upcoming_trains);
}
