// Code Card display format:
// https://github.com/cameronsenese/codecard/tree/master/functions#create-a-fn-function-for-your-code-card
// {
//   "template": "template[1-11]",
//   "title": "Hello World",
//   "subtitle": "This is a subtitle",
//   "bodytext": "This is the body",
//   "icon": "[see list of named icons| BMP url]",
//   "backgroundColor": "[white|black]"
// }
// Parsed on the device by:
// https://github.com/cameronsenese/codecard/blob/master/arduino/codecard/dataParser.h
extern crate serde;
extern crate time;

use crate::path;

const TEMPLATE: &'static str = "template1";
const SUBTITLE: &'static str = "from 14th Street";
const BACKGROUND_COLOR: &'static str = "white";

const ON_TIME: &'static str = "ON_TIME";

const ICON_CLEAR: &'static str = "01d";
const ICON_STORM: &'static str = "11d";

const NANOS_PER_MINUTE: i128 = 60 * 1_000_000_000;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeCard {
    pub template: String,
    pub title: String,
    pub subtitle: String,
    pub bodytext: String,
    pub icon: String,
    #[serde(rename = "backgroundColor")]
    pub background_color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ToNj,
    ToNy,
}

impl Direction {
    /// Picks the direction from the last segment of a request path, e.g.
    /// "/TO_NJ" or "/codecard/TO_NY". Any query string is ignored.
    pub fn from_path(url: &str) -> Option<Direction> {
        let path = url.split('?').next().unwrap_or("");

        if path.ends_with("/TO_NJ") {
            return Some(Direction::ToNj);
        } else if path.ends_with("/TO_NY") {
            return Some(Direction::ToNy);
        }
        return None;
    }

    /// The upstream feed's direction code.
    pub fn code(&self) -> &'static str {
        match *self {
            Direction::ToNj => "TO_NJ",
            Direction::ToNy => "TO_NY",
        }
    }

    pub fn header(&self) -> &'static str {
        match *self {
            Direction::ToNj => "PATH to NJ",
            Direction::ToNy => "PATH to 33rd",
        }
    }
}

/// Whole minutes from `now` until `arrival`, rounded to the nearest minute
/// with halves going away from zero. Negative for trains the feed still
/// lists after their projected arrival.
pub fn minutes_until(now: time::OffsetDateTime, arrival: time::OffsetDateTime) -> i64 {
    let nanos = (arrival - now).whole_nanoseconds();
    let half = NANOS_PER_MINUTE / 2;

    let rounded = if nanos >= 0 {
        (nanos + half) / NANOS_PER_MINUTE
    } else {
        (nanos - half) / NANOS_PER_MINUTE
    };

    return rounded as i64;
}

pub fn make_card(trains: &[path::UpcomingTrain],
                 direction: Option<Direction>,
                 now: time::OffsetDateTime) -> CodeCard {
    let mut bodytext = String::new();
    let mut delayed = false;

    if let Some(direction) = direction {
        for train in trains.iter().filter(|t| t.direction == direction.code()) {
            let minutes = minutes_until(now, train.projected_arrival);
            bodytext.push_str(&format!("{}\n  in {} minutes ({})\n",
                                       train.headsign, minutes, train.status));
            if train.status != ON_TIME {
                delayed = true;
            }
        }
    }

    return CodeCard{
        template: TEMPLATE.to_string(),
        title: direction.map(|d| d.header()).unwrap_or("").to_string(),
        subtitle: SUBTITLE.to_string(),
        bodytext: bodytext,
        icon: (if delayed { ICON_STORM } else { ICON_CLEAR }).to_string(),
        background_color: BACKGROUND_COLOR.to_string(),
    };
}
