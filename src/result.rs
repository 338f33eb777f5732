extern crate reqwest;
extern crate serde_json;
extern crate std;

pub type PathCardResult<T> = std::result::Result<T, PathCardError>;

#[derive(Debug)]
pub enum PathCardError {
    ConfigError(String),
    DecodeError(serde_json::Error),
    FetchError(reqwest::Error),
    IoError(std::io::Error),
    OtherError(String),
    SerializationError(serde_json::Error),
}

pub fn make_error(msg: &str) -> PathCardError {
    return PathCardError::OtherError(msg.to_string());
}

pub fn config_error(msg: &str) -> PathCardError {
    return PathCardError::ConfigError(msg.to_string());
}

impl std::fmt::Display for PathCardError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            PathCardError::ConfigError(ref msg) => {
                return write!(f, "Config Error: {}", msg);
            },
            PathCardError::DecodeError(ref err) => {
                return write!(f, "Upstream Decode Error: {}", err);
            },
            PathCardError::FetchError(ref err) => {
                return write!(f, "Upstream Fetch Error: {}", err);
            },
            PathCardError::IoError(ref err) => {
                return write!(f, "IO Error: {}", err);
            },
            PathCardError::OtherError(ref msg) => {
                return write!(f, "Error: {}", msg);
            },
            PathCardError::SerializationError(ref err) => {
                return write!(f, "Serialization Error: {}", err);
            },
        }
    }
}

impl std::error::Error for PathCardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            PathCardError::DecodeError(ref err) => Some(err),
            PathCardError::FetchError(ref err) => Some(err),
            PathCardError::IoError(ref err) => Some(err),
            PathCardError::SerializationError(ref err) => Some(err),
            PathCardError::ConfigError(_) | PathCardError::OtherError(_) => None,
        }
    }
}

// No From for serde_json::Error: decoding and encoding map to different variants.

impl From<reqwest::Error> for PathCardError {
    fn from(err: reqwest::Error) -> PathCardError {
        return PathCardError::FetchError(err);
    }
}

impl From<std::io::Error> for PathCardError {
    fn from(err: std::io::Error) -> PathCardError {
        return PathCardError::IoError(err);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn display_includes_kind() {
        let err = super::config_error("bad port 'abc'");
        assert_eq!("Config Error: bad port 'abc'", format!("{}", err));

        let err = super::make_error("boom");
        assert_eq!("Error: boom", format!("{}", err));
    }

    #[test]
    fn decode_error_has_source() {
        use std::error::Error;

        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = super::PathCardError::DecodeError(json_err);
        assert!(format!("{}", err).starts_with("Upstream Decode Error: "));
        assert!(err.source().is_some());
    }
}
