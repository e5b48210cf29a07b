pub mod earthquake_store;

use thiserror::Error;

use crate::decoder::DecodeError;
use crate::domain::ErrorKind;
use crate::fetcher::FetchError;

pub use earthquake_store::{EarthquakeStore, FetchOutcome, SortKey, StoreSnapshot, ViewState};

/// Anything that can go wrong between requesting the feed and holding
/// mapped earthquakes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
}

/// Maps a pipeline failure onto the closed [`ErrorKind`] set.
///
/// Anything without a dedicated category lands in [`ErrorKind::Unknown`]
/// with its detail kept.
pub fn classify(error: &FeedError) -> ErrorKind {
    match error {
        FeedError::Fetch(FetchError::Connect(_)) => ErrorKind::NoConnectivity,
        FeedError::Fetch(FetchError::Timeout) => ErrorKind::Timeout,
        FeedError::Fetch(FetchError::HostLookup(_)) => ErrorKind::HostUnreachable,
        FeedError::Fetch(FetchError::Status(status)) => {
            ErrorKind::BadServerResponse { status: *status }
        }
        FeedError::Fetch(FetchError::Transport(detail)) => ErrorKind::Unknown {
            detail: detail.clone(),
        },
        FeedError::Decode(err) => ErrorKind::DecodingFailed {
            kind: err.kind,
            detail: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder;
    use crate::domain::DecodeErrorKind;

    #[test]
    fn test_classify_transport_errors() {
        assert_eq!(
            classify(&FetchError::Connect("refused".into()).into()),
            ErrorKind::NoConnectivity
        );
        assert_eq!(classify(&FetchError::Timeout.into()), ErrorKind::Timeout);
        assert_eq!(
            classify(&FetchError::HostLookup("dns error".into()).into()),
            ErrorKind::HostUnreachable
        );
        assert_eq!(
            classify(&FetchError::Status(503).into()),
            ErrorKind::BadServerResponse { status: 503 }
        );
    }

    #[test]
    fn test_classify_unrecognized_transport_error_keeps_detail() {
        assert_eq!(
            classify(&FetchError::Transport("connection reset mid-body".into()).into()),
            ErrorKind::Unknown {
                detail: "connection reset mid-body".into()
            }
        );
    }

    #[test]
    fn test_classify_decode_error_keeps_kind_and_context() {
        let err = decoder::decode(br#"{"features":[{"properties":{},"geometry":{"coordinates":[]}}]}"#).unwrap_err();
        let kind = classify(&err.into());

        match kind {
            ErrorKind::DecodingFailed { kind, detail } => {
                assert_eq!(kind, DecodeErrorKind::MissingKey);
                assert!(detail.contains("features[0].properties.mag"));
            }
            other => panic!("unexpected classification: {:?}", other),
        }
    }
}
