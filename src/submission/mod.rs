//! Boundary between a finished wizard and the booking endpoint.

mod adapter;
mod payload;
mod transport;

pub use adapter::{SubmissionAdapter, SubmissionReceipt, DEFAULT_SUBMIT_PATH};
pub use payload::TripRequestPayload;
pub use transport::{
    BookingTransport, HttpTransport, OutboundRequest, TransportError, TransportResponse,
    REQUEST_ID_HEADER,
};
