//! HTTP layer: transport abstraction, request shaping, and the response type.

mod api;
mod reqwest;
mod response;
mod transport;

pub use self::reqwest::ReqwestTransport;
pub use api::{encode_segment, ApiClient};
pub use response::KineticResponse;
pub use transport::{HttpMethod, HttpRequest, HttpTransport, RawResponse, TransportError};
