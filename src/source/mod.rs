pub mod provider;
pub mod response;
pub mod transport;

pub use provider::{RequestDescriptor, SourceProvider, SourceResponse};
pub use response::parse_body;
pub use transport::{ExecTransport, FetchError, StaticTransport, Transport};
