mod init_tracing;
mod log_preview;
mod request_id;
mod tracing_config;

pub use init_tracing::init_tracing;
pub use log_preview::preview_for_log;
pub use request_id::{
    REQUEST_ID_HEADER, UuidRequestId, propagate_request_id_layer, request_id_of,
    set_request_id_layer,
};
pub use tracing_config::TracingConfig;
