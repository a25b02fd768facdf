mod global_headers;
mod header_map;
mod request_header;

pub use global_headers::{
    clear_global_default_headers, global_default_headers, remove_global_default_header,
    set_global_default_header,
};
pub use header_map::{HeaderMap, add_rpc_option_headers, merge_headers, merge_into};
pub use request_header::RequestHeader;
