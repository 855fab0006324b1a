#![allow(ambiguous_glob_reexports)]

pub mod accept_protocol_authority;
pub mod claim_packet;
pub mod close_packet;
pub mod create_packet;
pub mod initialize_protocol;
pub mod query_packet;
pub mod refund_packet;
pub mod transfer_protocol_authority;
pub mod update_protocol_config;

pub use accept_protocol_authority::*;
pub use claim_packet::*;
pub use close_packet::*;
pub use create_packet::*;
pub use initialize_protocol::*;
pub use query_packet::*;
pub use refund_packet::*;
pub use transfer_protocol_authority::*;
pub use update_protocol_config::*;
