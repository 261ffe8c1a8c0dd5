//! Gateway protocol
//!
//! Op codes, payloads, the message envelope, and close codes.

mod close_codes;
mod messages;
mod opcodes;
mod payloads;

pub use close_codes::CloseCode;
pub use messages::GatewayMessage;
pub use opcodes::OpCode;
pub use payloads::{
    ChatEventPayload, ChatMessagePayload, JoinRoomPayload, LeaveRoomPayload, ResumePayload,
    UsernamePayload,
};
