pub mod conversation_card;
pub mod message_bubble;
pub mod navigation;
pub mod toast;
