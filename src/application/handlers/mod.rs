//! Command handlers.

mod initiate_checkout;
mod process_callback;

pub use initiate_checkout::{
    CheckoutError, InitiateCheckoutCommand, InitiateCheckoutHandler, InitiateCheckoutResult,
};
pub use process_callback::{CallbackReply, ProcessCallbackCommand, ProcessCallbackHandler};
