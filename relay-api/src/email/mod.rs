//! Email composition and dispatch.
//!
//! - `template`: HTML escaping and the text/HTML notification bodies
//! - `resend`: dispatch through the Resend API

pub mod resend;
pub mod template;

pub use resend::{DispatchResult, MailSender, OutboundEmail, ResendClient};
pub use template::{contact_email_html, contact_email_text, escape_html};
