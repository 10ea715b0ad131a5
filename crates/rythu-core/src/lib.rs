//! Domain core of the Rythu Mitra farmer assistant.
//!
//! Conversation state, history windowing, the AI dispatcher and its backend
//! seam, localization, voice capture, the home screen cards and the static
//! market catalogs. Network adapters and session wiring live in
//! `rythu-interaction`.

pub mod agent;
pub mod config;
pub mod error;
pub mod home;
pub mod i18n;
pub mod language;
pub mod market;
pub mod session;
pub mod voice;

pub use error::{DispatchError, DispatchErrorKind, Result, RythuError, VoiceError};
pub use language::Language;
