//! Voice of the Doctor: speech, vision and voice chained behind one call.
//!
//! A spoken question is transcribed, sent with an uploaded image to a
//! multimodal model answering as a doctor, and the reply is spoken back.
//! All heavy lifting happens in remote services; this crate sequences the
//! calls, manages temporary files and degrades gracefully on failure.
//!
//! Entry point: [`pipeline::SessionOrchestrator::process`].

pub mod config;
pub mod http;
pub mod media;
pub mod pipeline;
pub mod playback;
pub mod server;
pub mod stt;
pub mod tts;
pub mod vision;
