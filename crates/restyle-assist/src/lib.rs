//! # Restyle Assist - Streaming Style Suggestions
//!
//! Sends the user's prompt and the element's context to an assist relay,
//! streams the reply as server-sent events and applies a structured reply to a
//! [`StyleStore`](restyle_store::StyleStore) in one undoable step.
//!
//! The pipeline is split so each stage can be used and tested on its own:
//!
//! ```text
//! bytes ─▶ LineFramer ─▶ EventDecoder ─▶ collect_stream ─▶ parse_suggestion ─▶ apply_outcome
//! ```
//!
//! Cancellation uses [`AbortHandle`]/[`AbortRegistration`]. A request aborted
//! at any point, or one that fails, never reaches [`apply_outcome`], so the
//! store sees either the whole suggestion or nothing.
//!
//! ```rust,no_run
//! use restyle_assist::{apply_outcome, AbortHandle, AssistClient, AssistRequest};
//! use restyle_store::{MemoryStorage, StoreOptions, StyleStore};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut store = StyleStore::open(MemoryStorage::new(), StoreOptions::default());
//! let client = AssistClient::new("http://localhost:8787/api/ai-assist");
//!
//! let request = AssistRequest::for_state("make this a pill button", &store.get());
//! let (_handle, registration) = AbortHandle::new_pair();
//! let outcome = client.suggest(&request, registration, |delta| print!("{}", delta)).await?;
//! apply_outcome(&mut store, outcome)?;
//! # Ok(())
//! # }
//! ```

mod apply;
mod client;
mod error;
mod event;
mod framer;
mod request;
mod response;

pub use apply::{apply_outcome, Applied};
pub use client::{collect_stream, decode_events, AssistClient, EventStream, DEFAULT_ENDPOINT};
pub use error::AssistError;
pub use event::{EventDecoder, StreamEvent};
pub use framer::LineFramer;
pub use futures::future::{AbortHandle, AbortRegistration};
pub use request::AssistRequest;
pub use response::{parse_suggestion, AssistOutcome, Suggestion};
