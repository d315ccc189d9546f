//! HTTP transport for assist requests.
//!
//! The relay answers a JSON POST with a server-sent event stream. Bytes are
//! framed into lines by [`LineFramer`], decoded by [`EventDecoder`] and the
//! deltas concatenated. Every entry point that awaits the network takes an
//! [`AbortRegistration`]; aborting its handle resolves the call with
//! [`AssistError::Cancelled`] and discards whatever text had arrived.

use std::collections::VecDeque;
use std::future::Future;

use bytes::Bytes;
use futures::future::{AbortRegistration, Abortable, Aborted};
use futures::stream::{self, BoxStream, Stream, StreamExt};
use reqwest::header::ACCEPT;

use crate::error::AssistError;
use crate::event::{EventDecoder, StreamEvent};
use crate::framer::LineFramer;
use crate::request::AssistRequest;
use crate::response::{parse_suggestion, AssistOutcome};

/// Relay endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8787/api/ai-assist";

/// A boxed stream of decoded events.
pub type EventStream = BoxStream<'static, Result<StreamEvent, AssistError>>;

/// Client for the assist relay.
#[derive(Debug, Clone)]
pub struct AssistClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl Default for AssistClient {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl AssistClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Sends `key` as a bearer token with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Posts `request` and returns the decoded event stream.
    ///
    /// Fails before any event is produced when the relay is unreachable or
    /// answers with a non-success status.
    pub async fn events(&self, request: &AssistRequest) -> Result<EventStream, AssistError> {
        tracing::debug!(
            endpoint = %self.endpoint,
            tag = %request.element_tag,
            prompt_len = request.prompt.len(),
            "sending assist request"
        );

        let mut builder = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "text/event-stream")
            .json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "assist relay rejected request");
            return Err(AssistError::from_status(status.as_u16(), body));
        }

        let chunks = response
            .bytes_stream()
            .map(|chunk: reqwest::Result<Bytes>| chunk.map_err(AssistError::from));
        Ok(decode_events(Box::pin(chunks)).boxed())
    }

    /// Streams the response for `request`, calling `on_delta` per fragment,
    /// and returns the full text.
    pub async fn stream(
        &self,
        request: &AssistRequest,
        registration: AbortRegistration,
        on_delta: impl FnMut(&str),
    ) -> Result<String, AssistError> {
        let work = async {
            let events = self.events(request).await?;
            concat(events, on_delta).await
        };
        abortable(work, registration).await
    }

    /// [`stream`](Self::stream) followed by [`parse_suggestion`].
    pub async fn suggest(
        &self,
        request: &AssistRequest,
        registration: AbortRegistration,
        on_delta: impl FnMut(&str),
    ) -> Result<AssistOutcome, AssistError> {
        let text = self.stream(request, registration, on_delta).await?;
        Ok(parse_suggestion(&text))
    }
}

/// Decodes a stream of byte chunks into events.
///
/// A chunk error is passed through and ends the stream. An unterminated last
/// line is decoded when the chunks run out.
pub fn decode_events<S, B, E>(chunks: S) -> impl Stream<Item = Result<StreamEvent, E>>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
{
    struct State<S> {
        chunks: S,
        framer: LineFramer,
        decoder: EventDecoder,
        ready: VecDeque<StreamEvent>,
        finished: bool,
    }

    let state = State {
        chunks,
        framer: LineFramer::new(),
        decoder: EventDecoder::new(),
        ready: VecDeque::new(),
        finished: false,
    };

    stream::unfold(state, |mut st| async move {
        loop {
            if let Some(event) = st.ready.pop_front() {
                return Some((Ok(event), st));
            }
            if st.finished {
                return None;
            }
            match st.chunks.next().await {
                Some(Ok(chunk)) => {
                    for line in st.framer.feed(chunk.as_ref()) {
                        if let Some(event) = st.decoder.decode(&line) {
                            st.ready.push_back(event);
                        }
                    }
                }
                Some(Err(e)) => {
                    st.finished = true;
                    return Some((Err(e), st));
                }
                None => {
                    st.finished = true;
                    if let Some(line) = st.framer.finish() {
                        st.ready.extend(st.decoder.decode(&line));
                    }
                }
            }
        }
    })
}

/// Concatenates the deltas of `events` until `Done` or the end of the stream.
///
/// Aborting `registration` resolves to [`AssistError::Cancelled`] and drops the
/// partial text.
pub async fn collect_stream<S>(
    events: S,
    registration: AbortRegistration,
    on_delta: impl FnMut(&str),
) -> Result<String, AssistError>
where
    S: Stream<Item = Result<StreamEvent, AssistError>>,
{
    abortable(concat(events, on_delta), registration).await
}

async fn concat<S>(events: S, mut on_delta: impl FnMut(&str)) -> Result<String, AssistError>
where
    S: Stream<Item = Result<StreamEvent, AssistError>>,
{
    futures::pin_mut!(events);
    let mut text = String::new();
    while let Some(event) = events.next().await {
        match event? {
            StreamEvent::Delta(delta) => {
                on_delta(&delta);
                text.push_str(&delta);
            }
            StreamEvent::Done => break,
        }
    }
    Ok(text)
}

async fn abortable<F>(work: F, registration: AbortRegistration) -> Result<String, AssistError>
where
    F: Future<Output = Result<String, AssistError>>,
{
    match Abortable::new(work, registration).await {
        Ok(result) => result,
        Err(Aborted) => {
            tracing::debug!("assist request cancelled");
            Err(AssistError::Cancelled)
        }
    }
}
