//! Call and reply types for the remote cipher service.
//!
//! The application layer describes a call as a [`ServiceCall`]; the plugin
//! shell turns it into an [`HttpCall`] and hands that to Zellij's web request
//! API. Everything needed to route the reply back (call kind, request
//! generation, trace context) travels in the request context map, which Zellij
//! returns untouched with the response.

use crate::domain::error::{CipherdeckError, Result};
use crate::domain::{TransformRequest, TransformResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Path of the transformation endpoint.
pub const TRANSFORM_PATH: &str = "/api/encrypt";

/// Path of the key-regeneration endpoint.
pub const REGENERATE_KEYS_PATH: &str = "/api/generate-new-keys";

pub(crate) const CONTEXT_CALL: &str = "call";
pub(crate) const CONTEXT_GENERATION: &str = "generation";
const CONTEXT_TRACE_ID: &str = "trace_id";
const CONTEXT_PARENT_SPAN_ID: &str = "parent_span_id";

/// Distributed tracing context carried across the HTTP round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the call.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the active span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active, e.g. when
    /// tracing was never initialised.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Reads a context previously written by [`TraceContext::write_into`].
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: map.get(CONTEXT_TRACE_ID)?.clone(),
            parent_span_id: map.get(CONTEXT_PARENT_SPAN_ID)?.clone(),
        })
    }

    fn write_into(&self, map: &mut BTreeMap<String, String>) {
        map.insert(CONTEXT_TRACE_ID.to_string(), self.trace_id.clone());
        map.insert(CONTEXT_PARENT_SPAN_ID.to_string(), self.parent_span_id.clone());
    }

    /// Re-parents `span` on the span that issued the call.
    ///
    /// Overrides whatever local parent `span` was created under. Returns
    /// `false` and leaves `span` alone if the IDs are not valid hex.
    pub fn set_parent_of(&self, span: &tracing::Span) -> bool {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let (Ok(trace_id), Ok(span_id)) = (TraceId::from_hex(&self.trace_id), SpanId::from_hex(&self.parent_span_id))
        else {
            return false;
        };
        let remote = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        if !remote.is_valid() {
            return false;
        }

        span.set_parent(opentelemetry::Context::new().with_remote_span_context(remote));
        true
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! service_call_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl ServiceCall {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " call with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

service_call_builders! {
    transform(Transform { generation: u64, request: TransformRequest }),
    regenerate_keys(RegenerateKeys {}),
}

/// Which endpoint a call (and therefore its reply) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Transform,
    RegenerateKeys,
}

impl CallKind {
    pub(crate) const fn as_str(self) -> &'static str {
        match self {
            Self::Transform => "transform",
            Self::RegenerateKeys => "regenerate_keys",
        }
    }

    pub(crate) fn from_name(name: &str) -> Option<Self> {
        match name {
            "transform" => Some(Self::Transform),
            "regenerate_keys" => Some(Self::RegenerateKeys),
            _ => None,
        }
    }
}

/// A call the application wants made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    /// Run a cipher over the submitted text.
    Transform {
        /// Request generation, echoed back to discard superseded replies.
        generation: u64,
        request: TransformRequest,
        trace_context: Option<TraceContext>,
    },

    /// Ask the service to reshuffle its substitution map.
    RegenerateKeys { trace_context: Option<TraceContext> },
}

/// Everything Zellij's `web_request` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

impl ServiceCall {
    #[must_use]
    pub const fn kind(&self) -> CallKind {
        match self {
            Self::Transform { .. } => CallKind::Transform,
            Self::RegenerateKeys { .. } => CallKind::RegenerateKeys,
        }
    }

    /// Generation of a transform call.
    #[must_use]
    pub const fn generation(&self) -> Option<u64> {
        match self {
            Self::Transform { generation, .. } => Some(*generation),
            Self::RegenerateKeys { .. } => None,
        }
    }

    /// Builds the POST request against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherdeckError::Transport`] if the request body cannot be
    /// serialized.
    pub fn to_http(&self, base_url: &str) -> Result<HttpCall> {
        let base = base_url.trim_end_matches('/');
        let mut headers = BTreeMap::new();
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_CALL.to_string(), self.kind().as_str().to_string());

        let (path, body, trace_context) = match self {
            Self::Transform { generation, request, trace_context } => {
                let body = serde_json::to_vec(request)
                    .map_err(|e| CipherdeckError::Transport(format!("failed to encode request: {e}")))?;
                headers.insert("Content-Type".to_string(), "application/json".to_string());
                context.insert(CONTEXT_GENERATION.to_string(), generation.to_string());
                (TRANSFORM_PATH, body, trace_context)
            }
            Self::RegenerateKeys { trace_context } => (REGENERATE_KEYS_PATH, Vec::new(), trace_context),
        };

        if let Some(trace_context) = trace_context {
            trace_context.write_into(&mut context);
        }

        Ok(HttpCall {
            url: format!("{base}{path}"),
            headers,
            body,
            context,
        })
    }
}

/// Reply of the key-regeneration endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyRegenerationResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A decoded reply, routed back into the application as an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceReply {
    /// The transformation endpoint answered with a JSON body.
    Transformed { generation: u64, reply: TransformResult },

    /// The key-regeneration endpoint answered with a JSON body.
    KeysRegenerated { reply: KeyRegenerationResult },

    /// The call produced no usable reply.
    Failed {
        call: CallKind,
        generation: Option<u64>,
        message: String,
    },
}
