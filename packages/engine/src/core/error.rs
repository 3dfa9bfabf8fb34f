use std::fmt;

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Drawing context flavours a canvas can hand out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextKind {
    Canvas2d,
    WebGl2,
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContextKind::Canvas2d => f.write_str("2d"),
            ContextKind::WebGl2 => f.write_str("webgl2"),
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to get {0} rendering context")]
    ContextUnavailable(ContextKind),

    #[error("unsupported render mode: {0}")]
    UnsupportedRenderMode(String),

    #[error("universe dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("shader compilation failed: {0}")]
    Shader(String),

    #[error("unable to initialize the shader program: {0}")]
    ProgramLink(String),

    #[error("failed to create {0}")]
    Resource(&'static str),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Js(String),
}

impl EngineError {
    /// Thrown `Error` objects keep their message; anything else is
    /// stringified.
    pub fn from_js(value: JsValue) -> Self {
        if let Some(err) = value.dyn_ref::<js_sys::Error>() {
            return EngineError::Js(err.message().into());
        }
        EngineError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<EngineError> for JsValue {
    fn from(err: EngineError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
