//! Error types for the lazy list engine.
//!
//! Configuration problems are fatal and surface from
//! [`ScrollControllerBuilder::build`](super::ScrollControllerBuilder::build).
//! Per-item failures ([`HookError`], [`SizeError`]) are logged and recovered
//! inside the controller; they never abort a refresh.

use slotview_ui_layout::ItemSize;

/// A controller could not be assembled.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    MissingHooks,
    MissingItemSource,
    /// Variable sizing was requested without an [`ItemSizeProvider`](super::ItemSizeProvider).
    MissingSizeProvider,
    InvalidUniformSize(ItemSize),
    InvalidFallbackSize(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingHooks => write!(f, "slot hooks are required"),
            ConfigError::MissingItemSource => {
                write!(f, "an item source or an item count override is required")
            }
            ConfigError::MissingSizeProvider => {
                write!(f, "variable item sizing requires a size provider")
            }
            ConfigError::InvalidUniformSize(size) => write!(
                f,
                "uniform item size must have a positive main extent (got {} x {})",
                size.main, size.cross
            ),
            ConfigError::InvalidFallbackSize(size) => {
                write!(f, "fallback item size must be positive and finite (got {size})")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure reported by a [`SlotHooks`](super::SlotHooks) callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    message: String,
}

impl HookError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for HookError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "slot hook failed: {}", self.message)
    }
}

impl std::error::Error for HookError {}

/// Failure reported by an [`ItemSizeProvider`](super::ItemSizeProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The provider has no size for this index (yet).
    Unavailable { index: usize },
    Failed { index: usize, reason: String },
}

impl SizeError {
    pub fn failed(index: usize, reason: impl Into<String>) -> Self {
        SizeError::Failed {
            index,
            reason: reason.into(),
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SizeError::Unavailable { index } | SizeError::Failed { index, .. } => *index,
        }
    }
}

impl std::fmt::Display for SizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SizeError::Unavailable { index } => write!(f, "no size available for item {index}"),
            SizeError::Failed { index, reason } => {
                write!(f, "measuring item {index} failed: {reason}")
            }
        }
    }
}

impl std::error::Error for SizeError {}

/// Operation rejected by the controller state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerError {
    Disposed,
}

impl std::fmt::Display for ControllerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControllerError::Disposed => write!(f, "scroll controller has been disposed"),
        }
    }
}

impl std::error::Error for ControllerError {}
