//! Action type identifiers known to the batcher.
//!
//! The host application owns the full enumeration; only the identifiers the
//! batcher treats specially are listed here.

/// Control action toggling analytics on or off.
pub const SET_ANALYTICS_ENABLED: &str = "SET_ANALYTICS_ENABLED";

// Map actions
pub const SET_LAYER_OPACITY: &str = "SET_LAYER_OPACITY";
pub const INGEST_LAYER_CONFIG: &str = "INGEST_LAYER_CONFIG";
pub const MERGE_LAYERS: &str = "MERGE_LAYERS";
pub const PIXEL_HOVER: &str = "PIXEL_HOVER";
pub const INGEST_LAYER_PALETTES: &str = "INGEST_LAYER_PALETTES";

// Async bookkeeping actions
pub const LOAD_INITIAL_DATA: &str = "LOAD_INITIAL_DATA";
pub const INITIAL_DATA_LOADED: &str = "INITIAL_DATA_LOADED";
pub const LOAD_LAYER_PALETTES: &str = "LOAD_LAYER_PALETTES";
pub const LAYER_PALETTES_LOADED: &str = "LAYER_PALETTES_LOADED";
pub const LOAD_LAYERS: &str = "LOAD_LAYERS";
pub const LAYERS_LOADED: &str = "LAYERS_LOADED";

// Date slider actions
pub const BEGIN_DRAGGING: &str = "BEGIN_DRAGGING";
pub const END_DRAGGING: &str = "END_DRAGGING";
pub const HOVER_DATE: &str = "HOVER_DATE";
pub const TIMELINE_MOUSE_OUT: &str = "TIMELINE_MOUSE_OUT";

pub const NO_ACTION: &str = "NO_ACTION";

/// High-frequency or purely local actions that are never worth recording.
pub const DEFAULT_EXCLUDED_ACTIONS: &[&str] = &[
    SET_LAYER_OPACITY,
    INGEST_LAYER_CONFIG,
    MERGE_LAYERS,
    PIXEL_HOVER,
    INGEST_LAYER_PALETTES,
    LOAD_INITIAL_DATA,
    INITIAL_DATA_LOADED,
    LOAD_LAYER_PALETTES,
    LAYER_PALETTES_LOADED,
    LOAD_LAYERS,
    LAYERS_LOADED,
    BEGIN_DRAGGING,
    END_DRAGGING,
    HOVER_DATE,
    TIMELINE_MOUSE_OUT,
    NO_ACTION,
];

/// Empty by default: the denylist alone governs.
pub const DEFAULT_INCLUDED_ACTIONS: &[&str] = &[];
