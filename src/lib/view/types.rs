use serde::Serialize;

use crate::lib::tasks::types::ViewRecord;

pub const DEFAULT_GAME_PORT: u16 = 27015;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStyle {
    Ready,
    NotReady,
}

impl RowStyle {
    pub fn background(self) -> &'static str {
        match self {
            RowStyle::Ready => "rgba(0, 255, 0, 0.25)",
            RowStyle::NotReady => "rgba(255, 0, 0, 0.25)",
        }
    }
}

/// Column formatting for the task table.
#[derive(Debug, Clone)]
pub struct TableLayout {
    /// Server password baked into the connect link.
    pub connect_password: String,
    pub game_port: u16,
}

/// A record together with its row treatment and the two action cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedRow {
    #[serde(flatten)]
    pub record: ViewRecord,
    pub style: RowStyle,
    pub background: String,
    pub stop_cell: Option<String>,
    pub connect_cell: Option<String>,
}

/// Receives the full table every time the view changes. Each call replaces
/// whatever the sink showed before.
pub trait ViewSink: Send {
    fn load(&mut self, rows: Vec<RenderedRow>);
}

/// Sink that only reports what it was given.
#[derive(Debug, Default)]
pub struct LogSink {
    pub loads: usize,
}
