use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

use super::types::{DEFAULT_GAME_PORT, LogSink, RenderedRow, RowStyle, TableLayout, ViewSink};
use crate::lib::poller::types::ViewModel;
use crate::lib::tasks::types::ViewRecord;

/// Ready rows get the ready treatment; false or missing readiness does not.
pub fn row_style(record: &ViewRecord) -> RowStyle {
    match record.server_ready {
        Some(true) => RowStyle::Ready,
        _ => RowStyle::NotReady,
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

impl TableLayout {
    pub fn new(connect_password: &str) -> Self {
        TableLayout {
            connect_password: connect_password.to_string(),
            game_port: DEFAULT_GAME_PORT,
        }
    }

    /// Stop button keyed by the record's stop payload. The payload is first
    /// encoded as a JS string literal, then the whole literal is escaped for
    /// the attribute, so the browser hands `stopServer` the payload unchanged.
    pub fn stop_cell(&self, payload: Option<&str>) -> Option<String> {
        let literal = serde_json::to_string(payload?).ok()?;
        let argument = escape_html(&literal);
        Some(format!(
            r#"<button type="submit" class="btn btn-primary" onclick="stopServer({argument})">Stop</button>"#
        ))
    }

    pub fn connect_url(&self, address: &str) -> String {
        format!(
            "steam://connect/{}:{}/{}",
            address, self.game_port, self.connect_password
        )
    }

    pub fn connect_cell(&self, address: Option<&str>) -> Option<String> {
        let address = address?;
        Some(format!(
            r#"<a href="{}">{}</a>"#,
            escape_html(&self.connect_url(address)),
            escape_html(address)
        ))
    }

    pub fn render_row(&self, record: &ViewRecord) -> RenderedRow {
        let style = row_style(record);
        RenderedRow {
            record: record.clone(),
            style,
            background: style.background().to_string(),
            stop_cell: self.stop_cell(record.stop_server.as_deref()),
            connect_cell: self.connect_cell(record.public_ip.as_deref()),
        }
    }

    pub fn render(&self, model: &ViewModel) -> Vec<RenderedRow> {
        model
            .records
            .iter()
            .map(|record| self.render_row(record))
            .collect()
    }
}

impl ViewSink for LogSink {
    fn load(&mut self, rows: Vec<RenderedRow>) {
        self.loads += 1;
        let ready = rows.iter().filter(|row| row.style == RowStyle::Ready).count();
        info!(event = "table_loaded", rows = rows.len(), ready = ready, loads = self.loads);
    }
}

/// Hands every new view snapshot to `sink` until the poller goes away.
pub async fn pump<S: ViewSink>(
    mut rx: watch::Receiver<Arc<ViewModel>>,
    layout: Arc<TableLayout>,
    mut sink: S,
) {
    while rx.changed().await.is_ok() {
        let model = rx.borrow_and_update().clone();
        sink.load(layout.render(&model));
    }
}
