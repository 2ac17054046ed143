mod api;
mod notifications;
mod requests;

use std::collections::HashMap;

use anyhow::Result;
use logtrail_ide::{Analysis, Caret, Config, Edit};
use logtrail_inputs::{File, LineIndex};
use text_size::{TextRange, TextSize};

/// Command inserting log statements for any number of selections.
pub const INSERT_LOG_COMMAND: &str = "logtrail.insertLog";

pub struct Server {
    connection: lsp_server::Connection,
    io_threads: Option<lsp_server::IoThreads>,
    analysis: Analysis,
    files: HashMap<lsp_types::Uri, File>,
    next_request_id: i32,
}

impl Server {
    fn server_capabilities() -> lsp_types::ServerCapabilities {
        lsp_types::ServerCapabilities {
            position_encoding: Some(lsp_types::PositionEncodingKind::UTF8),
            text_document_sync: Some(lsp_types::TextDocumentSyncCapability::Kind(
                lsp_types::TextDocumentSyncKind::FULL,
            )),
            code_action_provider: Some(lsp_types::CodeActionProviderCapability::Simple(true)),
            execute_command_provider: Some(lsp_types::ExecuteCommandOptions {
                commands: vec![INSERT_LOG_COMMAND.to_owned()],
                ..Default::default()
            }),
            ..lsp_types::ServerCapabilities::default()
        }
    }

    /// Starts a server on stdio.
    ///
    /// `config` is used unless the client sends `initializationOptions`.
    pub fn new(config: Config) -> Result<Self> {
        let (connection, io_threads) = lsp_server::Connection::stdio();
        Self::initialize(connection, Some(io_threads), config)
    }

    /// Runs the initialize handshake on an existing connection.
    pub fn initialize(
        connection: lsp_server::Connection,
        io_threads: Option<lsp_server::IoThreads>,
        config: Config,
    ) -> Result<Self> {
        let (initialize_id, initialize_params) = match connection.initialize_start() {
            Ok(it) => it,
            Err(protocol_error) => {
                if protocol_error.channel_is_disconnected()
                    && let Some(io_threads) = io_threads
                {
                    io_threads.join()?;
                }
                return Err(protocol_error.into());
            }
        };

        let initialize_params: lsp_types::InitializeParams =
            from_json("InitializeParams", &initialize_params)?;
        let config = match &initialize_params.initialization_options {
            Some(options) => from_json("initializationOptions", options)?,
            None => config,
        };
        tracing::debug!(?config, "initializing");

        let initialize_data = serde_json::json!({
            "capabilities": Self::server_capabilities(),
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION"),
            },
        });

        if let Err(protocol_error) = connection.initialize_finish(initialize_id, initialize_data) {
            if protocol_error.channel_is_disconnected()
                && let Some(io_threads) = io_threads
            {
                io_threads.join()?;
            }
            return Err(protocol_error.into());
        }

        Ok(Self {
            connection,
            io_threads,
            analysis: Analysis::new(config),
            files: HashMap::default(),
            next_request_id: 0,
        })
    }

    fn file(&self, uri: &lsp_types::Uri) -> Result<File> {
        let file = self.files.get(uri).copied();
        file.ok_or_else(|| InvalidParams::UnknownDocument(uri.clone()).into())
    }

    fn send(&self, message: lsp_server::Message) {
        if let Err(error) = self.connection.sender.send(message) {
            tracing::warn!(%error, "client connection is closed");
        }
    }

    fn respond(&mut self, response: lsp_server::Response) {
        self.send(response.into());
    }

    fn send_request<R>(&mut self, params: R::Params)
    where
        R: lsp_types::request::Request,
    {
        let id = lsp_server::RequestId::from(self.next_request_id);
        self.next_request_id += 1;
        self.send(lsp_server::Request::new(id, R::METHOD.to_owned(), params).into());
    }

    pub fn run(mut self) -> Result<()> {
        let receiver = self.connection.receiver.clone();
        for message in &receiver {
            match message {
                lsp_server::Message::Request(request) => {
                    if self.connection.handle_shutdown(&request)? {
                        break;
                    }
                    api::request(&mut self, request);
                }
                lsp_server::Message::Response(response) => {
                    if let Some(error) = response.error {
                        tracing::warn!(id = %response.id, message = %error.message, "client returned an error");
                    }
                }
                lsp_server::Message::Notification(notification) => {
                    api::notification(&mut self, notification);
                }
            }
        }

        match self.io_threads.take() {
            Some(io_threads) => io_threads.join().map_err(Into::into),
            None => Ok(()),
        }
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    what: &'static str,
    json: &serde_json::Value,
) -> Result<T> {
    serde_json::from_value(json.clone())
        .map_err(|e| anyhow::format_err!("Failed to deserialize {what}: {e}; {json}"))
}

/// Request parameters that do not match the server's state, reported to
/// the client as `InvalidParams` rather than as an internal error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum InvalidParams {
    #[error("unknown document `{}`", .0.as_str())]
    UnknownDocument(lsp_types::Uri),
    #[error("line {0} is out of range")]
    LineOutOfRange(u32),
}

/// Converts a UTF-8 position, clamping the column to the end of its line.
fn to_offset(text: &str, line_index: &LineIndex, position: lsp_types::Position) -> Result<TextSize> {
    let line_range = line_index
        .line(position.line)
        .ok_or(InvalidParams::LineOutOfRange(position.line))?;
    let line = text[line_range].trim_end_matches(['\n', '\r']);
    let col = TextSize::from(position.character);
    Ok(line_range.start() + col.min(TextSize::of(line)))
}

/// Caret for an editor selection; the caret sits at the selection's end.
fn to_caret(text: &str, line_index: &LineIndex, range: lsp_types::Range) -> Result<Caret> {
    let start = to_offset(text, line_index, range.start)?;
    let end = to_offset(text, line_index, range.end)?;
    Ok(Caret { offset: end, selection: TextRange::new(start.min(end), start.max(end)) })
}

fn to_lsp_range(line_index: &LineIndex, range: TextRange) -> lsp_types::Range {
    let start = line_index.line_col(range.start());
    let end = line_index.line_col(range.end());

    lsp_types::Range {
        start: lsp_types::Position::new(start.line, start.col),
        end: lsp_types::Position::new(end.line, end.col),
    }
}

fn workspace_edit(
    line_index: &LineIndex,
    uri: lsp_types::Uri,
    edit: Edit,
) -> lsp_types::WorkspaceEdit {
    let text_edit =
        lsp_types::TextEdit { range: to_lsp_range(line_index, edit.range), new_text: edit.insert };

    lsp_types::WorkspaceEdit {
        changes: Some(HashMap::from([(uri, vec![text_edit])])),
        ..lsp_types::WorkspaceEdit::default()
    }
}
