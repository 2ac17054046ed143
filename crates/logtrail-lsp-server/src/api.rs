use std::collections::hash_map::Entry;

use anyhow::{Result, bail};
use logtrail_ide::Config;
use logtrail_inputs::File;
use logtrail_syntax::FileKind;
use salsa::Setter as _;
use serde::Deserialize;

use super::notifications::NotificationDispatcher;
use super::requests::RequestDispatcher;
use super::{INSERT_LOG_COMMAND, Server, from_json, to_caret, workspace_edit};

pub(crate) fn request(server: &mut Server, request: lsp_server::Request) {
    RequestDispatcher::new(request, server)
        .on::<lsp_types::request::CodeActionRequest>(handle_code_action)
        .on::<lsp_types::request::ExecuteCommand>(handle_execute_command)
        .finish();
}

/// Single argument of [`INSERT_LOG_COMMAND`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertLogArguments {
    uri: lsp_types::Uri,
    selections: Vec<lsp_types::Range>,
}

fn handle_code_action(
    server: &mut Server,
    params: lsp_types::CodeActionParams,
) -> Result<Option<lsp_types::CodeActionResponse>> {
    let uri = params.text_document.uri;
    let file = server.file(&uri)?;
    let db = server.analysis.db();
    let line_index = file.line_index(db);

    let caret = to_caret(file.text(db), line_index, params.range)?;
    let Some(preview) = server.analysis.preview(file, &[caret]).into_iter().next() else {
        return Ok(None);
    };
    let Some(edit) = server.analysis.insert_log(file, &[caret]) else {
        return Ok(None);
    };

    let action = lsp_types::CodeAction {
        title: format!("Insert `{}`", preview.statement),
        kind: Some(lsp_types::CodeActionKind::REFACTOR),
        edit: Some(workspace_edit(line_index, uri, edit)),
        ..lsp_types::CodeAction::default()
    };
    Ok(Some(vec![action.into()]))
}

fn handle_execute_command(
    server: &mut Server,
    params: lsp_types::ExecuteCommandParams,
) -> Result<Option<serde_json::Value>> {
    if params.command != INSERT_LOG_COMMAND {
        bail!("unknown command `{}`", params.command);
    }
    let [arguments] = params.arguments.as_slice() else {
        bail!("`{INSERT_LOG_COMMAND}` takes exactly one argument");
    };
    let InsertLogArguments { uri, selections } = from_json(INSERT_LOG_COMMAND, arguments)?;

    let file = server.file(&uri)?;
    let db = server.analysis.db();
    let line_index = file.line_index(db);
    let carets = selections
        .into_iter()
        .map(|range| to_caret(file.text(db), line_index, range))
        .collect::<Result<Vec<_>>>()?;

    match server.analysis.insert_log(file, &carets) {
        Some(edit) => {
            let edit = workspace_edit(line_index, uri, edit);
            server.send_request::<lsp_types::request::ApplyWorkspaceEdit>(
                lsp_types::ApplyWorkspaceEditParams {
                    label: Some("Insert log statements".to_owned()),
                    edit,
                },
            );
        }
        None => tracing::debug!(uri = uri.as_str(), "nothing to log"),
    }

    Ok(None)
}

pub(crate) fn notification(server: &mut Server, notification: lsp_server::Notification) {
    NotificationDispatcher::new(notification, server)
        .on::<lsp_types::notification::DidOpenTextDocument>(handle_did_open_text_document)
        .on::<lsp_types::notification::DidChangeTextDocument>(handle_did_change_text_document)
        .on::<lsp_types::notification::DidCloseTextDocument>(handle_did_close_text_document)
        .on::<lsp_types::notification::DidChangeConfiguration>(handle_did_change_configuration)
        .finish();
}

fn handle_did_open_text_document(
    server: &mut Server,
    params: lsp_types::DidOpenTextDocumentParams,
) -> Result<()> {
    let lsp_types::TextDocumentItem { uri, language_id, version: _, text } = params.text_document;
    let path = uri.path().as_str();
    let kind = FileKind::from_path(path).or_else(|| FileKind::from_language_id(&language_id));

    match server.files.entry(uri.clone()) {
        Entry::Occupied(occupied) => {
            let file = *occupied.get();
            file.set_text(server.analysis.db_mut()).to(text);
            file.set_kind(server.analysis.db_mut()).to(kind);
        }
        Entry::Vacant(vacant) => {
            vacant.insert(File::new(server.analysis.db(), path.into(), text, kind));
        }
    }

    Ok(())
}

fn handle_did_change_text_document(
    server: &mut Server,
    params: lsp_types::DidChangeTextDocumentParams,
) -> Result<()> {
    let file = server.file(&params.text_document.uri)?;
    let Some(change) = params.content_changes.into_iter().last() else {
        return Ok(());
    };
    file.set_text(server.analysis.db_mut()).to(change.text);
    Ok(())
}

#[expect(clippy::needless_pass_by_value)]
fn handle_did_close_text_document(
    server: &mut Server,
    params: lsp_types::DidCloseTextDocumentParams,
) -> Result<()> {
    server.files.remove(&params.text_document.uri);
    Ok(())
}

/// Accepts settings either nested under `logtrail` or at the top level.
#[expect(clippy::needless_pass_by_value)]
fn handle_did_change_configuration(
    server: &mut Server,
    params: lsp_types::DidChangeConfigurationParams,
) -> Result<()> {
    let settings = params.settings.get("logtrail").unwrap_or(&params.settings);
    let config: Config = from_json("settings", settings)?;
    server.analysis.set_config(config);
    Ok(())
}
