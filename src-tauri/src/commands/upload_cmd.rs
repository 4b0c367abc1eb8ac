//! Upload Commands
//!
//! Native image picking and multipart uploads into an open list.
//!
//! On desktop the picker hands back a file system path. On Android it is a
//! `content://` URI with no file extension, so files are read through the
//! fs plugin and the image type is sniffed from the bytes when the name
//! does not tell.

use std::collections::BTreeMap;
use std::path::PathBuf;

use remote_list::{ListError, MediaAsset, NewItem};
use tauri::{command, AppHandle, Runtime, State, Url};
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_fs::{FilePath, FsExt};

use super::list_cmd::{current_view, list_error};
use crate::remote::ListView;
use crate::AppState;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

#[command]
pub async fn pick_image<R: Runtime>(app: AppHandle<R>) -> Result<Option<String>, String> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file(move |picked| {
            let _ = tx.send(picked);
        });
    let picked = rx.await.map_err(|_| "The file dialog closed unexpectedly".to_string())?;
    Ok(picked.map(|path| path.to_string()))
}

/// Path or URI string from `pick_image`, back in the picker's own type
fn picked_file(picked: &str) -> Result<FilePath, ListError> {
    let picked = picked.trim();
    if picked.is_empty() {
        return Err(ListError::Validation("Please select an image".to_string()));
    }
    match Url::parse(picked) {
        Ok(url) if url.scheme() == "file" => url
            .to_file_path()
            .map(FilePath::Path)
            .map_err(|_| ListError::Validation(format!("Could not read {}", picked))),
        // Single letters are Windows drive prefixes, not schemes
        Ok(url) if url.scheme().len() > 1 => Ok(FilePath::Url(url)),
        _ => Ok(FilePath::Path(PathBuf::from(picked))),
    }
}

/// Name sent with the multipart part
fn picked_file_name(file: &FilePath) -> String {
    let name = match file {
        FilePath::Path(path) => path.file_name().map(|name| name.to_string_lossy().to_string()),
        FilePath::Url(url) => url
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string)),
    };
    name.filter(|name| !name.is_empty()).unwrap_or_else(|| "image".to_string())
}

/// Build the upload asset, accepting images only.
///
/// The extension decides when it names an image type; otherwise the content
/// is sniffed and the file name gets a matching extension.
fn image_asset(file_name: String, bytes: Vec<u8>) -> Result<MediaAsset, ListError> {
    let by_name = mime_guess::from_path(&file_name).first_or_octet_stream();
    if by_name.type_() == mime_guess::mime::IMAGE {
        return Ok(MediaAsset::new(file_name, by_name.essence_str(), bytes));
    }

    let format = image::guess_format(&bytes)
        .map_err(|_| ListError::Validation("Please select an image file".to_string()))?;
    let mime = format.to_mime_type();
    let file_name = match format.extensions_str().first() {
        Some(ext) if !file_name.contains('.') => format!("{}.{}", file_name, ext),
        _ => file_name,
    };
    Ok(MediaAsset::new(file_name, mime, bytes))
}

/// Read the picked file into an upload asset
async fn read_asset<R: Runtime>(app: &AppHandle<R>, picked: &str) -> Result<MediaAsset, ListError> {
    let file = picked_file(picked)?;
    let file_name = picked_file_name(&file);

    let reader = app.clone();
    let source = file.to_string();
    let bytes = tauri::async_runtime::spawn_blocking(move || reader.fs().read(file))
        .await
        .map_err(|e| ListError::Validation(format!("Could not read {}: {}", source, e)))?
        .map_err(|e| ListError::Validation(format!("Could not read {}: {}", source, e)))?;

    image_asset(file_name, bytes)
}

#[command]
pub async fn upload_item<R: Runtime>(
    app: AppHandle<R>,
    handle: u64,
    path: String,
    fields: BTreeMap<String, String>,
    state: State<'_, AppState>,
) -> Result<ListView, String> {
    let (kind, controller) = state.lists.get(handle).await?;

    let mut item = NewItem::new(read_asset(&app, &path).await.map_err(list_error)?);
    for (name, value) in fields {
        item = item.with_field(name, value.trim());
    }
    item.require(kind.required_fields()).map_err(list_error)?;
    kind.check_fields(&item.fields).map_err(|e| e.to_string())?;

    let created = controller.create(item).await.map_err(list_error)?;
    let _ = rolling_logger::info(&format!("Uploaded {} item {}", kind.as_str(), created.id));
    current_view(&state, handle).await
}
