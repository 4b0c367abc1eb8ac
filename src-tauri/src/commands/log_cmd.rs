use tauri::command;

const DEFAULT_LOG_LINES: usize = 200;

#[command]
pub async fn recent_logs(limit: Option<usize>) -> Result<Vec<String>, String> {
    Ok(rolling_logger::recent_lines(limit.unwrap_or(DEFAULT_LOG_LINES)))
}
