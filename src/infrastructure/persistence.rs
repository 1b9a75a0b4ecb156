use std::fs;
use std::path::Path;

pub struct FileRepository;

impl FileRepository {
    /// Writes a rendered results page. Returns the path written on success.
    pub fn save_results_html(document: &str, filename: &Path) -> Result<String, String> {
        if let Some(parent) = filename.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| e.to_string())?;
            }
        }

        match fs::write(filename, document) {
            Ok(_) => {
                tracing::info!(path = %filename.display(), "exported results");
                Ok(filename.display().to_string())
            }
            Err(e) => Err(e.to_string()),
        }
    }
}
