use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use radar_core::export::svg::write_svg;
use radar_core::export::HtmlPageBackend;
use radar_core::{Legend, RadarError, RenderBackend, Scene};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Render(#[from] RadarError),
}

pub fn export_svg(scene: &Scene, path: &Path) -> Result<(), ExportError> {
    let file = fs::File::create(path).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    write_svg(scene, file)?;
    info!("Wrote SVG to {}", path.display());
    Ok(())
}

pub fn export_html(scene: &Scene, legend: &Legend, path: &Path) -> Result<(), ExportError> {
    let page = HtmlPageBackend::expanded().draw(scene, legend)?;
    fs::write(path, page).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote HTML page to {}", path.display());
    Ok(())
}
