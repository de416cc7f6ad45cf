use image::DynamicImage;
use std::path::{Path, PathBuf};

use crate::error::{AnalysisError, Result};

/// One titled image of a figure
#[derive(Debug, Clone)]
pub struct Panel {
    pub title: String,
    pub image: DynamicImage,
}

/// Everything a renderer needs to show one pipeline's visual output
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub title: String,
    pub panels: Vec<Panel>,
}

impl RenderRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            panels: Vec::new(),
        }
    }

    pub fn with_panel(mut self, title: impl Into<String>, image: DynamicImage) -> Self {
        self.panels.push(Panel {
            title: title.into(),
            image,
        });
        self
    }
}

pub trait Renderer {
    fn render(&self, request: &RenderRequest) -> Result<()>;
}

/// Writes each panel as a PNG file into an output directory
#[derive(Debug, Clone)]
pub struct DirectoryRenderer {
    output_dir: PathBuf,
}

impl DirectoryRenderer {
    /// The directory is created if missing and must otherwise be empty
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();

        if output_dir.exists() {
            let mut entries = std::fs::read_dir(&output_dir)?;
            if entries.next().is_some() {
                return Err(AnalysisError::Render(format!(
                    "output directory must be empty: {}",
                    output_dir.display()
                )));
            }
        } else {
            std::fs::create_dir_all(&output_dir)?;
        }

        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// File a panel is written to
    pub fn panel_path(&self, request: &RenderRequest, index: usize) -> PathBuf {
        let panel = &request.panels[index];
        self.output_dir.join(format!(
            "{}_{:02}_{}.png",
            slugify(&request.title),
            index + 1,
            slugify(&panel.title)
        ))
    }
}

impl Renderer for DirectoryRenderer {
    fn render(&self, request: &RenderRequest) -> Result<()> {
        for (i, panel) in request.panels.iter().enumerate() {
            let path = self.panel_path(request, i);
            panel
                .image
                .save(&path)
                .map_err(|e| AnalysisError::Render(format!("failed to save {}: {}", path.display(), e)))?;
            log::debug!("Saved panel '{}' to {}", panel.title, path.display());
        }
        Ok(())
    }
}

/// Lowercase alphanumeric words joined by underscores
pub fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}
