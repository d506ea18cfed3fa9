// PNG screenshots of the current frame

use crate::ppu::{SCREEN_HEIGHT, SCREEN_WIDTH};
use chrono::Local;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors from writing a screenshot
#[derive(Debug)]
pub enum ScreenshotError {
    Io(io::Error),
    Encode(png::EncodingError),
}

impl std::fmt::Display for ScreenshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScreenshotError::Io(err) => write!(f, "screenshot I/O error: {}", err),
            ScreenshotError::Encode(err) => write!(f, "PNG encoding error: {}", err),
        }
    }
}

impl std::error::Error for ScreenshotError {}

impl From<io::Error> for ScreenshotError {
    fn from(err: io::Error) -> Self {
        ScreenshotError::Io(err)
    }
}

impl From<png::EncodingError> for ScreenshotError {
    fn from(err: png::EncodingError) -> Self {
        ScreenshotError::Encode(err)
    }
}

/// Save an RGBA frame as a PNG under `directory`
///
/// The file name carries a local timestamp so repeated shots do not
/// clobber each other. Returns the path written.
pub fn save_screenshot(rgba: &[u8], directory: &Path) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(directory)?;

    let name = format!("famicore_{}.png", Local::now().format("%Y%m%d_%H%M%S%.3f"));
    let path = directory.join(name);

    let file = fs::File::create(&path)?;
    let mut encoder = png::Encoder::new(
        io::BufWriter::new(file),
        SCREEN_WIDTH as u32,
        SCREEN_HEIGHT as u32,
    );
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    Ok(path)
}
