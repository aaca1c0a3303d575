use crate::config::LayoutConfig;
use crate::layout::LayoutResult;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// JSON view of a layout for downstream renderers. Coordinates are
/// canvas-relative pixels with the origin at the top-left corner.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub width: f32,
    pub height: f32,
    pub truncated: bool,
    pub placed: Vec<PlacedDump>,
    pub unplaced: Vec<UnplacedDump>,
}

#[derive(Debug, Serialize)]
pub struct PlacedDump {
    pub text: String,
    pub weight: u32,
    pub font_size: f32,
    pub rotation: f32,
    /// Word center.
    pub x: f32,
    pub y: f32,
    /// Padded bounding box as `[x, y, width, height]`.
    pub bbox: [f32; 4],
}

#[derive(Debug, Serialize)]
pub struct UnplacedDump {
    pub text: String,
    pub weight: u32,
    pub font_size: f32,
    pub rotation: f32,
}

impl LayoutDump {
    pub fn from_result(result: &LayoutResult, config: &LayoutConfig) -> Self {
        let placed = result
            .placed
            .iter()
            .map(|word| {
                let (x, y, width, height) = word.bbox();
                PlacedDump {
                    text: word.text.clone(),
                    weight: word.weight,
                    font_size: word.font_size,
                    rotation: word.rotation,
                    x: config.width / 2.0 + word.x,
                    y: config.height / 2.0 + word.y,
                    bbox: [x, y, width, height],
                }
            })
            .collect();

        let unplaced = result
            .unplaced
            .iter()
            .map(|word| UnplacedDump {
                text: word.text.clone(),
                weight: word.weight,
                font_size: word.font_size,
                rotation: word.rotation,
            })
            .collect();

        LayoutDump {
            width: config.width,
            height: config.height,
            truncated: result.truncated,
            placed,
            unplaced,
        }
    }
}

pub fn dump_string(result: &LayoutResult, config: &LayoutConfig) -> anyhow::Result<String> {
    let dump = LayoutDump::from_result(result, config);
    Ok(serde_json::to_string_pretty(&dump)?)
}

pub fn write_layout_dump(
    path: &Path,
    result: &LayoutResult,
    config: &LayoutConfig,
) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_result(result, config);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
