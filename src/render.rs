use crate::config::LayoutConfig;
#[cfg(feature = "png")]
use crate::config::RenderConfig;
use crate::layout::LayoutResult;
use crate::theme::Theme;
use anyhow::Result;
use std::path::Path;

/// Serializes a layout to an SVG document. Each placed word becomes one
/// `<text>` element, centered on its anchor and rotated around it, colored
/// by cycling through the theme palette in placement order.
pub fn render_svg(result: &LayoutResult, theme: &Theme, config: &LayoutConfig) -> String {
    let mut svg = String::new();
    let width = config.width;
    let height = config.height;

    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
    ));

    svg.push_str(&format!(
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background
    ));

    for (idx, word) in result.placed.iter().enumerate() {
        let center_x = width / 2.0 + word.x;
        let center_y = height / 2.0 + word.y;
        // visually centers the baseline on the anchor
        let baseline_shift = word.font_size * 0.35;
        svg.push_str(&format!(
            "<text text-anchor=\"middle\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\" transform=\"translate({center_x:.2} {center_y:.2}) rotate({:.1})\" y=\"{baseline_shift:.2}\">{}</text>",
            escape_xml(&theme.font_family),
            word.font_size,
            theme.color_for(idx),
            word.rotation,
            escape_xml(&word.text)
        ));
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    config: &LayoutConfig,
    render_cfg: &RenderConfig,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = "sans-serif".to_string();
    opt.default_size = usvg::Size::from_wh(config.width, config.height)
        .unwrap_or(usvg::Size::from_wh(800.0, 600.0).unwrap());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let size = tree.size().to_int_size();
    let scale = render_cfg.scale;
    let out_width = ((size.width() as f32 * scale).round() as u32).max(1);
    let out_height = ((size.height() as f32 * scale).round() as u32).max(1);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(out_width, out_height)
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate {out_width}x{out_height} pixmap"))?;

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
