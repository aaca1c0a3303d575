use crate::config::{Config, load_config};
use crate::layout::compute_layout;
use crate::layout_dump::{dump_string, write_layout_dump};
#[cfg(feature = "png")]
use crate::render::write_output_png;
use crate::render::{render_svg, write_output_svg};
use crate::tokenizer::analyze;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "wcloud", version, about = "Word cloud layout engine")]
pub struct Args {
    /// Input text file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for svg/json if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Seed for rotation sampling
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Keep at most this many ranked words
    #[arg(long = "max-words")]
    pub max_words: Option<usize>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    #[cfg(feature = "png")]
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    let input = read_input(args.input.as_deref())?;
    let words = analyze(&input, &config.tokenizer);
    if words.is_empty() {
        return Err(anyhow::anyhow!("No words found in input"));
    }

    let result = compute_layout(&words, &config.theme, &config.layout)?;
    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&result, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        #[cfg(feature = "png")]
        OutputFormat::Png => {
            let svg = render_svg(&result, &config.theme, &config.layout);
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.layout, &config.render)?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &result, &config.layout)?,
            None => println!("{}", dump_string(&result, &config.layout)?),
        },
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(width) = args.width {
        config.layout.width = width;
    }
    if let Some(height) = args.height {
        config.layout.height = height;
    }
    if let Some(seed) = args.seed {
        config.layout.seed = seed;
    }
    if let Some(max_words) = args.max_words {
        config.tokenizer.max_words = max_words;
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_apply_on_top_of_the_config_file() {
        let args = Args::parse_from([
            "wcloud",
            "-i",
            "words.txt",
            "--width",
            "1024",
            "-s",
            "9",
            "--max-words",
            "40",
        ]);
        assert_eq!(args.input.as_deref(), Some(Path::new("words.txt")));
        assert!(matches!(args.output_format, OutputFormat::Svg));

        let mut config = load_config(args.config.as_deref()).unwrap();
        apply_overrides(&mut config, &args);
        assert_eq!(config.layout.width, 1024.0);
        assert_eq!(config.layout.seed, 9);
        assert_eq!(config.tokenizer.max_words, 40);
        assert_eq!(config.layout.height, 600.0, "untouched fields keep defaults");
    }

    #[test]
    fn output_format_flag_accepts_each_variant() {
        let json = Args::parse_from(["wcloud", "-e", "json"]);
        assert!(matches!(json.output_format, OutputFormat::Json));

        let svg = Args::parse_from(["wcloud", "--outputFormat", "svg"]);
        assert!(matches!(svg.output_format, OutputFormat::Svg));

        #[cfg(feature = "png")]
        {
            let png = Args::parse_from(["wcloud", "-e", "png"]);
            assert!(matches!(png.output_format, OutputFormat::Png));
        }
    }

    #[cfg(feature = "png")]
    #[test]
    fn png_output_requires_a_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = ensure_output(&Some(PathBuf::from("cloud.png")), "png").unwrap();
        assert_eq!(path, PathBuf::from("cloud.png"));
    }
}
