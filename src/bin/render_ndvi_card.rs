use std::fs;
use std::path::PathBuf;

use ndvi_charts::api::{NdviCard, NdviCardConfig, build_ndvi_card, parse_ndvi_upload};
use ndvi_charts::render::SvgRenderer;

const USAGE: &str = "usage: render_ndvi_card --output <path.svg> [--input <ndvi_statistics.json>] [--captured-at <date>] [--width <px>] [--view-json <path>]";

struct CliArgs {
    input: Option<PathBuf>,
    output: PathBuf,
    captured_at: Option<String>,
    width: Option<u32>,
    view_json: Option<PathBuf>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = ndvi_charts::telemetry::init_default_tracing();
    let args = parse_args()?;

    let upload = match &args.input {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            let upload = parse_ndvi_upload(&raw, args.captured_at.as_deref())
                .map_err(|err| err.to_string())?;
            Some(upload)
        }
        None => None,
    };
    let view = build_ndvi_card(
        upload.as_ref().map(|upload| &upload.summary),
        upload.as_ref().and_then(|upload| upload.captured_on),
    );

    if let Some(path) = &args.view_json {
        let payload = view
            .to_json_contract_v1_pretty()
            .map_err(|err| err.to_string())?;
        fs::write(path, payload)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?;
    }

    let config = args.width.map_or_else(NdviCardConfig::default, NdviCardConfig::new);
    let mut card = NdviCard::new(SvgRenderer::new("ndvi-card"), view, config)
        .map_err(|err| err.to_string())?;
    card.render().map_err(|err| err.to_string())?;
    let document = card.into_renderer().into_document();
    fs::write(&args.output, document)
        .map_err(|err| format!("failed to write `{}`: {err}", args.output.display()))?;

    if let Some(upload) = upload {
        for field in upload.preview.fields() {
            println!("{}: {}", field.label, field.value);
        }
    }
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut captured_at = None::<String>;
    let mut width = None::<u32>;
    let mut view_json = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--captured-at" => {
                captured_at = Some(
                    args.next()
                        .ok_or_else(|| "missing value for --captured-at".to_owned())?,
                );
            }
            "--width" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --width".to_owned())?;
                width = Some(
                    value
                        .parse()
                        .map_err(|err| format!("invalid --width `{value}`: {err}"))?,
                );
            }
            "--view-json" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --view-json".to_owned())?;
                view_json = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let output = output.ok_or_else(|| format!("missing --output\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        output,
        captured_at,
        width,
        view_json,
    })
}
