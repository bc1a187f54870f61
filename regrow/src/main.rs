// Command-line entry for regrow
use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueHint};
use log::info;
use regrow::io::{ImageFormat, read_image, write_image};
use regrow::region::{
    ConnectivityType, GrowthParams, SeedOptions, SeedSource, SegmentationOptions, segment_auto,
};
use regrow::Color;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "regrow", version, about = "Seeded region growing segmentation")]
struct Cli {
    /// Input image path (PNG or binary PNM)
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
    /// Output image path; each region is painted with its mean color
    #[arg(value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Number of random seeds
    #[arg(long = "seeds", default_value_t = 16)]
    seeds: usize,
    /// RNG seed for reproducible seed placement
    #[arg(long = "rng-seed")]
    rng_seed: Option<u64>,
    /// Place seeds on a lattice with this spacing instead of randomly
    #[arg(long = "grid")]
    grid: Option<u32>,

    /// Initial additive threshold
    #[arg(long = "threshold")]
    threshold: Option<u32>,
    /// Threshold ceiling for adaptation
    #[arg(long = "threshold-max")]
    threshold_max: Option<u32>,
    /// Initial standard-deviation coefficient
    #[arg(long = "coef-sd")]
    coef_sd: Option<f32>,
    /// Coefficient ceiling for adaptation
    #[arg(long = "coef-sd-max")]
    coef_sd_max: Option<f32>,

    /// Grow through diagonal neighbors too
    #[arg(long = "eight-way", action = ArgAction::SetTrue)]
    eight_way: bool,
    /// Skip the fusion phase
    #[arg(long = "no-merge", action = ArgAction::SetTrue)]
    no_merge: bool,
    /// Color of unclaimed pixels, as R,G,B
    #[arg(long = "fill", value_parser = parse_color, default_value = "0,0,0")]
    fill: Color,
}

fn parse_color(s: &str) -> Result<Color> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        bail!("expected R,G,B, got '{}'", s);
    };
    Ok(Color::new(r.parse()?, g.parse()?, b.parse()?))
}

fn build_options(cli: &Cli) -> SegmentationOptions {
    let mut growth = GrowthParams::default();
    if let Some(v) = cli.threshold {
        growth.threshold = v;
        growth.threshold_max = growth.threshold_max.max(v);
    }
    if let Some(v) = cli.threshold_max {
        growth.threshold_max = v;
    }
    if let Some(v) = cli.coef_sd {
        growth.coef_sd = v;
        growth.coef_sd_max = growth.coef_sd_max.max(v);
    }
    if let Some(v) = cli.coef_sd_max {
        growth.coef_sd_max = v;
    }
    if cli.eight_way {
        growth.connectivity = ConnectivityType::EightWay;
    }

    let seeds = match cli.grid {
        Some(spacing) => SeedSource::Grid { spacing },
        None => {
            let mut opts = SeedOptions::new(cli.seeds);
            if let Some(s) = cli.rng_seed {
                opts = opts.with_rng_seed(s);
            }
            SeedSource::Random(opts)
        }
    };

    SegmentationOptions::new()
        .with_growth(growth)
        .with_merge(!cli.no_merge)
        .with_seeds(seeds)
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let options = build_options(&cli);

    let image = read_image(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!(
        "loaded {} ({}x{})",
        cli.input.display(),
        image.width(),
        image.height()
    );

    let seg = segment_auto(&image, &options).context("segmentation failed")?;
    info!(
        "{} regions after {} growth rounds and {} merges",
        seg.region_count(),
        seg.growth_rounds(),
        seg.merges()
    );

    let rendered = seg.render_mean_colors(cli.fill);
    write_image(&rendered, &cli.output, ImageFormat::Unknown)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    println!("region\tseed\tpixels\tmean\tthreshold\tcoef_sd");
    for r in seg.regions() {
        let c = r.mean_color;
        println!(
            "{}\t({}, {})\t{}\t#{:02x}{:02x}{:02x}\t{}\t{:.2}",
            r.id,
            r.seed.row,
            r.seed.col,
            r.pixel_count,
            c.red(),
            c.green(),
            c.blue(),
            r.threshold,
            r.coef_sd
        );
    }
    println!("unclaimed\t{}", seg.unclaimed_count());
    Ok(())
}
