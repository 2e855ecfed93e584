use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use shapespotter::pipeline::{Detection, process_image};
use shapespotter::render::{draw_contours_mut, draw_object_boxes_mut};
use shapespotter::{DetectorConfig, Report, TargetColor};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find and classify the largest shapes of a given colour in an image"
)]
struct Args {
    /// Input image path (png/jpg/etc)
    #[arg(short, long)]
    image: PathBuf,

    /// Colour to isolate: red, green or blue
    #[arg(short, long)]
    color: String,

    /// Directory to write the intermediate images to
    /// (masked.png, thresholded.png, result.png)
    #[arg(short, long)]
    debug_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    // Validate the colour before touching the image.
    let color: TargetColor = args.color.parse()?;
    let config = DetectorConfig::default();

    let detection = process_image(&args.image, color, &config)
        .with_context(|| format!("failed to process {}", args.image.display()))?;

    print_report(&detection.report);

    if let Some(dir) = &args.debug_dir {
        save_debug_images(&detection, dir)?;
        info!("debug images written to {}", dir.display());
    }

    Ok(())
}

fn print_report(report: &Report) {
    if report.is_empty() {
        println!("No objects of that color found. Try a different image or a different color.");
        return;
    }

    println!(
        "Found {} object(s), showing {}.",
        report.total_found,
        report.objects.len()
    );

    for (index, object) in report.objects.iter().enumerate() {
        println!("----- OBJECT {} -----", index + 1);
        println!("Shape:         {}", object.shape);
        println!("Perimeter:     {:.2}", object.perimeter);
        println!("Area:          {:.2}", object.area);
        println!("Top-left x:    {}", object.bounds.x);
        println!("Top-left y:    {}", object.bounds.y);
        println!("Center x:      {:.1}", object.center.0);
        println!("Center y:      {:.1}", object.center.1);
        println!("Width:         {}", object.bounds.width);
        println!("Height:        {}", object.bounds.height);
        match object.aspect_ratio {
            Some(ratio) => println!("Aspect ratio:  {:.3}", ratio),
            None => println!("Aspect ratio:  undefined (zero width)"),
        }
    }
}

fn save_debug_images(detection: &Detection, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create debug directory {}", dir.display()))?;

    detection.masked.save(dir.join("masked.png"))?;
    detection.binary.save(dir.join("thresholded.png"))?;

    let mut annotated = detection.masked.clone();
    draw_contours_mut(&mut annotated, &detection.contours);
    draw_object_boxes_mut(&mut annotated, &detection.report.objects);
    annotated.save(dir.join("result.png"))?;

    Ok(())
}
