use std::sync::Arc;

use colored::Colorize;
use zoetrope::{decode_file, DecodeResult, LoopCount, Playback, TickOutcome};

fn main() -> DecodeResult<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        print_usage();
        std::process::exit(1);
    }

    let command = &args[1];
    let input = &args[2];

    match command.as_str() {
        "info" => {
            show_info(input)?;
        }
        "frames" => {
            show_frames(input)?;
        }
        "play" => {
            let fps = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(60.0);
            simulate(input, fps)?;
        }
        _ => {
            eprintln!("{} Unknown command: {}", "Error:".red().bold(), command);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn loop_count_label(loop_count: LoopCount) -> String {
    match loop_count {
        LoopCount::Infinite => "forever".to_string(),
        LoopCount::Finite(n) => format!("{} time(s)", n),
    }
}

fn show_info(input: &str) -> DecodeResult<()> {
    let file_size = std::fs::metadata(input)?.len();
    let image = decode_file(input)?;

    println!();
    println!("{}", "═══ Animation Information ═══".cyan().bold());
    println!("{} {}", "File:      ".dimmed(), input.yellow());
    println!(
        "{} {} bytes",
        "Size:      ".dimmed(),
        file_size.to_string().white()
    );
    let (width, height) = image.poster_image().dimensions();
    println!(
        "{} {}x{}",
        "Dimensions:".dimmed(),
        width.to_string().white(),
        height.to_string().white()
    );
    println!(
        "{} {}",
        "Frames:    ".dimmed(),
        image.frame_count().to_string().white()
    );
    println!(
        "{} {}",
        "Loops:     ".dimmed(),
        loop_count_label(image.loop_count()).cyan()
    );
    println!(
        "{} {:.3}s",
        "Cycle:     ".dimmed(),
        image.total_duration()
    );
    println!(
        "{} {}",
        "Animated:  ".dimmed(),
        if image.is_animated() {
            "Yes".green()
        } else {
            "No".red()
        }
    );
    println!();

    Ok(())
}

fn show_frames(input: &str) -> DecodeResult<()> {
    let image = decode_file(input)?;

    println!();
    println!("{}", "═══ Frame Table ═══".cyan().bold());
    println!(
        "{:>6} {:>10} {:>12}",
        "Frame".white().bold(),
        "Delay".white().bold(),
        "Size".white().bold()
    );
    println!("{}", "─".repeat(30).dimmed());

    for (index, frame) in image.frames().iter().enumerate() {
        let (width, height) = frame.image().dimensions();
        println!(
            "{:>6} {:>9}s {:>12}",
            index.to_string().cyan(),
            format!("{:.3}", frame.delay()).white(),
            format!("{}x{}", width, height).dimmed()
        );
    }

    println!();
    println!(
        "{} {:.3}s played {}",
        "Total:".dimmed(),
        image.total_duration(),
        loop_count_label(image.loop_count()).cyan()
    );
    println!();

    Ok(())
}

/// Run the scheduler offline at a fixed refresh rate and print every frame
/// advance. Infinite animations are capped at two full cycles.
fn simulate(input: &str, fps: f64) -> DecodeResult<()> {
    let image = Arc::new(decode_file(input)?);
    let step = 1.0 / fps.max(1.0);

    let simulated = match image.loop_count() {
        LoopCount::Finite(n) => image.total_duration() * f64::from(n.max(1)),
        LoopCount::Infinite => image.total_duration() * 2.0,
    };
    let max_ticks = (simulated / step).ceil() as u64 + 2;

    println!();
    println!("{}", "═══ Playback Simulation ═══".cyan().bold());
    println!(
        "{} {} frames at {:.0} Hz refresh",
        "Driving:".dimmed(),
        image.frame_count().to_string().white(),
        fps
    );
    println!();

    let mut playback = Playback::new(Arc::clone(&image));
    let mut clock = 0.0;

    for _ in 0..max_ticks {
        clock += step;
        let (finished, changed) = match playback.tick(step) {
            TickOutcome::Finished => (true, false),
            TickOutcome::Advanced { frame_changed, .. } => (false, frame_changed),
        };

        if finished {
            println!(
                "{:>8.3}s {}",
                clock,
                "animation finished".green().bold()
            );
            break;
        }
        if changed {
            println!(
                "{:>8.3}s {} frame {}",
                clock,
                "→".dimmed(),
                playback.current_frame_index().to_string().cyan()
            );
        }
    }

    if !playback.is_finished() {
        println!(
            "{:>8.3}s {}",
            clock,
            "still looping, simulation stopped".yellow()
        );
    }
    println!();

    Ok(())
}

fn print_usage() {
    println!();
    println!(
        "{} {}",
        "Zoetrope GIF Player".cyan().bold(),
        format!("v{}", zoetrope::VERSION).green()
    );
    println!();
    println!("{}", "USAGE:".yellow().bold());
    println!("  {} {} <input.gif>", "zoetrope".white(), "info".green());
    println!("  {} {} <input.gif>", "zoetrope".white(), "frames".green());
    println!(
        "  {} {} <input.gif> [fps]",
        "zoetrope".white(),
        "play".green()
    );
    println!();
    println!("{}", "EXAMPLES:".yellow().bold());
    println!("  {} banner.gif", "zoetrope info".cyan());
    println!("  {} banner.gif 30", "zoetrope play".cyan());
    println!();
}
