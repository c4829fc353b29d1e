use clap::Parser;

use conlog::{Logger, Severity};

/// Walks the logger through every severity and console operation.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Console window title
    #[arg(short, long, default_value = "conlog showcase")]
    title: String,

    /// Prefix every line with the time of day
    #[arg(short = 's', long)]
    timestamp: bool,

    /// Clear the console before writing
    #[arg(short, long)]
    clear: bool,

    /// Hide the cursor while writing
    #[arg(long)]
    hide_cursor: bool,
}

fn main() {
    let args = Args::parse();

    let mut logger = Logger::new(Some(&args.title));
    if args.timestamp {
        logger.toggle_timestamp();
    }
    if args.clear {
        logger.clear();
    }
    if args.hide_cursor {
        logger.show_cursor(false);
    }

    logger.report(Severity::INFO, format_args!("starting up\n"));
    logger.report(Severity::SUCCESS, format_args!("console attached\n"));
    logger.report(Severity::WARN, format_args!("voltage sag detected\n"));
    logger.report(Severity::ERROR, format_args!("link lost\n"));
    logger.log_with_title(
        Severity::Yellow,
        "status",
        format_args!("{} of {} retries left\n", 2, 3),
    );
    logger.log_with(Severity::LightBlue, format_args!("whole line in color\n"));
    logger.log(format_args!("plain line, default color\n"));

    if args.hide_cursor {
        logger.show_cursor(true);
    }
    logger.destroy();
}
