use std::env;
use std::path::Path;
use std::process::ExitCode;

use storyline::default_sources;
use storyline_render::{MemoryPage, TimelinePage};
use storyline_render_web::page_html;

const DEFAULT_OUT_PATH: &str = "target/web-preview/index.html";
const DEFAULT_TITLE: &str = "Timeline";

#[derive(Clone, Debug)]
struct Args {
    data: String,
    embedded: Option<String>,
    out: String,
    title: String,
}

fn help_text() -> String {
    format!(
        "web-preview -- render a timeline data file to a static HTML page

USAGE:
    web-preview [--data <path-or-url>] [--embedded <path>] [--out <path>] [--title <text>]

OPTIONS:
    --data <path-or-url>   Resource for the source chain (default: {})
    --embedded <path>      JSON file treated as the embedded page payload
    --out <path>           Output HTML path (default: {})
    --title <text>         Fallback page title (default: {})
    --help                 Show this help
",
        storyline::DATA_FILE,
        DEFAULT_OUT_PATH,
        DEFAULT_TITLE
    )
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print!("{}", help_text());
        return ExitCode::SUCCESS;
    }
    match parse_args(args).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<Args, String> {
    let mut parsed = Args {
        data: storyline::DATA_FILE.to_string(),
        embedded: None,
        out: DEFAULT_OUT_PATH.to_string(),
        title: DEFAULT_TITLE.to_string(),
    };

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--data" => {
                parsed.data = flag_value(&args, i, "--data")?;
                i += 2;
            }
            "--embedded" => {
                parsed.embedded = Some(flag_value(&args, i, "--embedded")?);
                i += 2;
            }
            "--out" => {
                parsed.out = flag_value(&args, i, "--out")?;
                i += 2;
            }
            "--title" => {
                parsed.title = flag_value(&args, i, "--title")?;
                i += 2;
            }
            other => {
                return Err(format!("unknown argument '{}'", other));
            }
        }
    }

    if parsed.out.is_empty() {
        return Err("--out must not be empty".to_string());
    }
    Ok(parsed)
}

fn flag_value(args: &[String], i: usize, flag: &str) -> Result<String, String> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| format!("{} requires a value", flag))
}

fn run(cli: Args) -> Result<(), String> {
    let embedded = match &cli.embedded {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {}: {}", path, e))?,
        ),
        None => None,
    };
    let sources = default_sources(embedded, &cli.data);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| e.to_string())?;
    let mut timeline = runtime.block_on(TimelinePage::load(&sources));

    // Static output cannot scroll; take the reveal-all fallback path.
    let mut page = MemoryPage::new().without_intersection();
    timeline.present(&mut page);

    if let Some(parent) = Path::new(&cli.out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
    }
    let html = page_html(&page, &cli.title);
    std::fs::write(&cli.out, html).map_err(|e| format!("failed to write {}: {}", cli.out, e))?;

    match timeline.error() {
        Some(message) => println!("wrote error page to {} ({})", cli.out, message),
        None => println!(
            "wrote {} ({} chapters)",
            cli.out,
            timeline.chapters().len()
        ),
    }
    Ok(())
}
