//! favicache - favicon cache command line
//!
//! Drives the cache against a directory on disk, mostly for inspection.

use std::env;
use std::path::{Path, PathBuf};

use favicache::favicon::render_default_icon;
use favicache::search;
use favicache::{Bitmap, BitmapFormat, FaviconCache, FaviconConfig, LookupOutcome, NAME, VERSION};
use serde_json::json;

const USAGE: &str = "usage:
  favicache [--cache-dir DIR] lookup <url> [title] [out.png|out.bmp]
  favicache [--cache-dir DIR] store <image-file> <url>
  favicache default <title> <out.png|out.bmp>
  favicache engines";

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let cache_dir = take_cache_dir(&mut args);

    if let Err(e) = run(&args, cache_dir).await {
        eprintln!("{}: {}", NAME, e);
        eprintln!("{}", USAGE);
        std::process::exit(1);
    }
}

/// Pull `--cache-dir DIR` out of the argument list, falling back to `FAVICACHE_DIR`
fn take_cache_dir(args: &mut Vec<String>) -> Option<PathBuf> {
    if let Some(pos) = args.iter().position(|a| a == "--cache-dir") {
        args.remove(pos);
        if pos < args.len() {
            return Some(PathBuf::from(args.remove(pos)));
        }
    }
    env::var_os("FAVICACHE_DIR").map(PathBuf::from)
}

async fn run(args: &[String], cache_dir: Option<PathBuf>) -> favicache::Result<()> {
    let config = match cache_dir {
        Some(dir) => FaviconConfig::new(dir),
        None => FaviconConfig::default(),
    };
    log::debug!("{} v{} using {}", NAME, VERSION, config.cache_dir.display());

    let arg = move |i: usize| args.get(i).map(String::as_str);
    match arg(0) {
        Some("lookup") => {
            let url = arg(1).ok_or_else(|| missing("url"))?;
            let cache = FaviconCache::new(config);
            let outcome = cache.lookup(url, arg(2)).await;
            let source = match &outcome {
                LookupOutcome::Found { tier, .. } => format!("{:?}", tier).to_lowercase(),
                LookupOutcome::Defaulted(_) => "default".to_string(),
            };
            if let Some(out) = arg(3) {
                let format = BitmapFormat::from_path(Path::new(out));
                std::fs::write(out, outcome.bitmap().encode(format)?)?;
            }
            let bitmap = outcome.bitmap();
            println!(
                "{}",
                json!({
                    "url": url,
                    "source": source,
                    "width": bitmap.width(),
                    "height": bitmap.height(),
                    "disk_path": cache.disk_path_for(url),
                })
            );
        }
        Some("store") => {
            let file = arg(1).ok_or_else(|| missing("image-file"))?;
            let url = arg(2).ok_or_else(|| missing("url"))?;
            let bitmap = Bitmap::decode(&std::fs::read(file)?)?;
            let cache = FaviconCache::new(config);
            let outcome = cache.store(bitmap, url).await;
            println!(
                "{}",
                json!({ "url": url, "outcome": format!("{:?}", outcome) })
            );
        }
        Some("default") => {
            let title = arg(1).ok_or_else(|| missing("title"))?;
            let out = arg(2).ok_or_else(|| missing("out.png"))?;
            let icon = render_default_icon(Some(title), config.icon_size);
            let format = BitmapFormat::from_path(Path::new(out));
            std::fs::write(out, icon.bitmap.encode(format)?)?;
            println!(
                "{}",
                json!({ "letter": icon.letter.to_string(), "color": icon.color, "path": out })
            );
        }
        Some("engines") => {
            for engine in search::ALL.iter() {
                println!(
                    "{}",
                    json!({
                        "title": engine.title,
                        "query_url": engine.query_url,
                        "icon": engine.icon_path,
                    })
                );
            }
        }
        _ => println!("{} v{}\n{}", NAME, VERSION, USAGE),
    }
    Ok(())
}

fn missing(what: &str) -> favicache::FavicacheError {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("missing <{}>", what)).into()
}
