//! Load system fonts from an extracted dump directory and write out the
//! decoded TTF files.
//!
//! Usage: `cargo run --example dump_fonts -- <dump-root> [out-dir]`

use sysfont_storage::{DirectorySource, FontKind, FontStore};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let mut args = std::env::args().skip(1);
    let root = args.next().ok_or("missing dump root argument")?;
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "fonts".into()));

    let source = DirectorySource::new(root);
    let store = FontStore::new();
    let count = store.load(&source)?;
    println!("loaded {count} fonts");

    std::fs::create_dir_all(&out_dir)?;
    for kind in FontKind::ALL {
        let Some(font) = store.font(kind) else {
            println!("{kind}: unavailable");
            continue;
        };
        let path = out_dir.join(format!("{kind}.ttf"));
        std::fs::write(&path, font.bytes())?;
        println!("{kind}: {} bytes -> {}", font.len(), path.display());
    }

    Ok(())
}
