//! Debug tool to dump the structure of `MediaShout` `.sc7x` scripts.
//!
//! Usage:
//!   `cargo run --bin dump_script -- <file.sc7x>`
//!   `cargo run --bin dump_script -- <file.sc7x> --json`
//!
//! Prints the header, the cue/page/item tree and any records kept only
//! for round-tripping.

// Development/debug binary - allow expect/unwrap for simpler error handling
#![allow(clippy::expect_used, clippy::unwrap_used)]

use mediascript::container::ContainerHeader;
use mediascript::script::id::is_well_formed;
use mediascript::script::{Content, Cue, Page, Script, VisualItem};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <file.sc7x> [--json]", args[0]);
        std::process::exit(1);
    }

    let path = Path::new(&args[1]);
    let bytes = fs_err::read(path).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    let script = mediascript::decode(&bytes).await.unwrap_or_else(|e| {
        eprintln!("Failed to decode {}: {e}", path.display());
        std::process::exit(1);
    });

    if args.iter().any(|a| a == "--json") {
        let document = script.encode().unwrap();
        println!("{}", serde_json::to_string_pretty(&document).unwrap());
        return;
    }

    let header = ContainerHeader::from_bytes(&bytes).unwrap();
    dump_header(path, &header, bytes.len());
    dump_script(&script);
}

fn dump_header(path: &Path, header: &ContainerHeader, total: usize) {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║ MediaShout Script: {}", path.file_name().unwrap().to_string_lossy());
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();
    println!("📦 CONTAINER");
    println!("├─ Magic: {:?}{}", header.magic_lossy(), if header.has_expected_magic() { "" } else { " (unexpected)" });
    println!("├─ Thumbnail: offset {} length {}", header.thumbnail_offset, header.thumbnail_len);
    println!("├─ Archive: offset {} length {}", header.archive_offset, header.archive_len);
    println!("└─ File size: {total} bytes");
    println!();
}

fn dump_script(script: &Script) {
    let props = &script.properties;
    println!("📄 SCRIPT");
    println!("├─ Name: {}", props.name);
    println!("├─ Id: {}{}", script.meta.id, id_note(&script.meta.id));
    println!("├─ Main: {}x{}  Stage: {}x{}", props.main_width, props.main_height, props.stage_width, props.stage_height);
    println!("├─ Created: {}  Updated: {}", script.version_created, script.version_updated);
    println!("├─ Key objects: {} items", script.key_objects_page.items.len());
    println!("├─ Audio playlists: {}", script.audio_player.play_lists.len());
    println!("└─ Cues: {}", script.cue_count());
    println!();

    for (index, cue) in script.cues().iter().enumerate() {
        dump_cue(index, cue, script);
    }
}

fn dump_cue(index: usize, cue: &Cue, script: &Script) {
    let next = script.next_cue(index).map_or("-", |next| next.name.as_str());
    println!("🎵 CUE {index}: {:?} [{:?}] -> {next}", cue.name, cue.kind);
    println!("   ├─ Id: {}{}", cue.meta.id, id_note(&cue.meta.id));
    match &cue.content {
        Content::Empty => {}
        Content::Lyric(stanzas) => {
            for stanza in stanzas {
                println!("   ├─ Stanza {:?}: {} chars", stanza.name, stanza.content.len());
            }
        }
        Content::Bible(bible) => {
            println!("   ├─ Bible: {} ({})", bible.reference, bible.version);
        }
        Content::Preserved(entries) => {
            println!("   ├─ Content: {} preserved entries", entries.len());
        }
    }
    for (label, item) in [
        ("Main background", &cue.main_background_item),
        ("Stage background", &cue.stage_background_item),
        ("Background audio", &cue.background_audio_item),
    ] {
        if let Some(item) = item {
            println!("   ├─ {label}: {}", describe(item));
        }
    }
    for (number, page) in cue.pages.iter().enumerate() {
        dump_page(number, page);
    }
    println!();
}

fn dump_page(number: usize, page: &Page) {
    let props = &page.content.properties;
    println!("   ├─ Page {number}: {:?}{}", props.name, if props.is_skipped { " (skipped)" } else { "" });
    for item in &page.content.items {
        println!("   │  ├─ {}", describe(item));
    }
    for item in &page.stage_page.content.items {
        println!("   │  ├─ stage: {}", describe(item));
    }
}

fn describe(item: &VisualItem) -> String {
    let effects = item.base().map_or(0, |base| base.effects.len());
    match item {
        VisualItem::Unknown(_) => format!("{} (preserved)", item.type_id()),
        _ => format!("{} {:?} ({} effects)", item.type_id(), item.name(), effects),
    }
}

fn id_note(id: &str) -> &'static str {
    if is_well_formed(id) { "" } else { " (non-standard id)" }
}
