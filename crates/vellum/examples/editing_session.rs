//! Scripted editing session walkthrough.
//!
//! Drives the full command surface without opening a window:
//! - typing and style toggles with undo coalescing
//! - clipboard editing through the in-memory clipboard
//! - find and replace across the document
//! - saving, reloading, and the status line
//! - view construction and word-wrap measurement
//!
//! Run with: cargo run -p vellum --example editing_session

use vellum::{
    EditorSession, FindOptions, MemoryClipboard, PerfSpan, TreeFormatOptions, ViewFactory,
    ViewTreeDebug,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut session = EditorSession::new();
    session
        .title_changed
        .connect(|title| println!("[title] {title}"));
    session
        .exit_requested
        .connect(|()| println!("[exit] host would close its window here"));

    println!("=== Typing and styles ===");
    session.insert_text("The quick brown fox\n");
    session.toggle_bold();
    session.insert_text("jumps");
    session.toggle_bold();
    session.insert_text(" over the lazy dog");
    println!("{}", session.text());
    println!("status: {}", session.status());

    println!("\n=== Undo coalescing ===");
    // runs of matching style coalesce, so the plain tail typed after the
    // bold word comes off in one step
    session.undo();
    println!("after undo: {:?}", session.text());
    session.redo();
    println!("after redo: {:?}", session.text());

    println!("\n=== Clipboard ===");
    let mut clipboard = MemoryClipboard::new();
    session.set_selection(4, 9)?;
    println!("cutting {:?}", session.selected_text());
    session.cut(&mut clipboard);
    session.set_caret(0)?;
    session.paste(&mut clipboard);
    println!("{}", session.text());
    session.undo();
    session.undo();
    println!("restored: {:?}", session.text());

    println!("\n=== Find and replace ===");
    if session.find("fox") {
        println!("found {:?}", session.selected_text());
    }
    session.set_find_options(FindOptions::new().with_case_sensitive(false));
    let replaced = {
        let _span = PerfSpan::new("replace_all");
        session.replace_all("the", "a")
    };
    println!("replaced {replaced}: {}", session.text());
    session.undo();
    println!("undone: {}", session.text());

    println!("\n=== Files ===");
    let path = std::env::temp_dir().join("vellum_demo.txt");
    session.save_as(&path)?;
    session.new_document();
    session.open(&path)?;
    println!("reloaded {} characters", session.status().characters);
    std::fs::remove_file(&path)?;

    println!("\n=== View tree ===");
    session.set_selection(20, 25)?;
    session.toggle_bold();
    let tree = ViewFactory::new().build(session.document());
    print!("{}", ViewTreeDebug::with_options(TreeFormatOptions::detailed()).format_view(&tree));
    for width in [12, 20, 40] {
        println!("height at {width} columns: {}", tree.height_for_width(width));
    }

    session.request_exit();
    Ok(())
}
