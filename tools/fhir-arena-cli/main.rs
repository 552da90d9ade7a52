use clap::{Parser, ValueEnum};
use fhir_arena::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

/// Define a CLI-specific enum for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum NodeIdsCli {
    Monotonic,
    CollectionLength,
}

/// Headless driver for the FHIR Arena graph editor
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON event script to replay
    script_path: Option<String>,

    /// List the palette instead of replaying a script
    #[arg(long)]
    palette: bool,

    /// Filter the palette listing by id or label
    #[arg(long, requires = "palette")]
    search: Option<String>,

    /// How node ids are numbered
    #[arg(long, value_enum)]
    node_ids: Option<NodeIdsCli>,

    /// Reject connections from a node to itself
    #[arg(long)]
    reject_self_loops: bool,

    /// Validate and log field edits without storing them
    #[arg(long)]
    log_only_fields: bool,

    /// Keep edges whose endpoint node was removed
    #[arg(long)]
    keep_dangling_edges: bool,

    /// Run in interactive mode and type editor commands
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,fhir_arena=info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let editor = build_editor(&cli);

    if cli.palette {
        print_palette(editor.palette(), cli.search.as_deref().unwrap_or(""));
    } else if cli.human {
        run_interactive(editor);
    } else {
        run_non_interactive(cli, editor);
    }
}

fn build_editor(cli: &Cli) -> EditorState {
    let node_ids = match cli.node_ids.unwrap_or(NodeIdsCli::Monotonic) {
        NodeIdsCli::Monotonic => NodeIdStrategy::Monotonic,
        NodeIdsCli::CollectionLength => NodeIdStrategy::CollectionLength,
    };
    let self_loops = if cli.reject_self_loops {
        SelfLoopPolicy::Reject
    } else {
        SelfLoopPolicy::Allow
    };
    let field_edits = if cli.log_only_fields {
        FieldEditMode::LogOnly
    } else {
        FieldEditMode::Persist
    };

    EditorState::builder()
        .node_ids(node_ids)
        .self_loops(self_loops)
        .field_edits(field_edits)
        .prune_dangling_edges(!cli.keep_dangling_edges)
        .build()
}

fn print_palette(palette: &PaletteRegistry, query: &str) {
    println!("{:<20} {:<20} {:<10} category", "id", "label", "color");
    for entry in palette.search(query) {
        println!(
            "{:<20} {:<20} {:<10} {}",
            entry.id, entry.label, entry.color, entry.category
        );
    }
}

/// Replays a script file and prints the resulting graph.
fn run_non_interactive(cli: Cli, mut editor: EditorState) {
    let script_path = cli.script_path.unwrap_or_else(|| {
        exit_with_error("A script path is required unless --palette or -i is given.");
    });

    let load_start = Instant::now();
    let script = EventScript::from_file(&script_path)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let load_duration = load_start.elapsed();

    println!(
        "Replaying {} events from '{}'...",
        script.events.len(),
        script_path
    );
    let replay_start = Instant::now();
    let report = script.replay(&mut editor);
    let replay_duration = replay_start.elapsed();

    println!("\n{}", GraphFormatter::format(&editor));

    if !report.is_clean() {
        println!("--- Failed Events ---");
        for (index, error) in &report.failures {
            println!("  #{}: {}", index, error);
        }
        println!();
    }

    let ignored_drops = report
        .outcomes
        .iter()
        .filter(|o| matches!(o, EventOutcome::Dropped(None)))
        .count();

    println!("--- Replay Summary ---");
    println!("Events:           {}", script.events.len());
    println!("Failed:           {}", report.failures.len());
    println!("Ignored drops:    {}", ignored_drops);
    println!("Script Loading:   {:?}", load_duration);
    println!("Replay:           {:?}", replay_duration);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive(mut editor: EditorState) {
    println!("--- FHIR Arena Interactive Mode ---");
    println!("Commands:");
    println!("  drop <palette-id> <x> <y>      place a palette item");
    println!("  connect <source> <target>      connect two nodes");
    println!("  set <node> <field> [value]     edit a node field (no value clears it)");
    println!("  move <node> <x> <y>            move a node");
    println!("  select <node-or-edge>          select a node or an edge");
    println!("  delete                         delete the selection");
    println!("  palette [query]                list palette items");
    println!("  show                           print the graph");
    println!("  quit");

    if let Err(e) = editor.init(Viewport::identity()) {
        exit_with_error(&e.to_string());
    }

    loop {
        let line = prompt_for_input("command");
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = parts.split_first() else {
            continue;
        };

        match (*command, args) {
            ("quit" | "exit", _) => break,
            ("show", _) => println!("{}", GraphFormatter::format(&editor)),
            ("palette", query) => print_palette(editor.palette(), &query.join(" ")),
            ("drop", [item, x, y]) => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => match editor.handle_drop(&DropEvent::palette_item(item, x, y)) {
                    Some(node) => println!("Created {}", node.id),
                    None => println!("Drop ignored."),
                },
                _ => println!("Coordinates must be numbers."),
            },
            ("connect", [source, target]) => {
                match editor.handle_connect(Connection::new(*source, *target)) {
                    Ok(edge) => println!("Created {}", edge.id),
                    Err(e) => println!("Error: {}", e),
                }
            }
            ("set", [node, field, value @ ..]) => {
                match editor.handle_field_edit(node, field, &value.join(" ")) {
                    Ok(edit) if edit.persisted => println!("Updated."),
                    Ok(_) => println!("Logged (not persisted)."),
                    Err(e) => println!("Error: {}", e),
                }
            }
            ("move", [node, x, y]) => match (x.parse(), y.parse()) {
                (Ok(x), Ok(y)) => {
                    let report = editor.apply_node_changes([NodeChange::Position {
                        id: node.to_string(),
                        position: Some(Position::new(x, y)),
                        dragging: false,
                    }]);
                    if report.applied == 0 {
                        println!("No such node.");
                    }
                }
                _ => println!("Coordinates must be numbers."),
            },
            ("select", [id]) => {
                let id = id.to_string();
                let nodes = editor.apply_node_changes([NodeChange::Select {
                    id: id.clone(),
                    selected: true,
                }]);
                let edges = editor.apply_edge_changes([EdgeChange::Select { id, selected: true }]);
                if nodes.applied + edges.applied == 0 {
                    println!("Nothing to select.");
                }
            }
            ("delete", _) => {
                let report = editor.delete_selected();
                println!(
                    "Deleted {} elements ({} edges pruned).",
                    report.applied,
                    report.pruned_edges.len()
                );
            }
            _ => println!("Unrecognised command: {}", line),
        }
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str) -> String {
    let mut line = String::new();

    print!("> {}: ", prompt_text);
    if io::stdout().flush().is_err() {
        exit_with_error("Failed to flush stdout");
    }

    match io::stdin().read_line(&mut line) {
        Ok(0) => return "quit".to_string(),
        Ok(_) => {}
        Err(e) => exit_with_error(&format!("Failed to read line: {}", e)),
    }
    line.trim().to_string()
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
