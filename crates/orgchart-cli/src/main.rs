use orgchart::{
    ChartOptions, DeterministicTextMeasurer, LineType, OrgTree, PersonNode, SvgSnapshotOptions,
    layout_chart, render_chart_svg,
};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Chart(orgchart::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Chart(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<orgchart::Error> for CliError {
    fn from(value: orgchart::Error) -> Self {
        Self::Chart(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Layout,
    Render,
    Validate,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    line_type: Option<LineType>,
    node_width: Option<f64>,
    node_height: Option<f64>,
    expand_all: bool,
    expand_depth: Option<usize>,
    pretty: bool,
}

const USAGE: &str = "usage: orgchart <layout|render|validate> [input.json|-] \
[--line-type straight|angle] [--node-width N] [--node-height N] \
[--expand-all | --expand-depth N] [--pretty] [-o FILE]";

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();
    let mut it = argv.iter();

    let Some(command) = it.next() else {
        return Err(CliError::Usage(USAGE));
    };
    args.command = match command.as_str() {
        "layout" => Command::Layout,
        "render" => Command::Render,
        "validate" => Command::Validate,
        _ => return Err(CliError::Usage(USAGE)),
    };

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--line-type" => {
                args.line_type = match it.next().map(String::as_str) {
                    Some("straight") => Some(LineType::Straight),
                    Some("angle") => Some(LineType::Angle),
                    _ => return Err(CliError::Usage("--line-type takes straight or angle")),
                };
            }
            "--node-width" => {
                let value = it
                    .next()
                    .and_then(|v| v.parse::<f64>().ok())
                    .ok_or(CliError::Usage("--node-width takes a number"))?;
                args.node_width = Some(value);
            }
            "--node-height" => {
                let value = it
                    .next()
                    .and_then(|v| v.parse::<f64>().ok())
                    .ok_or(CliError::Usage("--node-height takes a number"))?;
                args.node_height = Some(value);
            }
            "--expand-all" => args.expand_all = true,
            "--expand-depth" => {
                let value = it
                    .next()
                    .and_then(|v| v.parse::<usize>().ok())
                    .ok_or(CliError::Usage("--expand-depth takes a depth"))?;
                args.expand_depth = Some(value);
            }
            "--pretty" => args.pretty = true,
            "-o" | "--output" => {
                let value = it.next().ok_or(CliError::Usage("-o takes a file path"))?;
                args.output = Some(PathBuf::from(value));
            }
            "-" => args.input = None,
            other if !other.starts_with('-') && args.input.is_none() => {
                args.input = Some(PathBuf::from(other));
            }
            _ => return Err(CliError::Usage(USAGE)),
        }
    }
    Ok(args)
}

fn read_input(input: Option<&PathBuf>) -> Result<String, CliError> {
    match input {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn write_output(output: Option<&PathBuf>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn build_tree(args: &Args, text: &str) -> Result<OrgTree, CliError> {
    let data: PersonNode = serde_json::from_str(text)?;
    let mut tree = OrgTree::from_node(data)?;
    if args.expand_all {
        tree.expand_all();
    } else if let Some(depth) = args.expand_depth {
        tree.expand_all();
        tree.collapse_below(depth);
    } else {
        // Same initial state as an interactive chart: root expanded, every
        // deeper level collapsed.
        tree.collapse_all_below_root();
    }
    Ok(tree)
}

fn run() -> Result<(), CliError> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv)?;
    let text = read_input(args.input.as_ref())?;

    if args.command == Command::Validate {
        let data: PersonNode = serde_json::from_str(&text)?;
        let tree = OrgTree::from_node(data)?;
        println!("ok: {} nodes", tree.visible_count());
        return Ok(());
    }

    let config = ChartOptions {
        id: Some("#orgchart".to_string()),
        line_type: args.line_type,
        node_width: args.node_width,
        node_height: args.node_height,
        ..Default::default()
    }
    .resolve()?;

    let mut tree = build_tree(&args, &text)?;
    let layout = layout_chart(&mut tree, &config);

    match args.command {
        Command::Layout => {
            let json = if args.pretty {
                serde_json::to_string_pretty(&layout)?
            } else {
                serde_json::to_string(&layout)?
            };
            write_output(args.output.as_ref(), &format!("{json}\n"))?;
        }
        Command::Render => {
            let measurer = DeterministicTextMeasurer::default();
            let svg = render_chart_svg(
                &tree,
                &layout,
                &config,
                &measurer,
                &SvgSnapshotOptions::default(),
            );
            write_output(args.output.as_ref(), &svg)?;
        }
        Command::Validate => unreachable!("handled above"),
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("orgchart: {err}");
        std::process::exit(2);
    }
}
