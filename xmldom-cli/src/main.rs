//! xdom: parse a markup file and query or print its document tree.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xmldom::{parse, to_xml, Document, NodeList, ParseOptions};

/// Parse markup into a document tree and inspect it
#[derive(Parser)]
#[command(name = "xdom")]
#[command(version)]
#[command(about = "Parse markup into a document tree and inspect it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (default: stdin)
    input: Option<String>,

    /// Parse as HTML: void elements auto-close, HTML entities resolve
    #[arg(long)]
    html: bool,

    /// Do not check end tag names or reject unknown entities
    #[arg(long)]
    lenient: bool,

    /// Log every token consumed while building the tree
    #[arg(long)]
    debug: bool,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the document as markup
    #[command(visible_alias = "x")]
    Xml {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the text content of the document
    #[command(visible_alias = "t")]
    Text {
        #[command(flatten)]
        input: InputArgs,

        /// Escape markup characters and non-ASCII code points
        #[arg(short, long)]
        escape: bool,
    },

    /// Print the first element whose id attribute matches
    #[command(visible_alias = "id")]
    FindId {
        /// Id to look for
        id: String,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Print every element with the given tag name, one per line
    Tags {
        /// Tag name to collect
        tag: String,

        #[command(flatten)]
        input: InputArgs,

        /// Print only the number of matches
        #[arg(short, long)]
        count: bool,
    },
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Xml { input } => run_xml(&input),
        Commands::Text { input, escape } => run_text(&input, escape),
        Commands::FindId { id, input } => run_find_id(&input, &id),
        Commands::Tags { tag, input, count } => run_tags(&input, &tag, count),
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl InputArgs {
    fn options(&self) -> ParseOptions {
        let mut options = if self.html {
            ParseOptions::html()
        } else {
            ParseOptions::xml()
        };
        if self.lenient {
            options.strict = false;
        }
        options.with_debug(self.debug)
    }

    fn load(&self) -> Result<Document, Box<dyn std::error::Error>> {
        let options = self.options();
        let doc = match &self.input {
            Some(path) => {
                tracing::info!(path = %path, "parsing file");
                parse(BufReader::new(File::open(path)?), &options)?
            }
            None => parse(io::stdin().lock(), &options)?,
        };
        Ok(doc)
    }

    fn writer(&self) -> io::Result<Box<dyn Write>> {
        Ok(match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout()),
        })
    }
}

/// Prints the whole document as markup.
fn run_xml(input: &InputArgs) -> Result<(), Box<dyn std::error::Error>> {
    let doc = input.load()?;
    let mut output = input.writer()?;
    writeln!(output, "{}", doc.to_xml())?;
    output.flush()?;
    Ok(())
}

/// Prints the concatenated text of the document.
fn run_text(input: &InputArgs, escape: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = input.load()?;
    let mut output = input.writer()?;
    writeln!(output, "{}", doc.to_text(escape))?;
    output.flush()?;
    Ok(())
}

/// Prints the element with the given id.
fn run_find_id(input: &InputArgs, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let doc = input.load()?;
    let element = doc
        .get_element_by_id(id)
        .ok_or_else(|| format!("no element with id '{}'", id))?;
    let mut output = input.writer()?;
    writeln!(output, "{}", to_xml(&element))?;
    output.flush()?;
    Ok(())
}

/// Prints the elements with the given tag name.
fn run_tags(input: &InputArgs, tag: &str, count: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = input.load()?;
    let matches = doc.get_elements_by_tag_name(tag);
    let mut output = input.writer()?;
    if count {
        writeln!(output, "{}", matches.length())?;
    } else {
        for element in matches.iter() {
            writeln!(output, "{}", to_xml(&element))?;
        }
    }
    tracing::info!(tag = %tag, count = matches.length(), "collected elements");
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("xdom-{}-{}", std::process::id(), name))
    }

    fn input_args(input: &PathBuf, output: &PathBuf) -> InputArgs {
        InputArgs {
            input: Some(input.to_string_lossy().into_owned()),
            html: false,
            lenient: false,
            debug: false,
            output: Some(output.to_string_lossy().into_owned()),
        }
    }

    #[test]
    fn test_run_tags_writes_matches_to_output() {
        let input = temp_path("tags-in.xml");
        let output = temp_path("tags-out.txt");
        fs::write(&input, "<r><i>a</i><x><i>b</i></x></r>").unwrap();

        let args = input_args(&input, &output);
        run_tags(&args, "i", false).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "<i>a</i>\n<i>b</i>\n");

        run_tags(&args, "i", true).unwrap();
        assert_eq!(fs::read_to_string(&output).unwrap(), "2\n");

        fs::remove_file(&input).ok();
        fs::remove_file(&output).ok();
    }

    #[test]
    fn test_truncated_input_is_reported() {
        let input = temp_path("truncated-in.xml");
        let output = temp_path("truncated-out.txt");
        fs::write(&input, "<r><i>").unwrap();

        assert!(run_xml(&input_args(&input, &output)).is_err());

        fs::remove_file(&input).ok();
        fs::remove_file(&output).ok();
    }

    #[test]
    fn test_options_from_flags() {
        let path = PathBuf::from("unused");
        let mut args = input_args(&path, &path);
        assert!(args.options().strict);

        args.html = true;
        let options = args.options();
        assert!(!options.strict);
        assert!(options.auto_close.iter().any(|name| name == "br"));

        args.html = false;
        args.lenient = true;
        args.debug = true;
        let options = args.options();
        assert!(!options.strict);
        assert!(options.auto_close.is_empty());
        assert!(options.debug);
    }
}
