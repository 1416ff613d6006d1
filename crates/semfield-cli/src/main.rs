//! Semantic field definition converter.
//!
//! Two actions:
//! - `read`: field definitions in RDF (SPARQL store or TriG files) → YAML
//!   source file
//! - `write`: YAML source (file or fragment directory) → field definitions
//!   in one of the output flavors, combined or one file per field

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use semfield_graph::{
    read_fields, EndpointConfig, MemoryStore, Namespaces, Platform, SparqlEndpoint,
};
use semfield_model::source::{load_path, write_file};
use semfield_render::{Flavor, Renderer};

#[derive(Parser)]
#[command(name = "semfield")]
#[command(
    author,
    version,
    about = "Convert ResearchSpace/Metaphacts semantic field definitions between YAML and RDF"
)]
struct Cli {
    /// Log level.
    #[arg(
        short = 'l',
        long = "log",
        value_enum,
        value_name = "LEVEL",
        default_value_t = LogLevel::Info,
        global = true
    )]
    log: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum LogLevel {
    Info,
    Debug,
    Error,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Read field definitions from RDF (SPARQL store or TriG files) and
    /// write the YAML source file.
    Read(ReadArgs),

    /// Read the YAML source and write field definitions in an output
    /// flavor.
    Write(WriteArgs),
}

#[derive(Args)]
struct ReadArgs {
    /// Output YAML file.
    #[arg(short = 'y', long = "yaml", value_name = "FILE")]
    yaml: PathBuf,

    /// TriG file, or directory containing *.trig files, to read.
    #[arg(short = 't', long = "trig", value_name = "PATH")]
    trig: Option<PathBuf>,

    /// SPARQL endpoint URI, e.g. http://localhost:8081/sparql.
    #[arg(short = 'u', long = "sparql-uri", value_name = "URI")]
    sparql_uri: Option<String>,

    /// SPARQL repository parameter (empty for none).
    #[arg(long = "sparql-repository", value_name = "NAME", default_value = "assets")]
    sparql_repository: String,

    /// SPARQL basic auth username (empty for no auth).
    #[arg(long = "sparql-auth-user", value_name = "USER", default_value = "admin")]
    sparql_user: String,

    /// SPARQL basic auth password.
    #[arg(
        long = "sparql-auth-password",
        value_name = "PASSWORD",
        default_value = "admin"
    )]
    sparql_password: String,

    /// RDF flavor to read: RS or MP.
    #[arg(short = 'f', long = "flavor", value_name = "FLAVOR", default_value = "RS")]
    flavor: String,

    /// URL prefix stripped from field ids and recorded once at the
    /// collection level.
    #[arg(long = "field-id-prefix", value_name = "PREFIX")]
    field_id_prefix: Option<String>,
}

#[derive(Args)]
struct WriteArgs {
    /// YAML source file, or a directory of fragment files to merge.
    #[arg(short = 'y', long = "yaml", value_name = "PATH")]
    yaml: PathBuf,

    /// Output file, or output directory with --split-fields.
    #[arg(short = 't', long = "trig", value_name = "PATH")]
    trig: PathBuf,

    /// Output flavor: RS, MP, UNI, JSON or INLINE.
    #[arg(short = 'f', long = "flavor", value_name = "FLAVOR", default_value = "RS")]
    flavor: String,

    /// Write one output file per field (output path must be a directory;
    /// file names are the quoted field ids).
    #[arg(long = "split-fields")]
    split_fields: bool,

    /// URL prefix for field ids, overriding the source document's own
    /// prefix.
    #[arg(long = "field-id-prefix", value_name = "PREFIX")]
    field_id_prefix: Option<String>,

    /// Extra namespace declaration for the TriG header, e.g.
    /// "crm: <http://www.cidoc-crm.org/cidoc-crm/>".
    #[arg(long = "extra-ns", value_name = "DECL")]
    extra_ns: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log);

    match cli.command {
        Commands::Read(args) => cmd_read(&args),
        Commands::Write(args) => cmd_write(&args),
    }
}

fn init_logging(level: LogLevel) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_read(args: &ReadArgs) -> Result<()> {
    let platform = match args.flavor.as_str() {
        "RS" => Platform::ResearchSpace,
        "MP" => Platform::Metaphacts,
        other => bail!("read does not support flavor {other} (use RS or MP)"),
    };
    let ns = Namespaces::for_platform(platform);
    let prefix = args.field_id_prefix.as_deref();

    let fields = if let Some(uri) = &args.sparql_uri {
        tracing::info!(endpoint = %uri, "reading field definitions from SPARQL store");
        let endpoint = SparqlEndpoint::new(EndpointConfig {
            uri: uri.clone(),
            repository: non_empty(&args.sparql_repository),
            user: non_empty(&args.sparql_user),
            password: non_empty(&args.sparql_password),
        })?;
        read_fields(&endpoint, &ns, prefix)?
    } else if let Some(trig) = &args.trig {
        tracing::info!(source = %trig.display(), "reading field definitions from TriG");
        let store = MemoryStore::open(trig)?;
        read_fields(&store, &ns, prefix)?
    } else {
        bail!("read requires --sparql-uri or --trig");
    };

    write_file(&args.yaml, &fields, prefix)
        .with_context(|| format!("writing {}", args.yaml.display()))?;
    println!(
        "{} {} fields to {}",
        "wrote".green().bold(),
        fields.len(),
        args.yaml.display().to_string().bold()
    );
    Ok(())
}

fn cmd_write(args: &WriteArgs) -> Result<()> {
    let Some(flavor) = Flavor::from_code(&args.flavor) else {
        bail!(
            "unknown flavor {} (use RS, MP, UNI, JSON or INLINE)",
            args.flavor
        );
    };

    tracing::info!(source = %args.yaml.display(), "reading field definitions from YAML");
    let mut doc =
        load_path(&args.yaml).with_context(|| format!("loading {}", args.yaml.display()))?;
    if let Some(prefix) = &args.field_id_prefix {
        doc.prefix = Some(prefix.clone());
    }

    let renderer = Renderer::new()?;
    if args.split_fields {
        if !args.trig.is_dir() {
            bail!(
                "--split-fields requires {} to be a directory",
                args.trig.display()
            );
        }
        let outputs = renderer.render_split(&doc, flavor, args.extra_ns.as_deref())?;
        let count = outputs.len();
        for (field_id, text) in outputs {
            let path = args.trig.join(quoted_file_name(&field_id, flavor.file_extension()));
            fs::write(&path, text).with_context(|| format!("writing {}", path.display()))?;
            tracing::debug!(file = %path.display(), "wrote field definition");
        }
        println!(
            "{} {} {} files to {}",
            "wrote".green().bold(),
            count,
            flavor.code(),
            args.trig.display().to_string().bold()
        );
    } else {
        let text = renderer.render(&doc, flavor, args.extra_ns.as_deref())?;
        fs::write(&args.trig, text).with_context(|| format!("writing {}", args.trig.display()))?;
        println!(
            "{} {} definitions to {}",
            "wrote".green().bold(),
            flavor.code(),
            args.trig.display().to_string().bold()
        );
    }
    Ok(())
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Quote set for split-mode file names: everything but alphanumerics and
/// `-_.~` is percent-encoded; spaces come out as `+`.
const FILE_NAME_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

fn quoted_file_name(field_id: &str, extension: &str) -> String {
    let quoted = utf8_percent_encode(field_id, FILE_NAME_SET).to_string();
    format!("{}.{}", quoted.replace("%20", "+"), extension)
}
