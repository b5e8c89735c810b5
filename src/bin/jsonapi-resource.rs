//! JSON:API Resource CLI
//!
//! Command-line interface for serializing a JSON source object into a
//! JSON:API resource object.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use jsonapi_resource::{
    to_string, to_string_pretty, AttributeOptions, RelationOptions, SchemaBuilder,
    SerializerSchema,
};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "jsonapi-resource")]
#[command(about = "Serialize JSON objects into JSON:API resource objects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serialize one source object with a schema declared by flags
    Serialize {
        /// Source object: JSON file path, or - for stdin
        source: String,

        /// Serializer name; the default type tag is derived from it
        #[arg(long, default_value = "ResourceSerializer")]
        name: String,

        /// Resource type tag (overrides the one derived from --name)
        #[arg(long = "type")]
        type_tag: Option<String>,

        /// Property holding the resource id
        #[arg(long)]
        id_field: Option<String>,

        /// Attribute to include, as NAME or NAME:KEY
        #[arg(long = "attribute", short = 'a')]
        attributes: Vec<String>,

        /// Relation to include, as NAME:TO:TYPE or NAME:TO:TYPE:KEY (TO is one or many)
        #[arg(long = "relation", short = 'r')]
        relations: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

struct SerializeArgs {
    source: String,
    name: String,
    type_tag: Option<String>,
    id_field: Option<String>,
    attributes: Vec<String>,
    relations: Vec<String>,
    output: Option<PathBuf>,
    pretty: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serialize {
            source,
            name,
            type_tag,
            id_field,
            attributes,
            relations,
            output,
            pretty,
        } => run_serialize(SerializeArgs {
            source,
            name,
            type_tag,
            id_field,
            attributes,
            relations,
            output,
            pretty,
        }),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn run_serialize(args: SerializeArgs) -> Result<(), u8> {
    let schema = declare_schema(&args)?;

    let source = if args.source == "-" {
        load_source_stdin()?
    } else {
        load_source(Path::new(&args.source))?
    };

    if !source.is_object() {
        eprintln!(
            "Error: source must be a JSON object, got {}",
            jsonapi_resource::json_type_name(&source)
        );
        return Err(2);
    }

    let document = schema.serialize(&source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let json_output = if args.pretty {
        to_string_pretty(&document)
    } else {
        to_string(&document)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        e.exit_code() as u8
    })?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

/// Build the schema from the command-line declarations, in flag order.
fn declare_schema(args: &SerializeArgs) -> Result<SerializerSchema, u8> {
    let mut builder = SchemaBuilder::<Value>::new(args.name.as_str());

    if let Some(tag) = &args.type_tag {
        builder = builder.type_tag(tag.as_str());
    }
    if let Some(field) = &args.id_field {
        builder = builder.id_field(field.as_str());
    }

    for spec in &args.attributes {
        let (name, options) = match spec.split_once(':') {
            Some((name, key)) => (name, AttributeOptions::new().key(key)),
            None => (spec.as_str(), AttributeOptions::new()),
        };
        builder = builder
            .attribute_with(name, options)
            .map_err(report_declare_error)?;
    }

    for spec in &args.relations {
        let parts: Vec<&str> = spec.splitn(4, ':').collect();
        let (name, to, target_type, key) = match parts.as_slice() {
            [name, to, target_type] => (*name, *to, *target_type, None),
            [name, to, target_type, key] => (*name, *to, *target_type, Some(*key)),
            _ => {
                eprintln!(
                    "Error: invalid relation \"{}\": expected NAME:TO:TYPE[:KEY]",
                    spec
                );
                return Err(2);
            }
        };

        let mut options = RelationOptions::new(target_type, to);
        if let Some(key) = key {
            options = options.key(key);
        }
        builder = builder
            .relation(name, options)
            .map_err(report_declare_error)?;
    }

    Ok(builder.build())
}

fn report_declare_error(e: jsonapi_resource::DeclareError) -> u8 {
    eprintln!("Error: {}", e);
    e.exit_code() as u8
}

fn load_source(path: &Path) -> Result<Value, u8> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(3);
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: cannot read {}: {}", path.display(), e);
        3u8
    })?;

    parse_source(&content)
}

fn load_source_stdin() -> Result<Value, u8> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content).map_err(|e| {
        eprintln!("Error: cannot read stdin: {}", e);
        3u8
    })?;

    parse_source(&content)
}

fn parse_source(content: &str) -> Result<Value, u8> {
    serde_json::from_str(content).map_err(|e| {
        eprintln!("Error: invalid JSON: {}", e);
        2u8
    })
}
