use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "rdf-resources")]
/// Browse classes of RDF resources served by SPARQL endpoints
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the classes of the resources stored in a SPARQL endpoint
    Classes {
        /// URL of the SPARQL endpoint
        #[arg(short, long, value_hint = ValueHint::Url)]
        endpoint: String,
    },
    /// List the properties used by the resources of a class
    ///
    /// This can be a wide selection with predicates from many different namespaces.
    Properties {
        /// URL of the SPARQL endpoint
        #[arg(short, long, value_hint = ValueHint::Url)]
        endpoint: String,
        /// IRI of the class
        #[arg(short, long, value_hint = ValueHint::Url)]
        class: String,
    },
    /// Enumerate the resources of a class
    Resources {
        #[command(flatten)]
        class: ClassArgs,
        /// Stop after this many resources
        #[arg(long)]
        limit: Option<usize>,
        /// SPARQL filter expression on ?resource
        ///
        /// For example `strstarts(str(?resource), "http://dbpedia.org/resource/K")`.
        #[arg(long)]
        filter: Option<String>,
    },
    /// Print the values of a property of a resource
    Get {
        #[command(flatten)]
        class: ClassArgs,
        /// IRI of the resource
        #[arg(short, long, value_hint = ValueHint::Url)]
        resource: String,
        /// IRI of the property
        ///
        /// A name without scheme is looked up in the namespace of the class.
        #[arg(short, long)]
        property: String,
    },
    /// Print all the properties of a resource
    Describe {
        #[command(flatten)]
        class: ClassArgs,
        /// IRI of the resource
        #[arg(short, long, value_hint = ValueHint::Url)]
        resource: String,
    },
}

/// The declaration of a class, either inline or read from a JSON file.
#[derive(clap::Args)]
pub struct ClassArgs {
    /// JSON file with a list of class declarations
    #[arg(long, requires = "class_name", conflicts_with_all = ["endpoint", "prefix", "label"], value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// Name of the class to use from the --config file
    #[arg(long = "class", requires = "config")]
    pub class_name: Option<String>,
    /// URL of the SPARQL endpoint
    #[arg(short, long, required_unless_present = "config", value_hint = ValueHint::Url)]
    pub endpoint: Option<String>,
    /// Namespace of the class
    #[arg(long, required_unless_present = "config", value_hint = ValueHint::Url)]
    pub prefix: Option<String>,
    /// Label of the class, appended to the namespace to build the class IRI
    #[arg(long, required_unless_present = "config")]
    pub label: Option<String>,
    /// User for HTTP Basic authentication
    #[arg(long, requires = "password")]
    pub username: Option<String>,
    /// Password for HTTP Basic authentication
    #[arg(long, requires = "username")]
    pub password: Option<String>,
    /// Enumerate resources in pages of this size
    #[arg(long)]
    pub page_size: Option<usize>,
}
